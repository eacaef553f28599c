//! Text classification: preprocessing plus a single model call per text.

use sentiment_core::{PAD_ID, Prediction, Vocabulary};
use tracing::debug;

use crate::model::SentimentModel;

/// Vocabulary and model bundled into one immutable classifier.
///
/// Built once at startup and shared read-only by every request.
pub struct Classifier {
    vocab: Vocabulary,
    model: Box<dyn SentimentModel>,
}

impl Classifier {
    pub fn new(vocab: Vocabulary, model: Box<dyn SentimentModel>) -> Self {
        Self { vocab, model }
    }

    /// Load `model.onnx` and `vocab.json` from a model directory.
    ///
    /// Either artifact missing or unreadable is an error; callers treat it as
    /// fatal at startup.
    #[cfg(feature = "onnx")]
    pub fn load(model_dir: &std::path::Path) -> anyhow::Result<Self> {
        let vocab = Vocabulary::load(&model_dir.join("vocab.json"))?;
        let model = crate::onnx::OnnxModel::load(&model_dir.join("model.onnx"))?;
        Ok(Self::new(vocab, Box::new(model)))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Classify one text. The text is echoed in the result as given.
    pub fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        let sequence = self.vocab.encode(text);
        let known = sequence.iter().filter(|&&id| id != PAD_ID).count();

        let score = self.model.score(&sequence)?;
        anyhow::ensure!(
            score.is_finite(),
            "model returned a non-finite score: {score}"
        );
        let score = score.clamp(0.0, 1.0);

        debug!(known_tokens = known, score, "scored text");
        Ok(Prediction::from_score(text, score))
    }
}
