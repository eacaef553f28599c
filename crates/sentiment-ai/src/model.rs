/// A pre-trained scoring function over fixed-length index sequences.
///
/// Implementations receive the already padded sequence (length `max_len`) and
/// return the probability that the text is positive, in [0, 1]. They must be
/// safe to call from many requests at once.
pub trait SentimentModel: Send + Sync {
    fn score(&self, sequence: &[i64]) -> anyhow::Result<f32>;
}

