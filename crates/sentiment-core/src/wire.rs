//! JSON types shared by the HTTP service and its client.

use serde::{Deserialize, Serialize};

/// Score at or above which a text is labelled positive.
pub const POSITIVE_THRESHOLD: f32 = 0.5;

/// Predicted sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

/// Result of classifying a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub text: String,
    pub predicted_label: Label,
    /// Probability of the predicted class, rounded to 4 decimals.
    pub confidence: f64,
}

impl Prediction {
    /// Turn a raw model score in [0, 1] into a label and confidence.
    pub fn from_score(text: impl Into<String>, score: f32) -> Self {
        // The complement is taken in f32, like the score itself.
        let (predicted_label, confidence) = if score >= POSITIVE_THRESHOLD {
            (Label::Positive, score)
        } else {
            (Label::Negative, 1.0 - score)
        };
        Self {
            text: text.into(),
            predicted_label,
            confidence: round4(f64::from(confidence)),
        }
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// One entry of a batch response: a prediction, or a per-item error.
///
/// Failed items echo the input exactly as received, which may be `null` or a
/// non-string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchRecord {
    Predicted(Prediction),
    Failed {
        text: serde_json::Value,
        error: String,
    },
}

impl BatchRecord {
    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            Self::Predicted(p) => Some(p),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub predictions: Vec<BatchRecord>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub model_loaded: bool,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn high_score_is_positive() {
        let p = Prediction::from_score("great", 0.93);
        assert_eq!(p.predicted_label, Label::Positive);
        assert!((p.confidence - 0.93).abs() < 1e-6);
    }

    #[test]
    fn low_score_is_negative_with_complement() {
        let p = Prediction::from_score("awful", 0.2);
        assert_eq!(p.predicted_label, Label::Negative);
        assert!((p.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn negative_complement_rounds_from_f32() {
        // 1 - 0.41265002 is 0.58735001 in f32 but 0.58734998 in f64.
        let p = Prediction::from_score("meh", 0.412_650_02);
        assert_eq!(p.predicted_label, Label::Negative);
        assert_eq!(p.confidence, 0.5874);
    }

    #[test]
    fn threshold_is_positive() {
        let p = Prediction::from_score("meh", 0.5);
        assert_eq!(p.predicted_label, Label::Positive);
        assert_eq!(p.confidence, 0.5);
    }

    #[test]
    fn confidence_rounded_to_four_places() {
        let p = Prediction::from_score("x", 0.876_543_2);
        assert_eq!(p.confidence, 0.8765);
    }

    #[test]
    fn confidence_stays_in_unit_interval() {
        for score in [0.0f32, 0.25, 0.4999, 0.5, 0.75, 1.0] {
            let p = Prediction::from_score("x", score);
            assert!((0.0..=1.0).contains(&p.confidence), "score {score}");
            assert!(p.confidence >= 0.5, "score {score}");
        }
    }

    #[test]
    fn prediction_wire_shape() {
        let p = Prediction::from_score("I love it", 0.9);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(
            v,
            json!({"text": "I love it", "predicted_label": "positive", "confidence": 0.9})
        );
    }

    #[test]
    fn failed_record_has_no_label() {
        let rec = BatchRecord::Failed {
            text: json!(""),
            error: "Empty text".into(),
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v, json!({"text": "", "error": "Empty text"}));
        assert!(v.get("predicted_label").is_none());
    }

    #[test]
    fn batch_response_parses_mixed_records() {
        let raw = r#"{
            "predictions": [
                {"text": "I love it", "predicted_label": "positive", "confidence": 0.91},
                {"text": null, "error": "Empty text"}
            ],
            "count": 2
        }"#;
        let resp: BatchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.count, 2);
        assert_eq!(
            resp.predictions[0].prediction().map(|p| p.predicted_label),
            Some(Label::Positive)
        );
        match &resp.predictions[1] {
            BatchRecord::Failed { text, error } => {
                assert!(text.is_null());
                assert_eq!(error, "Empty text");
            }
            other => panic!("expected failed record, got {other:?}"),
        }
    }
}
