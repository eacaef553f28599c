//! Terminal rendering for prediction results.
//!
//! A single prediction becomes a label line, a confidence bar, and a
//! percentage; a batch becomes a fixed-width table, one row per input.

use std::fmt::Write;

use sentiment_core::{BatchRecord, BatchResponse, Label, Prediction};
use serde_json::Value;

const BAR_WIDTH: usize = 40;
const MAX_TEXT_WIDTH: usize = 60;

// ── Single ──

/// Render one prediction as label, confidence bar, and percentage.
pub fn render_prediction(prediction: &Prediction) -> String {
    let pct = percent(prediction.confidence);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Predicted Label: {}",
        capitalize(prediction.predicted_label)
    );
    let _ = writeln!(out, "{}", confidence_bar(pct));
    let _ = write!(out, "Confidence: {pct:.2}%");
    out
}

/// `[████████░░░░]`-style bar for a percentage in [0, 100].
pub fn confidence_bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

// ── Batch ──

/// Render a batch response as a table with confidence as a percentage string.
pub fn render_batch(response: &BatchResponse) -> String {
    let rows: Vec<[String; 4]> = response
        .predictions
        .iter()
        .map(|record| match record {
            BatchRecord::Predicted(p) => [
                shorten(&p.text),
                p.predicted_label.as_str().to_string(),
                format!("{:.2}%", percent(p.confidence)),
                String::new(),
            ],
            BatchRecord::Failed { text, error } => [
                shorten(&echoed_text(text)),
                "-".to_string(),
                "-".to_string(),
                error.clone(),
            ],
        })
        .collect();

    let headers = ["text", "predicted_label", "confidence", "error"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "Batch Prediction Results ({})", response.count);
    push_row(&mut out, &headers.map(String::from), &widths);
    push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.trim_end().to_string()
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| pad_right(cell, w))
        .collect();
    let _ = writeln!(out, "  {}", line.join("  ").trim_end());
}

// ── Helpers ──

/// Confidence in [0, 1] as a percentage rounded to 2 decimals.
fn percent(confidence: f64) -> f64 {
    (confidence * 100.0 * 100.0).round() / 100.0
}

fn capitalize(label: Label) -> &'static str {
    match label {
        Label::Positive => "Positive",
        Label::Negative => "Negative",
    }
}

/// Failed batch items echo whatever the server received.
fn echoed_text(text: &Value) -> String {
    match text {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn shorten(text: &str) -> String {
    if text.chars().count() > MAX_TEXT_WIDTH {
        let head: String = text.chars().take(MAX_TEXT_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn pad_right(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prediction(text: &str, label: Label, confidence: f64) -> Prediction {
        Prediction {
            text: text.into(),
            predicted_label: label,
            confidence,
        }
    }

    #[test]
    fn single_shows_label_bar_and_percent() {
        let out = render_prediction(&prediction("great", Label::Positive, 0.9123));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Predicted Label: Positive");
        assert!(lines[1].starts_with('[') && lines[1].ends_with(']'));
        assert_eq!(lines[2], "Confidence: 91.23%");
    }

    #[test]
    fn bar_fill_matches_percentage() {
        let bar = confidence_bar(50.0);
        assert_eq!(bar.matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(bar.matches('░').count(), BAR_WIDTH / 2);

        assert_eq!(confidence_bar(100.0).matches('█').count(), BAR_WIDTH);
        assert_eq!(confidence_bar(0.0).matches('█').count(), 0);
    }

    #[test]
    fn percent_rounds_to_two_places() {
        assert_eq!(percent(0.87654), 87.65);
        assert_eq!(percent(1.0), 100.0);
    }

    #[test]
    fn batch_table_has_row_per_input() {
        let resp = BatchResponse {
            predictions: vec![
                BatchRecord::Predicted(prediction("I love it", Label::Positive, 0.95)),
                BatchRecord::Failed {
                    text: json!(""),
                    error: "Empty text".into(),
                },
            ],
            count: 2,
        };
        let out = render_batch(&resp);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Batch Prediction Results (2)");
        assert!(lines[1].contains("predicted_label"));
        assert!(lines[3].contains("I love it"));
        assert!(lines[3].contains("positive"));
        assert!(lines[3].contains("95.00%"));
        assert!(lines[4].contains("Empty text"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn long_text_is_shortened() {
        let long = "a".repeat(100);
        let short = shorten(&long);
        assert_eq!(short.chars().count(), MAX_TEXT_WIDTH);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn shorten_respects_char_boundaries() {
        let text = "é".repeat(80);
        assert!(shorten(&text).ends_with("..."));
    }

    #[test]
    fn echoed_non_string_text() {
        assert_eq!(echoed_text(&json!(null)), "");
        assert_eq!(echoed_text(&json!(7)), "7");
        assert_eq!(echoed_text(&json!("hi")), "hi");
    }
}
