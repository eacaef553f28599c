//! Self-describing index served at `/`.

use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Sentiment Analysis API",
        "endpoints": {
            "GET /health": "Check API health status",
            "POST /predict": "Predict sentiment for a single text",
            "POST /predict/batch": "Predict sentiment for multiple texts"
        },
        "example_usage": {
            "/predict": {
                "input": {"text": "I really loved this movie!"},
                "output": {"predicted_label": "positive", "confidence": 0.93}
            },
            "/predict/batch": {
                "input": {"texts": ["I really loved this movie!", "Worst film ever."]},
                "output": {"predictions": "[...]", "count": 2}
            }
        }
    }))
}
