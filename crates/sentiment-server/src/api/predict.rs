//! Single and batch prediction endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use sentiment_ai::Classifier;
use sentiment_core::{BatchRecord, BatchResponse, Prediction};
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

const MISSING_TEXT: &str = "Missing \"text\" field in request body";
const EMPTY_TEXT: &str = "Text field cannot be empty";
const TEXT_NOT_STRING: &str = "\"text\" must be a string";
const MISSING_TEXTS: &str = "Missing \"texts\" field in request body";
const TEXTS_NOT_LIST: &str = "\"texts\" must be a list";
const EMPTY_ITEM: &str = "Empty text";
const ITEM_NOT_STRING: &str = "Text must be a string";

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let body = json_body(payload)?;

    let text = match body.get("text") {
        None => return Err(ApiError::bad_request(MISSING_TEXT)),
        Some(Value::Null) => return Err(ApiError::bad_request(EMPTY_TEXT)),
        Some(Value::String(text)) => text.clone(),
        Some(_) => return Err(ApiError::bad_request(TEXT_NOT_STRING)),
    };
    if text.trim().is_empty() {
        return Err(ApiError::bad_request(EMPTY_TEXT));
    }

    let classifier = state.classifier.clone();
    let prediction = run_blocking(move || classifier.classify(&text))
        .await
        .map_err(|e| ApiError::internal(format!("Prediction failed: {e}")))?;

    info!(
        label = prediction.predicted_label.as_str(),
        confidence = prediction.confidence,
        "predicted"
    );
    Ok(Json(prediction))
}

pub async fn predict_batch(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let mut body = json_body(payload)?;

    let items = match body.get_mut("texts") {
        None => return Err(ApiError::bad_request(MISSING_TEXTS)),
        Some(Value::Array(items)) => std::mem::take(items),
        Some(_) => return Err(ApiError::bad_request(TEXTS_NOT_LIST)),
    };

    let classifier = state.classifier.clone();
    let predictions = run_blocking(move || classify_items(&classifier, items))
        .await
        .map_err(|e| ApiError::internal(format!("Batch prediction failed: {e}")))?;

    let count = predictions.len();
    let failed = predictions
        .iter()
        .filter(|r| r.prediction().is_none())
        .count();
    info!(count, failed, "batch predicted");

    Ok(Json(BatchResponse { predictions, count }))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            ApiError::bad_request(format!("Invalid JSON body: {}", rejection.body_text()))
        })
}

/// Sequential loop; unusable items become per-record errors, but a model
/// failure aborts the whole batch.
fn classify_items(classifier: &Classifier, items: Vec<Value>) -> anyhow::Result<Vec<BatchRecord>> {
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let record = match item {
            Value::String(ref text) if !text.trim().is_empty() => {
                BatchRecord::Predicted(classifier.classify(text)?)
            }
            Value::Null | Value::String(_) => BatchRecord::Failed {
                text: item,
                error: EMPTY_ITEM.to_string(),
            },
            other => BatchRecord::Failed {
                text: other,
                error: ITEM_NOT_STRING.to_string(),
            },
        };
        records.push(record);
    }
    Ok(records)
}

/// Run inference on the blocking pool so a slow model call only holds up its
/// own request.
async fn run_blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow::anyhow!("inference task failed: {e}"))?
}
