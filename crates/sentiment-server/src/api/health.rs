use axum::Json;
use sentiment_core::HealthStatus;

/// Liveness only; the classifier exists for as long as the state does.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        message: "Sentiment Analysis API is running".to_string(),
        model_loaded: true,
    })
}
