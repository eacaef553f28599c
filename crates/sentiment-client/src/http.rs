//! HTTP client for the sentiment API.

use sentiment_core::{BatchRequest, BatchResponse, HealthStatus, PredictRequest, Prediction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::submission::Submission;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Response to a [`Submission`], matching the endpoint that was called.
#[derive(Debug, Clone)]
pub enum Outcome {
    Single(Prediction),
    Batch(BatchResponse),
}

pub struct PredictClient {
    client: reqwest::Client,
    base_url: String,
}

impl PredictClient {
    /// `base_url` should be like `http://127.0.0.1:5000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a preconfigured `reqwest::Client` (timeouts, proxies, TLS).
    pub fn with_client(base_url: String, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        decode(resp).await
    }

    pub async fn predict(&self, text: &str) -> Result<Prediction, ClientError> {
        let body = PredictRequest {
            text: text.to_string(),
        };
        self.post("/predict", &body).await
    }

    pub async fn predict_batch(&self, texts: &[String]) -> Result<BatchResponse, ClientError> {
        let body = BatchRequest {
            texts: texts.to_vec(),
        };
        self.post("/predict/batch", &body).await
    }

    /// Send one line to `/predict`, several to `/predict/batch`.
    pub async fn submit(&self, submission: &Submission) -> Result<Outcome, ClientError> {
        info!(lines = submission.len(), "submitting text");
        match submission {
            Submission::Single(text) => self.predict(text).await.map(Outcome::Single),
            Submission::Batch(texts) => self.predict_batch(texts).await.map(Outcome::Batch),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "posting to sentiment API");
        let resp = self.client.post(&url).json(body).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Server {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}
