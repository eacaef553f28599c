use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("vocabulary file not found: {0}")]
    VocabNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("vocabulary parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid vocabulary: {0}")]
    InvalidVocab(String),
}
