pub mod error;
pub mod vocab;
pub mod wire;

pub use error::CoreError;
pub use vocab::{INDEX_OFFSET, PAD_ID, Vocabulary, pad_sequence};
pub use wire::{
    BatchRecord, BatchRequest, BatchResponse, ErrorBody, HealthStatus, Label, PredictRequest,
    Prediction,
};
