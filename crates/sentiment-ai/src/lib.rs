//! Inference layer: the model seam, the ONNX Runtime implementation, and the text classifier.

mod classifier;
mod model;
pub use classifier::Classifier;
pub use model::SentimentModel;

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
