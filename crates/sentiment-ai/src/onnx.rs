//! ONNX Runtime scoring for an exported Keras sentiment model.
//!
//! The graph takes one `[1, max_len]` index tensor and emits a single sigmoid
//! probability. Converters disagree on the input element type (tf2onnx keeps
//! Keras' float32, others emit int64/int32), so it is read from the graph.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::tensor::TensorElementType;
use ort::value::{DynValue, Tensor, ValueType};
use tracing::info;

use crate::model::SentimentModel;

/// Sentiment model backed by an ONNX Runtime session.
pub struct OnnxModel {
    // `Session::run` takes `&mut self`; runs are serialised.
    session: Mutex<Session>,
    input_name: String,
    input_type: InputType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputType {
    Int64,
    Int32,
    Float32,
}

impl OnnxModel {
    /// Load a model from an `.onnx` file.
    pub fn load(model_path: &Path) -> anyhow::Result<Self> {
        anyhow::ensure!(model_path.exists(), "model not found: {model_path:?}");

        let session = Session::builder()?.commit_from_file(model_path)?;

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| anyhow::anyhow!("model has no inputs: {model_path:?}"))?;
        let input_name = input.name().to_string();
        let input_type = infer_input_type(input.dtype())?;

        info!(
            input = %input_name,
            dtype = ?input_type,
            model = %model_path.display(),
            "loaded sentiment model"
        );
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            input_type,
        })
    }

    fn input_tensor(&self, sequence: &[i64]) -> anyhow::Result<DynValue> {
        let shape = [1i64, sequence.len() as i64];
        let value = match self.input_type {
            InputType::Int64 => {
                Tensor::from_array((shape, sequence.to_vec().into_boxed_slice()))?.into_dyn()
            }
            InputType::Int32 => {
                let data: Vec<i32> = sequence.iter().map(|&id| id as i32).collect();
                Tensor::from_array((shape, data.into_boxed_slice()))?.into_dyn()
            }
            InputType::Float32 => {
                let data: Vec<f32> = sequence.iter().map(|&id| id as f32).collect();
                Tensor::from_array((shape, data.into_boxed_slice()))?.into_dyn()
            }
        };
        Ok(value)
    }
}

impl SentimentModel for OnnxModel {
    fn score(&self, sequence: &[i64]) -> anyhow::Result<f32> {
        let input = self.input_tensor(sequence)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("onnx session lock poisoned"))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input])?;

        // Output shape is [1, 1]; take the single probability.
        let (_, data) = outputs[0].try_extract_tensor::<f32>()?;
        data.first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("model produced an empty output tensor"))
    }
}

fn infer_input_type(dtype: &ValueType) -> anyhow::Result<InputType> {
    match dtype {
        ValueType::Tensor { ty, .. } => match ty {
            TensorElementType::Int64 => Ok(InputType::Int64),
            TensorElementType::Int32 => Ok(InputType::Int32),
            TensorElementType::Float32 => Ok(InputType::Float32),
            other => anyhow::bail!("unsupported model input element type: {other:?}"),
        },
        other => anyhow::bail!("model input is not a tensor: {other:?}"),
    }
}
