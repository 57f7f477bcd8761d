//! ONNX Classifier - ONNX Runtime integration
//!
//! Loads a graph exported from the training pipeline. Input is a `1x13` f32
//! tensor in layout order; the first output must be the int64 label tensor.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::classifier::Classifier;
use super::error::PipelineError;

/// Error while creating the ONNX session
#[derive(Debug)]
pub struct OnnxLoadError(pub String);

impl std::fmt::Display for OnnxLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OnnxLoadError: {}", self.0)
    }
}

impl std::error::Error for OnnxLoadError {}

pub struct OnnxClassifier {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(model_path: &Path) -> Result<Self, OnnxLoadError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(OnnxLoadError(format!("Model not found: {}", model_path.display())));
        }

        let session = Session::builder()
            .map_err(|e| OnnxLoadError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| OnnxLoadError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| OnnxLoadError(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| OnnxLoadError("No output defined".to_string()))?;

        log::info!("ONNX model loaded, label output: {}", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, vector: &FeatureVector) -> Result<i64, PipelineError> {
        let input: Vec<f32> = vector.as_slice().iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), input)
            .map_err(|e| PipelineError::Model(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PipelineError::Model(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PipelineError::Model(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| PipelineError::Model("No output".to_string()))?;

        let (_, labels) = output
            .try_extract_tensor::<i64>()
            .map_err(|e| PipelineError::Model(format!("Extract error: {}", e)))?;

        labels
            .first()
            .copied()
            .ok_or_else(|| PipelineError::Model("Empty label tensor".to_string()))
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}
