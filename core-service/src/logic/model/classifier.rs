//! Classifier - `predict(vector) -> label` capability and its adapters
//!
//! The concrete artifact format is a tagged variant: exported coefficients
//! (`logistic`), a native port of a tree ensemble (`random_forest`), a remote
//! prediction service (`remote`) or an ONNX graph (`onnx`).

use std::path::Path;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLASSES, DEFAULT_DECISION_THRESHOLD};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::error::{PipelineError, Stage};
use super::forest::RandomForest;
use super::remote::{RemoteClassifier, RemoteSpec};

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for loaded classifiers
///
/// The returned label is the raw class value of the artifact; the pipeline
/// decides whether it is one it can render.
pub trait Classifier: Send + Sync {
    fn predict(&self, vector: &FeatureVector) -> Result<i64, PipelineError>;

    /// Short name of the engine (artifact `kind`)
    fn name(&self) -> &'static str;
}

pub(crate) fn default_threshold() -> f64 {
    DEFAULT_DECISION_THRESHOLD
}

pub(crate) fn default_classes() -> [i64; 2] {
    DEFAULT_CLASSES
}

// ============================================================================
// LOGISTIC REGRESSION (exported coefficients)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Positive iff probability > threshold
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Labels emitted for the negative and the positive side
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            threshold: DEFAULT_DECISION_THRESHOLD,
            classes: DEFAULT_CLASSES,
        }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "coefficients has {} entries, expected {}",
                self.coefficients.len(),
                FEATURE_COUNT
            ));
        }
        if let Some(i) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(format!("coefficients[{}] is not a finite number", i));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not a finite number".to_string());
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(format!("threshold must be inside (0, 1), got {}", self.threshold));
        }
        Ok(())
    }

    /// Linear decision value `w·x + b`
    pub fn decision(&self, vector: &FeatureVector) -> Result<f64, PipelineError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(PipelineError::DimensionMismatch {
                stage: Stage::Predict,
                expected: FEATURE_COUNT,
                actual: self.coefficients.len(),
            });
        }
        let w = ArrayView1::from(self.coefficients.as_slice());
        let x = ArrayView1::from(vector.as_slice());
        Ok(w.dot(&x) + self.intercept)
    }

    /// Probability of the positive class
    pub fn probability(&self, vector: &FeatureVector) -> Result<f64, PipelineError> {
        let z = self.decision(vector)?;
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, vector: &FeatureVector) -> Result<i64, PipelineError> {
        let p = self.probability(vector)?;
        if !p.is_finite() {
            return Err(PipelineError::NonFinite { stage: Stage::Predict, index: 0 });
        }
        let positive = p > self.threshold;
        Ok(self.classes[usize::from(positive)])
    }

    fn name(&self) -> &'static str {
        "logistic"
    }
}

// ============================================================================
// ONNX SPEC
// ============================================================================

/// ONNX graph reference. Only usable when built with the `onnx` feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnnxSpec {
    /// Model file, relative paths resolve against the artifact's directory
    pub path: String,
}

// ============================================================================
// ARTIFACT VARIANTS
// ============================================================================

/// Classifier section of the model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    Logistic(LogisticModel),
    RandomForest(RandomForest),
    Remote(RemoteSpec),
    Onnx(OnnxSpec),
}

impl ClassifierSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierSpec::Logistic(_) => "logistic",
            ClassifierSpec::RandomForest(_) => "random_forest",
            ClassifierSpec::Remote(_) => "remote",
            ClassifierSpec::Onnx(_) => "onnx",
        }
    }

    /// Structural checks run once at load time
    pub fn check(&self) -> Result<(), String> {
        match self {
            ClassifierSpec::Logistic(model) => model.check(),
            ClassifierSpec::RandomForest(forest) => forest.check(),
            ClassifierSpec::Remote(spec) => spec.check(),
            ClassifierSpec::Onnx(spec) if spec.path.trim().is_empty() => {
                Err("onnx path must not be empty".to_string())
            }
            ClassifierSpec::Onnx(_) => Ok(()),
        }
    }

    /// Turn the checked spec into a ready classifier
    pub fn build(self, base_dir: &Path) -> Result<Box<dyn Classifier>, String> {
        match self {
            ClassifierSpec::Logistic(model) => Ok(Box::new(model)),
            ClassifierSpec::RandomForest(forest) => Ok(Box::new(forest)),
            ClassifierSpec::Remote(spec) => Ok(Box::new(RemoteClassifier::new(spec))),
            ClassifierSpec::Onnx(spec) => build_onnx(spec, base_dir),
        }
    }
}

#[cfg(feature = "onnx")]
fn build_onnx(spec: OnnxSpec, base_dir: &Path) -> Result<Box<dyn Classifier>, String> {
    let path = base_dir.join(&spec.path);
    let classifier = super::onnx::OnnxClassifier::load(&path).map_err(|e| e.to_string())?;
    Ok(Box::new(classifier))
}

#[cfg(not(feature = "onnx"))]
fn build_onnx(spec: OnnxSpec, _base_dir: &Path) -> Result<Box<dyn Classifier>, String> {
    Err(format!(
        "model {} needs ONNX Runtime, rebuild with the `onnx` feature",
        spec.path
    ))
}
