//! Feature Scaler - pre-fit transform applied before the classifier
//!
//! The scaler parameters come from the artifact file; this module only
//! replays the transform.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::error::{PipelineError, Stage};

// ============================================================================
// TRANSFORM TRAIT
// ============================================================================

/// `transform(vector) -> vector` capability of a loaded scaler
pub trait FeatureTransform: Send + Sync {
    fn transform(&self, vector: &FeatureVector) -> Result<FeatureVector, PipelineError>;

    /// Short name of the transform (artifact `kind`)
    fn name(&self) -> &'static str;
}

// ============================================================================
// SCALER VARIANTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `(x - data_min) / (data_max - data_min)`, not clipped
    MinMax { data_min: Vec<f64>, data_max: Vec<f64> },
    /// Pass-through, for models that scale on their own
    Identity,
}

impl Scaler {
    /// Structural checks run once at load time
    pub fn check(&self) -> Result<(), String> {
        match self {
            Scaler::Standard { mean, scale } => {
                check_params("mean", mean)?;
                check_params("scale", scale)?;
                if let Some(i) = scale.iter().position(|s| *s <= 0.0) {
                    return Err(format!("scale[{}] must be positive, got {}", i, scale[i]));
                }
                Ok(())
            }
            Scaler::MinMax { data_min, data_max } => {
                check_params("data_min", data_min)?;
                check_params("data_max", data_max)?;
                let empty = data_min.iter().zip(data_max.iter()).position(|(lo, hi)| hi <= lo);
                if let Some(i) = empty {
                    return Err(format!(
                        "data_max[{}] ({}) must be greater than data_min[{}] ({})",
                        i, data_max[i], i, data_min[i]
                    ));
                }
                Ok(())
            }
            Scaler::Identity => Ok(()),
        }
    }
}

fn check_params(name: &str, values: &[f64]) -> Result<(), String> {
    if values.len() != FEATURE_COUNT {
        return Err(format!(
            "{} has {} entries, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        ));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(format!("{}[{}] is not a finite number", name, i));
    }
    Ok(())
}

fn ensure_dimension(params: &[f64]) -> Result<ArrayView1<'_, f64>, PipelineError> {
    if params.len() != FEATURE_COUNT {
        return Err(PipelineError::DimensionMismatch {
            stage: Stage::Transform,
            expected: FEATURE_COUNT,
            actual: params.len(),
        });
    }
    Ok(ArrayView1::from(params))
}

impl FeatureTransform for Scaler {
    fn transform(&self, vector: &FeatureVector) -> Result<FeatureVector, PipelineError> {
        let x = ArrayView1::from(vector.as_slice());

        let scaled: Array1<f64> = match self {
            Scaler::Standard { mean, scale } => {
                let mean = ensure_dimension(mean)?;
                let scale = ensure_dimension(scale)?;
                (&x - &mean) / &scale
            }
            Scaler::MinMax { data_min, data_max } => {
                let lo = ensure_dimension(data_min)?;
                let hi = ensure_dimension(data_max)?;
                (&x - &lo) / &(&hi - &lo)
            }
            Scaler::Identity => x.to_owned(),
        };

        let values = scaled.to_vec();
        let output = FeatureVector::from_slice(&values).ok_or(PipelineError::DimensionMismatch {
            stage: Stage::Transform,
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;

        if let Some(index) = output.first_non_finite() {
            return Err(PipelineError::NonFinite { stage: Stage::Transform, index });
        }

        Ok(output)
    }

    fn name(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min_max",
            Scaler::Identity => "identity",
        }
    }
}
