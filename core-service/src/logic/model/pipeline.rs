//! Prediction Pipeline - form input → feature vector → scaler → classifier
//!
//! Artifacts are immutable after load, so one pipeline is shared by every
//! request. Only the counters change, and they are atomics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::api::status::{EngineInfo, ModelStatus};
use crate::logic::features::{FeatureVector, LayoutInfo, PatientInput};
use crate::logic::verdict::Diagnosis;
use super::artifact::ArtifactMetadata;
use super::classifier::Classifier;
use super::error::PipelineError;
use super::scaler::FeatureTransform;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Binary label (0 = no disease, 1 = disease)
    pub label: u8,
    pub diagnosis: Diagnosis,
    /// Classifier engine that produced the label
    pub engine: String,
    pub inference_time_us: u64,
}

/// Latency and outcome counters
#[derive(Debug, Default)]
struct InferenceStats {
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    failure_count: AtomicU64,
}

impl InferenceStats {
    fn record(&self, elapsed_us: u64, ok: bool) {
        self.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn avg_latency_ms(&self) -> f64 {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        if count > 0 {
            (sum as f64 / count as f64) / 1000.0
        } else {
            0.0
        }
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

pub struct PredictionPipeline {
    scaler: Box<dyn FeatureTransform>,
    classifier: Box<dyn Classifier>,
    scaler_meta: Option<ArtifactMetadata>,
    model_meta: Option<ArtifactMetadata>,
    stats: InferenceStats,
}

impl PredictionPipeline {
    pub fn new(
        scaler: impl FeatureTransform + 'static,
        classifier: impl Classifier + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(scaler), Box::new(classifier))
    }

    pub fn from_boxed(scaler: Box<dyn FeatureTransform>, classifier: Box<dyn Classifier>) -> Self {
        Self {
            scaler,
            classifier,
            scaler_meta: None,
            model_meta: None,
            stats: InferenceStats::default(),
        }
    }

    /// Attach what the loader knows about the artifact files
    pub fn with_metadata(mut self, scaler: ArtifactMetadata, model: ArtifactMetadata) -> Self {
        self.scaler_meta = Some(scaler);
        self.model_meta = Some(model);
        self
    }

    /// Validate the form input and run the full pipeline
    pub fn predict(&self, input: &PatientInput) -> Result<Prediction, PipelineError> {
        input.check().map_err(PipelineError::InvalidInput)?;

        self.predict_vector(&input.to_feature_vector())
    }

    /// Run scaler and classifier on an assembled raw vector
    pub fn predict_vector(&self, raw: &FeatureVector) -> Result<Prediction, PipelineError> {
        let start_time = Instant::now();

        let outcome = self
            .scaler
            .transform(raw)
            .and_then(|scaled| self.classifier.predict(&scaled))
            .and_then(Diagnosis::from_label);

        let inference_time_us = start_time.elapsed().as_micros() as u64;
        self.stats.record(inference_time_us, outcome.is_ok());

        match outcome {
            Ok(diagnosis) => {
                log::debug!(
                    "Prediction {:?} in {}us for {}",
                    diagnosis,
                    inference_time_us,
                    raw.to_log_entry()
                );
                Ok(Prediction {
                    label: diagnosis.label(),
                    diagnosis,
                    engine: self.classifier.name().to_string(),
                    inference_time_us,
                })
            }
            Err(e) => {
                log::warn!("Prediction failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn engine(&self) -> &'static str {
        self.classifier.name()
    }

    /// Snapshot for the status endpoint
    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            layout: LayoutInfo::current(),
            scaler: EngineInfo {
                engine: self.scaler.name().to_string(),
                artifact: self.scaler_meta.clone(),
            },
            classifier: EngineInfo {
                engine: self.classifier.name().to_string(),
                artifact: self.model_meta.clone(),
            },
            inference_count: self.stats.inference_count.load(Ordering::Relaxed),
            failure_count: self.stats.failure_count.load(Ordering::Relaxed),
            avg_latency_ms: self.stats.avg_latency_ms(),
        }
    }
}

impl std::fmt::Debug for PredictionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionPipeline")
            .field("scaler", &self.scaler.name())
            .field("classifier", &self.classifier.name())
            .field("stats", &self.stats)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
