//! Model Module - Artifact loading and prediction
//!
//! Scaler and classifier are loaded once from portable JSON artifacts and
//! wired into a shared [`PredictionPipeline`]. Adapters (native logistic,
//! native forest, remote service, ONNX) sit behind the [`Classifier`] trait.

pub mod error;
pub mod scaler;
pub mod classifier;
pub mod forest;
pub mod remote;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod artifact;
pub mod pipeline;

// Re-export common types
pub use error::{ArtifactError, ArtifactKind, PipelineError, Stage};
pub use scaler::{FeatureTransform, Scaler};
pub use classifier::{Classifier, ClassifierSpec, LogisticModel, OnnxSpec};
pub use forest::{DecisionTree, RandomForest};
pub use remote::{RemoteClassifier, RemoteSpec};
pub use artifact::{load_classifier, load_pipeline, load_scaler, ArtifactMetadata, ArtifactPaths};
pub use pipeline::{Prediction, PredictionPipeline};
