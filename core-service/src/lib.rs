//! HeartCheck Core
//!
//! Loads the scaler and classifier artifacts, turns a validated form into the
//! 13-feature vector and maps the predicted label to a verdict.

pub mod api;
pub mod constants;
pub mod logic;

pub use api::ModelStatus;
pub use logic::features::{FeatureVector, PatientInput, Sex, FEATURE_COUNT, FEATURE_LAYOUT, FORM_FIELDS};
pub use logic::model::{
    load_pipeline, ArtifactError, ArtifactPaths, PipelineError, Prediction, PredictionPipeline,
};
pub use logic::reference::{reference_panel, ReferencePanel};
pub use logic::verdict::{Diagnosis, Tone, Verdict};
