//! Central Configuration Constants
//!
//! Single source of truth for artifact names and model defaults.

/// Directory the artifact pair is read from when no path is configured
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Default classifier artifact file name
pub const DEFAULT_MODEL_FILE: &str = "heart_disease_model.json";

/// Default scaler artifact file name
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Artifact document format understood by the loader
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Probability above which a probabilistic classifier answers positive
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Labels for the negative / positive side when an artifact does not say
pub const DEFAULT_CLASSES: [i64; 2] = [0, 1];

/// Default timeout of the remote classifier (milliseconds)
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 5_000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "HeartCheck";
