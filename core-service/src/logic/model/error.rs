//! Error types for artifact loading and prediction
//!
//! Startup failures (`ArtifactError`) and request failures (`PipelineError`)
//! are kept apart so callers can never confuse a broken deployment with a
//! single rejected request.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::logic::features::LayoutMismatchError;

/// Which of the two artifacts an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Scaler,
    Model,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Scaler => write!(f, "scaler"),
            ArtifactKind::Model => write!(f, "model"),
        }
    }
}

/// Fatal error while loading an artifact at startup
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{kind} artifact not found at {}", .path.display())]
    NotFound { kind: ArtifactKind, path: PathBuf },

    #[error("failed to read {kind} artifact {}: {source}", .path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} artifact {} is not a valid artifact document: {source}", .path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} artifact {} has format version {found}, expected {expected}", .path.display())]
    UnsupportedVersion {
        kind: ArtifactKind,
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("{kind} artifact {} was fit on a different feature layout: {source}", .path.display())]
    LayoutMismatch {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: LayoutMismatchError,
    },

    #[error("{kind} artifact {} is invalid: {reason}", .path.display())]
    Invalid {
        kind: ArtifactKind,
        path: PathBuf,
        reason: String,
    },

    #[error("{kind} artifact {} could not be initialized: {reason}", .path.display())]
    Runtime {
        kind: ArtifactKind,
        path: PathBuf,
        reason: String,
    },
}

impl ArtifactError {
    /// The artifact this error is attributed to
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactError::NotFound { kind, .. }
            | ArtifactError::Io { kind, .. }
            | ArtifactError::Parse { kind, .. }
            | ArtifactError::UnsupportedVersion { kind, .. }
            | ArtifactError::LayoutMismatch { kind, .. }
            | ArtifactError::Invalid { kind, .. }
            | ArtifactError::Runtime { kind, .. } => *kind,
        }
    }
}

/// Stage of the pipeline that produced a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transform,
    Predict,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Transform => write!(f, "transform"),
            Stage::Predict => write!(f, "predict"),
        }
    }
}

/// Request-level prediction failure
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{stage} expected {expected} features, artifact provides {actual}")]
    DimensionMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} produced a non-finite value for feature {index}")]
    NonFinite { stage: Stage, index: usize },

    #[error("remote classifier failed: {0}")]
    Remote(String),

    #[error("classifier failed: {0}")]
    Model(String),

    #[error("classifier returned label {0}, expected 0 or 1")]
    UnexpectedLabel(i64),
}
