//! Artifact Loader - reads the scaler and classifier documents at startup
//!
//! Both artifacts share one JSON envelope:
//!
//! ```json
//! { "format_version": 1,
//!   "description": "optional",
//!   "feature_names": ["age", "sex", "..."],
//!   "kind": "standard", "mean": [...], "scale": [...] }
//! ```
//!
//! Any failure here is fatal for the process; nothing is retried.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{
    ARTIFACT_FORMAT_VERSION, DEFAULT_ARTIFACT_DIR, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE,
};
use crate::logic::features::layout::validate_feature_names;
use super::classifier::{Classifier, ClassifierSpec};
use super::error::{ArtifactError, ArtifactKind};
use super::pipeline::PredictionPipeline;
use super::scaler::{FeatureTransform, Scaler};

// ============================================================================
// PATHS
// ============================================================================

/// Locations of the artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    pub fn new(model: impl Into<PathBuf>, scaler: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            scaler: scaler.into(),
        }
    }

    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_MODEL_FILE), dir.join(DEFAULT_SCALER_FILE))
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ARTIFACT_DIR)
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

#[derive(Debug, Deserialize)]
struct ArtifactDocument<T> {
    format_version: u32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    body: T,
}

/// What was loaded, for logs and the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Variant tag of the artifact (`standard`, `logistic`, ...)
    pub kind: String,
    pub path: String,
    /// SHA-256 of the file bytes, hex encoded
    pub sha256: String,
    pub description: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

/// Read, fingerprint and parse one artifact document
fn read_document<T: DeserializeOwned>(
    kind: ArtifactKind,
    path: &Path,
) -> Result<(ArtifactDocument<T>, String), ArtifactError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArtifactError::NotFound {
            kind,
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Io {
            kind,
            path: path.to_path_buf(),
            source,
        },
    })?;

    let sha256 = hex::encode(Sha256::digest(&bytes));

    let document: ArtifactDocument<T> =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
            kind,
            path: path.to_path_buf(),
            source,
        })?;

    if document.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion {
            kind,
            path: path.to_path_buf(),
            found: document.format_version,
            expected: ARTIFACT_FORMAT_VERSION,
        });
    }

    if let Some(names) = &document.feature_names {
        validate_feature_names(names).map_err(|source| ArtifactError::LayoutMismatch {
            kind,
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok((document, sha256))
}

fn metadata(kind: &str, path: &Path, sha256: String, description: Option<String>) -> ArtifactMetadata {
    ArtifactMetadata {
        kind: kind.to_string(),
        path: path.display().to_string(),
        sha256,
        description,
        loaded_at: Utc::now(),
    }
}

// ============================================================================
// LOADERS
// ============================================================================

/// Load the scaler artifact
pub fn load_scaler(path: &Path) -> Result<(Scaler, ArtifactMetadata), ArtifactError> {
    let kind = ArtifactKind::Scaler;
    let (document, sha256) = read_document::<Scaler>(kind, path)?;

    document.body.check().map_err(|reason| ArtifactError::Invalid {
        kind,
        path: path.to_path_buf(),
        reason,
    })?;

    let meta = metadata(document.body.name(), path, sha256, document.description);
    log::info!("Loaded {} scaler from {} (sha256 {})", meta.kind, meta.path, meta.sha256);

    Ok((document.body, meta))
}

/// Load the classifier artifact
pub fn load_classifier(path: &Path) -> Result<(Box<dyn Classifier>, ArtifactMetadata), ArtifactError> {
    let kind = ArtifactKind::Model;
    let (document, sha256) = read_document::<ClassifierSpec>(kind, path)?;

    document.body.check().map_err(|reason| ArtifactError::Invalid {
        kind,
        path: path.to_path_buf(),
        reason,
    })?;

    let meta = metadata(document.body.kind(), path, sha256, document.description);

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let classifier = document.body.build(base_dir).map_err(|reason| ArtifactError::Runtime {
        kind,
        path: path.to_path_buf(),
        reason,
    })?;

    log::info!("Loaded {} classifier from {} (sha256 {})", meta.kind, meta.path, meta.sha256);

    Ok((classifier, meta))
}

/// Load both artifacts and assemble the prediction pipeline
pub fn load_pipeline(paths: &ArtifactPaths) -> Result<PredictionPipeline, ArtifactError> {
    let (classifier, model_meta) = load_classifier(&paths.model)?;
    let (scaler, scaler_meta) = load_scaler(&paths.scaler)?;

    Ok(PredictionPipeline::from_boxed(Box::new(scaler), classifier)
        .with_metadata(scaler_meta, model_meta))
}
