//! Configuration module

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use heartcheck_core::constants::{DEFAULT_ARTIFACT_DIR, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE};
use heartcheck_core::ArtifactPaths;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Classifier artifact
    pub model_path: PathBuf,

    /// Scaler artifact
    pub scaler_path: PathBuf,

    /// Busy-state delay before the form gets its answer
    pub predict_delay_ms: u64,

    /// Environment (development, production)
    pub environment: String,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let artifact_dir = PathBuf::from(DEFAULT_ARTIFACT_DIR);
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        // production logs are JSON unless asked otherwise
        let log_format = match lookup("LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(_) => LogFormat::Pretty,
            None if environment == "production" => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| artifact_dir.join(DEFAULT_MODEL_FILE)),

            scaler_path: lookup("SCALER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| artifact_dir.join(DEFAULT_SCALER_FILE)),

            predict_delay_ms: lookup("PREDICT_DELAY_MS")
                .and_then(|d| d.parse().ok())
                .unwrap_or(2000),

            environment,

            log_format,
        }
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.model_path, &self.scaler_path)
    }

    pub fn predict_delay(&self) -> Duration {
        Duration::from_millis(self.predict_delay_ms)
    }
}
