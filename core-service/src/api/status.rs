use serde::{Deserialize, Serialize};

use crate::logic::features::LayoutInfo;
use crate::logic::model::ArtifactMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub layout: LayoutInfo,
    pub scaler: EngineInfo,
    pub classifier: EngineInfo,

    pub inference_count: u64,
    pub failure_count: u64,
    pub avg_latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineInfo {
    pub engine: String, // "standard" | "logistic" | "random_forest" | ...
    pub artifact: Option<ArtifactMetadata>,
}
