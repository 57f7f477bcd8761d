//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    engine: &'static str,
    timestamp: i64,
}

/// Artifacts are loaded before the listener binds, so a running server is a ready one
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        engine: state.pipeline.engine(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
