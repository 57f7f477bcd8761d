//! JSON prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use heartcheck_core::{Diagnosis, PatientInput};
use serde::Serialize;
use uuid::Uuid;

use super::run_prediction;
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub request_id: Uuid,
    pub label: u8,
    pub diagnosis: Diagnosis,
    pub headline: &'static str,
    pub message: &'static str,
    pub inference_time_us: u64,
    pub engine: String,
}

/// POST /api/v1/predict
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PatientInput>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(input) = body?;
    let request_id = Uuid::new_v4();

    let prediction = run_prediction(&state, input, false).await?;

    tracing::info!(
        %request_id,
        label = prediction.label,
        engine = %prediction.engine,
        inference_time_us = prediction.inference_time_us,
        "API prediction"
    );

    Ok(Json(PredictResponse {
        request_id,
        label: prediction.label,
        diagnosis: prediction.diagnosis,
        headline: prediction.diagnosis.headline(),
        message: prediction.diagnosis.message(),
        inference_time_us: prediction.inference_time_us,
        engine: prediction.engine,
    }))
}
