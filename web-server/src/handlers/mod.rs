//! HTTP handlers

pub mod health;
pub mod page;
pub mod predict;
pub mod model;
pub mod reference;

use std::sync::Arc;

use heartcheck_core::{PatientInput, Prediction};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Validate, wait out the configured delay, then predict on a blocking worker
pub(crate) async fn run_prediction(
    state: &AppState,
    input: PatientInput,
    with_delay: bool,
) -> AppResult<Prediction> {
    input.check().map_err(AppError::ValidationError)?;

    let delay = state.config.predict_delay();
    if with_delay && !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let pipeline = Arc::clone(&state.pipeline);
    let prediction = tokio::task::spawn_blocking(move || pipeline.predict(&input)).await??;

    Ok(prediction)
}
