//! HTML form handlers

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use heartcheck_core::PatientInput;

use super::run_prediction;
use crate::error::AppError;
use crate::views::{render_page, Outcome};
use crate::AppState;

/// GET / - form with defaults
pub async fn show() -> Html<String> {
    Html(render_page(&PatientInput::default(), &Outcome::Idle))
}

/// POST / - run the prediction and re-render with the submitted values
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<PatientInput>, FormRejection>,
) -> Response {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            // values could not be parsed, so the form falls back to defaults
            let err = AppError::from(rejection);
            return error_page(&PatientInput::default(), err);
        }
    };

    match run_prediction(&state, input.clone(), true).await {
        Ok(prediction) => {
            tracing::info!(
                diagnosis = ?prediction.diagnosis,
                inference_time_us = prediction.inference_time_us,
                "Form prediction"
            );
            Html(render_page(&input, &Outcome::Verdict(prediction.diagnosis.verdict()))).into_response()
        }
        Err(err) => error_page(&input, err),
    }
}

fn error_page(input: &PatientInput, err: AppError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!("Form prediction failed: {}", err);
    } else {
        tracing::debug!("Form rejected: {}", err);
    }

    (status, Html(render_page(input, &Outcome::Error(err.public_message())))).into_response()
}
