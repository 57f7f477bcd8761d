//! Error handling

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use heartcheck_core::PipelineError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Rejected input (bounds, malformed body)
    #[error("{0}")]
    ValidationError(String),

    // Scaler/classifier failure on a valid input
    #[error("prediction failed: {0}")]
    PredictionError(String),

    // Remote classifier failure
    #[error("model service error: {0}")]
    ExternalServiceError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::PredictionError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to show to the user
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::PredictionError(msg) => format!("Prediction failed: {}", msg),
            AppError::ExternalServiceError(_) => "Model service is unavailable, try again later".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) => tracing::debug!("Rejected input: {}", msg),
            AppError::PredictionError(msg) => tracing::error!("Prediction error: {}", msg),
            AppError::ExternalServiceError(msg) => tracing::error!("External service error: {}", msg),
            AppError::InternalError(msg) => tracing::error!("Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();

        let body = Json(json!({
            "error": self.public_message(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidInput(msg) => AppError::ValidationError(msg),
            PipelineError::Remote(msg) => AppError::ExternalServiceError(msg),
            other => AppError::PredictionError(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
