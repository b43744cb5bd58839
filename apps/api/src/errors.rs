use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::scoring::engine::FitScoreError;
use crate::scoring::models::FitScoreResponse;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every error renders as a failed `FitScoreResponse`, never a bare status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<FitScoreError> for AppError {
    fn from(err: FitScoreError) -> Self {
        match err {
            FitScoreError::Validation(msg) => AppError::Validation(msg),
            FitScoreError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(FitScoreResponse::failure(self.to_string()))).into_response()
    }
}

/// Renders a panic caught by `CatchPanicLayer` as a failed evaluation.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    AppError::Internal(format!("unexpected failure while scoring ({detail})")).into_response()
}
