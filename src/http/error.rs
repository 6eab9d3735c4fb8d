//! Request-level error types.
//!
//! Every per-request error is converted into a structured JSON response at
//! the middleware boundary. Internal failures answer with a generic body;
//! the underlying error is logged, never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::protection::OracleError;

/// Request-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("protection check failed: {0}")]
    Protection(#[from] OracleError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Infrastructure faults: generic body, details stay in the logs
            AppError::Protection(e) => {
                tracing::error!(error = %e, "Internal error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Internal error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Request-level result type.
pub type AppResult<T> = Result<T, AppError>;
