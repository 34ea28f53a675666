//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// All errors that can occur while serving a request are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client input was malformed or out of range
    #[error("{0}")]
    Validation(String),

    /// Admin secret did not match (or no secret is configured)
    #[error("invalid admin pin")]
    Unauthorized,

    /// No route matched the request
    #[error("not found: {0}")]
    NotFound(String),

    /// Error reported by the storage layer
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client
    ///
    /// Server-side failures are reduced to a generic description; the
    /// detail only goes to the log.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Storage(e) => format!("failed to {}", e.operation()),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": "error",
            "message": self.client_message(),
        }));

        (status, body).into_response()
    }
}
