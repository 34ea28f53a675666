//! API module
//!
//! Contains HTTP request handlers for the assignment endpoints

pub mod assignments;
pub mod health;
pub mod utils;

use crate::error::AppError;
use axum::extract::OriginalUri;

/// Fallback for unmatched `/api/*` paths
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
