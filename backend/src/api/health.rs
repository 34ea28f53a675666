//! Health check handler

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Crate version
    pub version: String,
    /// "ok" when the database answers, "unavailable" otherwise
    pub storage: String,
}

/// GET /api/health - Report process and storage health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, storage) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach storage");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: storage.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AssignmentDb;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_health_reflects_storage() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("roster.db");
        let db = AssignmentDb::open(path.to_str().unwrap()).await.unwrap();
        let state = AppState::new(Arc::new(db), None);

        let (code, Json(body)) = health_check(State(state.clone())).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.storage, "ok");

        state.db.close().await.unwrap();
        let (code, Json(body)) = health_check(State(state)).await;
        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
    }
}
