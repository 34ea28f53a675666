//! Assignment API handlers
//!
//! Contains HTTP request handlers for listing, assigning, and clearing
//! volunteer assignments.

use crate::api::utils::{validate_assignment, ApiJson, AssignRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::storage::SlotAssignment;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Acknowledgement returned by write operations
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// Always "ok" on success
    pub status: String,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Clear request body
///
/// `pin` is kept as raw JSON: a number, `null`, or any other non-string
/// value is a wrong PIN, not a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct ClearRequest {
    /// Admin secret
    pub pin: Option<Value>,
}

impl ClearRequest {
    /// Build a request carrying a string PIN
    pub fn with_pin(pin: &str) -> Self {
        Self {
            pin: Some(Value::String(pin.to_string())),
        }
    }
}

/// GET /api/assignments - List all assignments
pub async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<SlotAssignment>>, AppError> {
    let assignments = state.db.list_all().await?;
    Ok(Json(assignments))
}

/// POST /api/assign - Assign a volunteer to a slot, replacing any previous assignee
pub async fn assign(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AssignRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let (slot, name) = validate_assignment(request)?;

    state.db.upsert(&slot, &name).await?;

    info!(
        day = %slot.day,
        time = %slot.time,
        service = %slot.service,
        "Assignment saved"
    );
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/clear - Delete every assignment (requires the admin PIN)
pub async fn clear(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ClearRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let pin = request.pin.as_ref().and_then(Value::as_str).unwrap_or_default();
    if !state.authorize_admin(pin) {
        if state.admin_enabled() {
            warn!("Rejected clear request with wrong admin PIN");
        } else {
            warn!("Rejected clear request: ADMIN_PIN is not configured");
        }
        return Err(AppError::Unauthorized);
    }

    let removed = state.db.clear_all().await?;

    info!(removed, "Cleared all assignments");
    Ok(Json(StatusResponse::ok()))
}
