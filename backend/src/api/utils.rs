//! API utility functions
//!
//! Contains the request-body extractor and input validation used by the
//! assignment handlers.

use crate::error::AppError;
use crate::storage::Slot;
use axum::extract::{rejection::JsonRejection, FromRequest};
use serde::Deserialize;

/// Minimum assignee name length in characters, after trimming
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum assignee name length in characters, after trimming
pub const MAX_NAME_LENGTH: usize = 100;

/// JSON body extractor whose rejections are reported as validation errors
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Assign request body
///
/// Every field is optional at the wire level so a missing field is
/// reported as a validation failure rather than a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct AssignRequest {
    /// Day label
    pub day: Option<String>,
    /// Time label
    pub time: Option<String>,
    /// Service or role label
    pub service: Option<String>,
    /// Assignee display name
    pub name: Option<String>,
}

impl AssignRequest {
    /// Build a request with every field set
    pub fn new(day: &str, time: &str, service: &str, name: &str) -> Self {
        Self {
            day: Some(day.to_string()),
            time: Some(time.to_string()),
            service: Some(service.to_string()),
            name: Some(name.to_string()),
        }
    }
}

/// Validate an assign request
///
/// # Arguments
/// * `request` - Request body to validate
///
/// # Returns
/// * `Ok((Slot, String))` - Target slot and the trimmed name
/// * `Err(AppError::Validation)` - "missing fields" when any field is absent
///   or empty, "invalid name length" when the trimmed name is out of range
pub fn validate_assignment(request: AssignRequest) -> Result<(Slot, String), AppError> {
    let (Some(day), Some(time), Some(service), Some(name)) = (
        non_empty(request.day),
        non_empty(request.time),
        non_empty(request.service),
        non_empty(request.name),
    ) else {
        return Err(AppError::Validation("missing fields".to_string()));
    };

    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Err(AppError::Validation("invalid name length".to_string()));
    }

    Ok((Slot::new(day, time, service), trimmed.to_string()))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(result: Result<(Slot, String), AppError>) -> String {
        match result {
            Err(AppError::Validation(message)) => message,
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_valid_request_trims_name() {
        let (slot, name) =
            validate_assignment(AssignRequest::new("Monday", "09:00", "Lector", "  Ana García  "))
                .unwrap();
        assert_eq!(slot, Slot::new("Monday", "09:00", "Lector"));
        assert_eq!(name, "Ana García");
    }

    #[test]
    fn test_missing_field() {
        let request = AssignRequest {
            service: None,
            ..AssignRequest::new("Monday", "09:00", "Lector", "Ana García")
        };
        assert_eq!(validation_message(validate_assignment(request)), "missing fields");
    }

    #[test]
    fn test_empty_field() {
        let request = AssignRequest::new("", "09:00", "Lector", "Ana García");
        assert_eq!(validation_message(validate_assignment(request)), "missing fields");
    }

    #[test]
    fn test_missing_fields_checked_before_name_length() {
        let request = AssignRequest {
            day: None,
            ..AssignRequest::new("Monday", "09:00", "Lector", "A")
        };
        assert_eq!(validation_message(validate_assignment(request)), "missing fields");
    }

    #[test]
    fn test_whitespace_name_is_too_short() {
        let request = AssignRequest::new("Monday", "09:00", "Lector", "   ");
        assert_eq!(
            validation_message(validate_assignment(request)),
            "invalid name length"
        );
    }

    #[test]
    fn test_name_length_bounds() {
        let short = AssignRequest::new("Monday", "09:00", "Lector", " A ");
        assert_eq!(
            validation_message(validate_assignment(short)),
            "invalid name length"
        );

        let min = AssignRequest::new("Monday", "09:00", "Lector", "Al");
        assert!(validate_assignment(min).is_ok());

        let max = "a".repeat(MAX_NAME_LENGTH);
        assert!(validate_assignment(AssignRequest::new("Monday", "09:00", "Lector", &max)).is_ok());

        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            validation_message(validate_assignment(AssignRequest::new(
                "Monday", "09:00", "Lector", &long
            ))),
            "invalid name length"
        );
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        // 100 two-byte characters
        let name = "ñ".repeat(MAX_NAME_LENGTH);
        assert!(validate_assignment(AssignRequest::new("Monday", "09:00", "Lector", &name)).is_ok());
    }
}
