//! Assignment data models
//!
//! Defines the slot key, the list projection, and the full stored row.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A slot: the (day, time, service) position a volunteer is assigned to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Day label (free-form)
    pub day: String,
    /// Time label (free-form)
    pub time: String,
    /// Service or role label
    pub service: String,
}

impl Slot {
    /// Create a new slot
    pub fn new(
        day: impl Into<String>,
        time: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
            service: service.into(),
        }
    }
}

/// Public projection of an assignment, as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SlotAssignment {
    /// Day label
    pub day: String,
    /// Time label
    pub time: String,
    /// Service or role label
    pub service: String,
    /// Assigned person's display name
    pub name: String,
}

impl SlotAssignment {
    /// The slot this assignment occupies
    pub fn slot(&self) -> Slot {
        Slot::new(&self.day, &self.time, &self.service)
    }
}

/// A stored assignment row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    /// Surrogate identifier assigned by storage, never reused
    pub id: i64,
    /// Day label
    pub day: String,
    /// Time label
    pub time: String,
    /// Service or role label
    pub service: String,
    /// Assigned person's display name
    pub name: String,
    /// Local time of the last write (creation or reassignment)
    pub created_at: NaiveDateTime,
}
