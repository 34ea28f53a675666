//! Storage module
//!
//! Durable keyed storage for volunteer assignments using a SQLite database.

pub mod db;
pub mod error;
pub mod models;

pub use db::AssignmentDb;
pub use error::StorageError;
pub use models::{Assignment, Slot, SlotAssignment};
