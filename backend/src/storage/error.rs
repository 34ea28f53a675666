//! Storage-specific error types
//!
//! Errors raised while opening, migrating, or querying the assignments database.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// Parent directory of the database file could not be created
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Database path could not be turned into connection options
    #[error("Invalid database path {path}: {source}")]
    InvalidPath {
        /// Offending path
        path: String,
        /// Underlying parse error
        source: sqlx::Error,
    },

    /// Connecting to the database failed
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// A migration statement failed
    #[error("Migration failed: {source} - Statement: {statement}")]
    Migration {
        /// Prefix of the failing statement
        statement: String,
        /// Underlying database error
        source: sqlx::Error,
    },

    /// A query failed
    #[error("Failed to {operation}: {source}")]
    Query {
        /// Short description of the attempted operation
        operation: &'static str,
        /// Underlying database error
        source: sqlx::Error,
    },
}

impl StorageError {
    /// Short, client-safe description of what was being attempted
    pub fn operation(&self) -> &'static str {
        match self {
            StorageError::Query { operation, .. } => operation,
            _ => "open storage",
        }
    }

    /// Build a closure that wraps a `sqlx::Error` for the given operation
    pub(crate) fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| StorageError::Query { operation, source }
    }
}
