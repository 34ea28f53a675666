//! Assignment database operations
//!
//! Handles all database interactions for volunteer assignments.

use crate::storage::error::StorageError;
use crate::storage::models::{Assignment, Slot, SlotAssignment};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Schema applied on every open
const MIGRATION_SQL: &str = include_str!("../../migrations/001_create_assignments.sql");

/// How long a writer waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection pool for assignment operations
pub struct AssignmentDb {
    pool: SqlitePool,
    path: String,
}

impl AssignmentDb {
    /// Open (or create) the assignments database
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(AssignmentDb)` if successful
    /// * `Err(StorageError)` if the file could not be opened or migrated
    pub async fn open(db_path: &str) -> Result<Self, StorageError> {
        let file_path = db_path.strip_prefix("sqlite:").unwrap_or(db_path);

        // Ensure parent directory exists
        if let Some(parent) = PathBuf::from(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| {
                    StorageError::CreateDirectory {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        // WAL keeps committed writes crash-consistent; FULL syncs before commit returns.
        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|source| StorageError::InvalidPath {
                path: db_path.to_string(),
                source,
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StorageError::Connect)?;

        info!("Connected to SQLite database at: {}", db_path);

        let db = Self {
            pool,
            path: db_path.to_string(),
        };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), StorageError> {
        info!("Running database migrations...");

        for statement in split_statements(MIGRATION_SQL) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|source| StorageError::Migration {
                    statement: statement.chars().take(100).collect(),
                    source,
                })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get all assignments in insertion order
    pub async fn list_all(&self) -> Result<Vec<SlotAssignment>, StorageError> {
        let assignments = sqlx::query_as::<_, SlotAssignment>(
            "SELECT day, time, service, name FROM assignments ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::query("load assignments"))?;

        Ok(assignments)
    }

    /// Get the full stored row for a slot, if assigned
    pub async fn find(&self, slot: &Slot) -> Result<Option<Assignment>, StorageError> {
        let assignment = sqlx::query_as::<_, Assignment>(
            "SELECT id, day, time, service, name, created_at FROM assignments \
             WHERE day = ? AND time = ? AND service = ?",
        )
        .bind(&slot.day)
        .bind(&slot.time)
        .bind(&slot.service)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::query("load assignment"))?;

        Ok(assignment)
    }

    /// Assign `name` to a slot, replacing any previous assignee
    ///
    /// A single statement: the unique (day, time, service) constraint
    /// resolves concurrent writers to the same slot into one row, and a
    /// reassignment keeps the row's id while refreshing `created_at`.
    pub async fn upsert(&self, slot: &Slot, name: &str) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO assignments (day, time, service, name) VALUES (?, ?, ?, ?) \
             ON CONFLICT (day, time, service) DO UPDATE SET \
             name = excluded.name, created_at = datetime('now', 'localtime')",
        )
        .bind(&slot.day)
        .bind(&slot.time)
        .bind(&slot.service)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(StorageError::query("save assignment"))?;

        debug!(
            day = %slot.day,
            time = %slot.time,
            service = %slot.service,
            "Saved assignment"
        );
        Ok(())
    }

    /// Delete every assignment
    ///
    /// # Returns
    /// * Number of rows removed
    pub async fn clear_all(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM assignments")
            .execute(&self.pool)
            .await
            .map_err(StorageError::query("clear assignments"))?;

        Ok(result.rows_affected())
    }

    /// Check that the database answers queries
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StorageError::query("reach storage"))?;
        Ok(())
    }

    /// Merge the write-ahead log into the main file and close the pool
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub async fn close(&self) -> Result<(), StorageError> {
        if self.pool.is_closed() {
            return Ok(());
        }

        let checkpoint = sqlx::query_as::<_, (i64, i64, i64)>("PRAGMA wal_checkpoint(TRUNCATE)")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::query("checkpoint write-ahead log"));

        // Close even when the checkpoint failed so the handle is released.
        self.pool.close().await;

        let (busy, log_frames, checkpointed) = checkpoint?;
        if busy != 0 {
            warn!(
                log_frames,
                checkpointed, "WAL checkpoint could not complete, database was busy"
            );
        }
        info!(path = %self.path, "Database closed");
        Ok(())
    }

    /// Path the database was opened from
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Split a migration script into executable statements
///
/// Drops `--` comments (whole-line and trailing) and blank lines, then
/// splits on `;`.
fn split_statements(sql: &str) -> Vec<String> {
    let mut cleaned_sql = String::new();
    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        let without_comments = match trimmed.find("--") {
            Some(comment_pos) => &trimmed[..comment_pos],
            None => trimmed,
        };
        cleaned_sql.push_str(without_comments.trim());
        cleaned_sql.push(' ');
    }

    cleaned_sql
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
