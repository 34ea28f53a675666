// Application state shared by all request handlers
// Holds the storage handle and the admin secret

use crate::config::Config;
use crate::storage::AssignmentDb;
use std::sync::Arc;

/// State handed to every handler
///
/// Cloning is cheap: the storage handle and the secret are shared.
#[derive(Clone)]
pub struct AppState {
    /// Assignment storage, opened once for the process lifetime
    pub db: Arc<AssignmentDb>,
    /// Admin secret for the clear operation, if configured
    admin_pin: Option<Arc<str>>,
}

impl AppState {
    /// Create a new application state around an opened database
    pub fn new(db: Arc<AssignmentDb>, admin_pin: Option<String>) -> Self {
        Self {
            db,
            admin_pin: admin_pin.filter(|pin| !pin.is_empty()).map(Arc::from),
        }
    }

    /// Create application state from loaded configuration
    pub fn from_config(db: Arc<AssignmentDb>, config: &Config) -> Self {
        Self::new(db, config.admin.pin.clone())
    }

    /// Whether an admin secret is configured at all
    pub fn admin_enabled(&self) -> bool {
        self.admin_pin.is_some()
    }

    /// Check a submitted PIN against the configured admin secret
    ///
    /// Always false when no secret is configured.
    pub fn authorize_admin(&self, pin: &str) -> bool {
        match &self.admin_pin {
            Some(expected) => constant_time_eq(expected.as_bytes(), pin.as_bytes()),
            None => false,
        }
    }
}

/// Compare two byte strings without exiting early on the first mismatch
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
