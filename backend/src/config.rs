//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Admin configuration
    pub admin: AdminConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
    /// Directory holding the client application's static assets
    pub static_dir: PathBuf,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub db_path: String,
}

/// Admin configuration
#[derive(Clone)]
pub struct AdminConfig {
    /// Shared secret required to clear all assignments.
    /// `None` disables the clear operation entirely.
    pub pin: Option<String>,
}

// Keep the secret out of startup logs.
impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("pin", &self.pin.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Default database file location, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "roster.db";

/// Default static asset directory: the client bundled with this crate,
/// independent of the working directory the server is started from
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Arguments
    /// * `lookup` - Returns the value for a variable name, if set
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server: ServerConfig {
                port: lookup("PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_PORT),
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                static_dir: lookup("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            },
            storage: StorageConfig {
                db_path: lookup("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            },
            admin: AdminConfig {
                pin: lookup("ADMIN_PIN").filter(|pin| !pin.is_empty()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
