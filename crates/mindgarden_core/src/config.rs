//! Embedder-facing core configuration.
//!
//! # Responsibility
//! - Carry startup inputs (database path, logging level and directory) as
//!   one explicit value.
//!
//! # Invariants
//! - Core modules never read configuration from global state; the embedder
//!   builds one `CoreConfig` and passes it down.
//! - `MINDGARDEN_DB_PATH` overrides the embedder-provided database path.

use crate::logging::default_log_level;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the database path.
pub const DB_PATH_ENV_VAR: &str = "MINDGARDEN_DB_PATH";

const DEFAULT_DB_FILE: &str = "mindgarden.db";

/// Startup configuration assembled by the embedding shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file path.
    pub db_path: PathBuf,
    /// Logging verbosity passed to `init_logging`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file
    /// logging.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Creates a configuration rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: data_dir.into().join(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Applies the `MINDGARDEN_DB_PATH` override when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = env::var(DB_PATH_ENV_VAR) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                self.db_path = PathBuf::from(trimmed);
            }
        }
        self
    }

    /// Sets the logging verbosity.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enables file logging into the given absolute directory.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}
