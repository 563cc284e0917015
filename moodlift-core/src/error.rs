//! Structured error types for moodlift-core.
//!
//! Uses `thiserror` for composable library errors. The binary crate wraps
//! these in `anyhow` for convenience; the server crate maps them at the HTTP
//! boundary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for moodlift-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Invalid config file {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// Required configuration value missing
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// A string failed to parse as a domain value
    #[error("Invalid {field} value: '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

/// Result type alias for moodlift-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an invalid-value error
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
