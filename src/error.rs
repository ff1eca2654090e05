// src/error.rs

//! Crate-wide error and result types.

use thiserror::Error;

/// The main error type for dpm operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Attempt to register a system-critical package as removable.
    ///
    /// Raised at add time so the removable set can never contain a
    /// critical name.
    #[error("policy violation for '{package}': {reason}")]
    PolicyViolation { package: String, reason: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("package not found: {0}")]
    NotFoundError(String),

    #[error("command failed: {0}")]
    CommandFailed(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A type alias for results using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;
