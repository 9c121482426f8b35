//! Core error types for studylog-core.
//!
//! All store-boundary failures are terminal: they are converted into a
//! user-facing notice (or a diagnostic warning) at the operation that
//! issued them and never re-raised to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studylog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No active identity for an owner-scoped read or write.
    #[error("not authenticated: no active identity")]
    Unauthenticated,

    /// A remote backend call failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Configuration-related errors.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Remote-backend-specific errors.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend answered with a non-success status.
    #[error("{operation} failed: HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    /// The request never completed (connect, timeout, TLS...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a body we could not interpret.
    #[error("unexpected response for {operation}: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
