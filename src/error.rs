//! Error types for World Ballets operations.
//!
//! This module defines [`BalletError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Transport, serialization and capacity failures are recovered inside the
//!   data service (fallback catalog, cache miss, dropped write) and are only
//!   ever logged
//! - `MissingIdentifier` and `NotFound` reach the command line as messages
//! - Use `anyhow::Error` (via `BalletError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for World Ballets operations.
#[derive(Debug, Error)]
pub enum BalletError {
    /// Network error or non-success status from the ballet API.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Corrupt cache record or malformed API payload.
    #[error("Could not decode {context}: {message}")]
    Serialization { context: String, message: String },

    /// The cache store has no room left for a write.
    #[error("Cache store is full, cannot write '{key}'")]
    CapacityExceeded { key: String },

    /// A required identifier was not supplied.
    #[error("{what} is required")]
    MissingIdentifier { what: String },

    /// The requested entity exists neither upstream nor in the fallback catalog.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BalletError {
    /// Shorthand for a missing identifier error.
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingIdentifier { what: what.into() }
    }

    /// Whether the error is recovered by falling back to the static catalog.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Serialization { .. } | Self::CapacityExceeded { .. }
        )
    }
}

impl From<crate::cache::StoreError> for BalletError {
    fn from(err: crate::cache::StoreError) -> Self {
        use crate::cache::StoreError;

        match err {
            StoreError::CapacityExceeded { key, .. } => Self::CapacityExceeded { key },
            StoreError::Io(e) => Self::Io(e),
            StoreError::Corrupt(message) => Self::Serialization {
                context: "cache record".to_string(),
                message,
            },
        }
    }
}

/// Result type alias for World Ballets operations.
pub type Result<T> = std::result::Result<T, BalletError>;
