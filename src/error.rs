//! Error types for updatewatch operations.
//!
//! This module defines [`UpdateWatchError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A failing check is never an error: it is recorded in its
//!   [`CheckResult`](crate::normalize::CheckResult)
//! - Use `UpdateWatchError` for configuration problems the user must fix
//! - Use `anyhow::Error` (via `UpdateWatchError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for updatewatch operations.
#[derive(Debug, Error)]
pub enum UpdateWatchError {
    /// Check definitions file not found at expected location.
    #[error("Check definitions not found: {path}")]
    ChecksNotFound { path: PathBuf },

    /// Failed to parse the check definitions file.
    #[error("Failed to parse checks at {path}: {message}")]
    ChecksParseError { path: PathBuf, message: String },

    /// A check definition is structurally valid YAML but unusable.
    #[error("Invalid check #{index}: {message}")]
    InvalidCheck { index: usize, message: String },

    /// Timeout string could not be parsed.
    #[error("Invalid timeout: {value:?}")]
    InvalidTimeout { value: String },

    /// Check definitions contain a value that cannot be fingerprinted.
    #[error("Cannot fingerprint check definitions: {message}")]
    UnhashableInput { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for updatewatch operations.
pub type Result<T> = std::result::Result<T, UpdateWatchError>;
