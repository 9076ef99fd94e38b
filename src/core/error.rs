//! Error types and error handling for vidsplit.
//!
//! This module defines the error types used throughout the
//! crate. CLI-specific error reporting is handled in the `cli`
//! adapter.

use thiserror::Error;

/// Result type alias for vidsplit operations
pub type Result<T> = std::result::Result<T, VidsplitError>;

/// Main error type for vidsplit
#[derive(Error, Debug)]
pub enum VidsplitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid chunk range [{from}, {to}): {message}")]
    InvalidRange { from: i64, to: i64, message: String },

    #[error("Cannot split range [{from}, {to}) after claiming index {last_claimed}")]
    SplitAfterClaim {
        from: i64,
        to: i64,
        last_claimed: i64,
    },

    #[error("Failed to read chunk {index} of '{file}': {source}")]
    ReadFailed {
        file: String,
        index: i64,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker failed: {0}")]
    WorkerFailed(String),

    #[error("Invalid annotation record: {0}")]
    InvalidRecord(String),

    #[error("Publish to topic '{topic}' failed: {message}")]
    PublishFailed { topic: String, message: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl VidsplitError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a configuration error (invalid input before any work)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            VidsplitError::ConfigError(_)
                | VidsplitError::TomlError(_)
                | VidsplitError::InvalidPath(_)
        )
    }

    /// Check if re-running the same unit of work may succeed
    ///
    /// Chunk reads are pure functions of file, offset and length,
    /// so a failed read can be re-claimed. Record and configuration
    /// errors are deterministic and will fail again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VidsplitError::ReadFailed { .. }
                | VidsplitError::PublishFailed { .. }
                | VidsplitError::IoError(_)
        )
    }
}
