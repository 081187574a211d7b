//! Error types for BitCaml
//!
//! Defines one error enum covering all failure modes across the explorer.
//! Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Error type for explorer operations
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Configuration errors (missing base URL, bad overrides)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty or malformed wallet address
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The session cache was used before its store was opened
    #[error("Session cache is not initialized")]
    NotInitialized,

    /// A network deadline was exceeded; the request was cancelled
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Non-success HTTP status or transport/decode fault
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl ExplorerError {
    /// Classify a reqwest failure: deadline expiry becomes `Timeout`,
    /// everything else (connect, body, decode) is a `RequestFailed`.
    pub(crate) fn from_request(err: reqwest::Error, deadline_ms: u64) -> Self {
        if err.is_timeout() {
            ExplorerError::Timeout(deadline_ms)
        } else {
            ExplorerError::RequestFailed(err.to_string())
        }
    }

    /// A non-success HTTP response status.
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        ExplorerError::RequestFailed(format!("HTTP status {status}"))
    }
}
