//! Core error types for mindwell-core.
//!
//! The timer engine itself never fails: invalid transitions are absorbed as
//! no-ops. Errors here belong to catalog lookup and storage.

use thiserror::Error;

/// Core error type for mindwell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No descriptor in the catalog for the requested session id.
    #[error("unknown session '{0}'")]
    UnknownSession(String),

    /// Storage errors
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored timestamp could not be parsed
    #[error("timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
