use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from repository operations (used by trait definitions in voxbot-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from chat record operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Malformed append request (missing text, sender, or user id).
    #[error("validation error: {0}")]
    Validation(String),

    /// The record store was unreachable or rejected the operation.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Errors from the AI relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Empty or missing input text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Credential or endpoint configuration is missing. Raised before any
    /// network call is made.
    #[error("relay not configured: {0}")]
    Configuration(String),

    /// Transport failure, timeout, or non-success upstream status.
    #[error("upstream error{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

/// Errors seen by a client session talking to the chat server.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server answered with a non-success status and an error body.
    #[error("{message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },

    /// The request never completed (connection refused, timeout, ...).
    #[error("connection failed: {0}")]
    Transport(String),

    /// The server answered but the body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The capture device failed.
    #[error("capture failed: {0}")]
    Capture(String),
}

/// JSON error body returned by every failing HTTP endpoint.
///
/// ```json
/// { "error": "text is required", "code": "VALIDATION_ERROR" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
