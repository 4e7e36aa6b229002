//! Error types for remote post service calls.

use thiserror::Error;

use crate::blog::RejectReason;

/// Errors that can occur while talking to the post service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the server or the connection broke mid-request
    #[error("Connection to '{url}' failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured total timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Server answered with a non-success status
    #[error("Server error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Invalid client setup (bad base URL, TLS init failure)
    #[error("Client error: {0}")]
    Client(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Connection { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ApiError> for RejectReason {
    fn from(err: ApiError) -> Self {
        RejectReason::Remote {
            status: err.status(),
            message: err.to_string(),
        }
    }
}
