//! Error types for the library client

use thiserror::Error;

/// Message used when the backend fails without saying why
pub const GENERIC_FAILURE: &str = "Request failed";

/// Main client error type
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend answered with a non-2xx status
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status for backend failures, `None` for everything else
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure was reported by the backend itself
    pub fn is_request_failed(&self) -> bool {
        matches!(self, ClientError::RequestFailed { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
