//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never got a usable HTTP response (connect, timeout, body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Table list request answered with a non-success status
    #[error("Host returned {status}: {message}")]
    HostStatus { status: u16, message: String },

    /// Host refused an action (stale order id, wrong stage, ...)
    #[error("Action rejected ({status}): {message}")]
    ActionRejected { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Action is not offered for that entity by the current view
    #[error("Not available: {0}")]
    NotAvailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The host could not be reached or did not answer sensibly
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HostStatus { .. } | Self::InvalidResponse(_) | Self::Serialization(_)
        )
    }

    /// The host answered and said no
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ActionRejected { .. })
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
