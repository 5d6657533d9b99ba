//! Backend port errors - what a reaction or content request can fail with

use thiserror::Error;

/// Result type for backend port operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single backend request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The entity no longer exists on the backend
    #[error("Resource not found")]
    NotFound,

    /// The backend rejected the request against its current state
    #[error("Conflict with server state")]
    Conflict,

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            409 => Self::Conflict,
            other => Self::UnexpectedStatus(other),
        }
    }

    /// Check if retrying the same request might succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::UnexpectedStatus(status) => *status >= 500,
            _ => false,
        }
    }
}
