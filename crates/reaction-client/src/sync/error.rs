//! Sync layer error types

use std::time::Duration;

use reaction_common::Notice;
use reaction_core::{ApiError, DomainError, EntityRef};

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Why a reaction or content operation did not go through
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The entity no longer exists on the server
    #[error("{0} no longer exists")]
    NotFound(EntityRef),

    /// The server rejected the request against its current state
    #[error("{0} changed on the server")]
    Conflict(EntityRef),

    /// Network failure, unexpected status, or malformed response
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Out-of-protocol call, rejected before reaching the network
    #[error("Invalid transition: {0}")]
    InvalidTransition(DomainError),

    #[error(transparent)]
    Domain(DomainError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl SyncError {
    /// Map a backend port failure for the given entity
    pub fn from_api(entity: EntityRef, err: ApiError) -> Self {
        match err {
            ApiError::NotFound => Self::NotFound(entity),
            ApiError::Conflict => Self::Conflict(entity),
            ApiError::UnexpectedStatus(status) => {
                Self::Transport(format!("unexpected status {status}"))
            }
            ApiError::Transport(msg) => Self::Transport(msg),
            ApiError::MalformedResponse(msg) => Self::Transport(format!("malformed response: {msg}")),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get error code for notices and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Check if the viewer may simply try the same gesture again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Check if the error is shown to the viewer
    pub fn is_viewer_visible(&self) -> bool {
        !matches!(self, Self::InvalidTransition(_))
    }

    /// Check if the entity should be reseeded from the server
    pub fn needs_reseed(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Conflict(_))
    }
}

impl From<DomainError> for SyncError {
    fn from(err: DomainError) -> Self {
        if err.is_invalid_transition() {
            Self::InvalidTransition(err)
        } else if err.is_validation() {
            Self::Validation(err.to_string())
        } else {
            Self::Domain(err)
        }
    }
}

impl From<validator::ValidationErrors> for SyncError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<&SyncError> for Notice {
    fn from(err: &SyncError) -> Self {
        Notice::new(err.error_code(), err.to_string(), err.is_retryable())
    }
}
