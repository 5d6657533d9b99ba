//! Domain errors - rejected transitions and malformed reaction data

use thiserror::Error;

use crate::entities::{EntityRef, ReactionKind};

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Entity not seeded: {0}")]
    EntityNotSeeded(EntityRef),

    // =========================================================================
    // Transition Errors
    // =========================================================================
    #[error("Reaction already exists on {0}")]
    ReactionAlreadyExists(EntityRef),

    #[error("No existing reaction on {0}")]
    NoExistingReaction(EntityRef),

    #[error("Reaction on {entity} is already {kind}")]
    SameReactionKind {
        entity: EntityRef,
        kind: ReactionKind,
    },

    // =========================================================================
    // Data Errors
    // =========================================================================
    #[error("Unknown reaction kind: {0}")]
    UnknownReactionKind(String),

    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("Count for {kind} would drop below zero")]
    CountUnderflow { kind: ReactionKind },

    #[error("Snapshot for {entity} has viewer reaction {kind} without a count")]
    InconsistentSnapshot {
        entity: EntityRef,
        kind: ReactionKind,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Get an error code string for notices and logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::EntityNotSeeded(_) => "ENTITY_NOT_SEEDED",

            Self::ReactionAlreadyExists(_) => "REACTION_ALREADY_EXISTS",
            Self::NoExistingReaction(_) => "NO_EXISTING_REACTION",
            Self::SameReactionKind { .. } => "SAME_REACTION_KIND",

            Self::UnknownReactionKind(_) => "UNKNOWN_REACTION_KIND",
            Self::UnknownEntityKind(_) => "UNKNOWN_ENTITY_KIND",
            Self::CountUnderflow { .. } => "COUNT_UNDERFLOW",
            Self::InconsistentSnapshot { .. } => "INCONSISTENT_SNAPSHOT",

            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotSeeded(_))
    }

    /// Check if the error is a state-machine transition the store refused
    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            Self::ReactionAlreadyExists(_)
                | Self::NoExistingReaction(_)
                | Self::SameReactionKind { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
