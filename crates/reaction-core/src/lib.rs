//! # reaction-core
//!
//! Domain layer containing reaction entities, value objects, errors, and the
//! backend ports. This crate has no dependencies on transport or runtime.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    EntityKind, EntityRef, ReactionCounts, ReactionKind, ReactionPhase, ReactionSnapshot,
    ReactionState,
};
pub use error::{ApiError, ApiResult, DomainError, DomainResult};
pub use traits::{ContentApi, ReactionApi};
pub use value_objects::{EntityId, EntityIdParseError};
