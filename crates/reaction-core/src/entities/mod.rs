//! Domain entities - reaction state and the posts/comments it attaches to

mod entity;
mod reaction;

pub use entity::{EntityKind, EntityRef};
pub use reaction::{ReactionCounts, ReactionKind, ReactionPhase, ReactionSnapshot, ReactionState};
