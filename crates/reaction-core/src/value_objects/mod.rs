//! Value objects - immutable types that represent domain concepts

mod entity_id;

pub use entity_id::{EntityId, EntityIdParseError};
