//! Reaction store - authoritative client-side reaction state per entity

mod reaction_store;

pub use reaction_store::ReactionStore;
