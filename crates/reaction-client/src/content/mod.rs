//! Content collaborator - post/comment edit and delete, coupled to reaction
//! state only through reseed and eviction

mod service;

pub use service::{ContentService, EditContentRequest};
