//! Reaction sync - turns a picked reaction into one backend request and
//! reconciles the store on success

mod client;
mod error;
mod events;

pub use client::SyncClient;
pub use error::{SyncError, SyncResult};
pub use events::ReactionEvent;
