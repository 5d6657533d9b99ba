//! # reaction-client
//!
//! Client-side reaction synchronization: the reaction store, the sync client
//! that talks to the backend, the view renderer, and the gesture dispatcher.
//!
//! ## Architecture
//!
//! ```text
//! GestureDispatcher -> SyncClient -> ReactionApi (HTTP)
//!                          |
//!                          v
//!                    ReactionStore -> render() -> ReactionEvent subscribers
//! ```

pub mod content;
pub mod context;
pub mod dispatch;
pub mod http;
pub mod store;
pub mod sync;
pub mod view;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root
pub use content::{ContentService, EditContentRequest};
pub use context::ClientContext;
pub use dispatch::{GestureDispatcher, GestureOutcome, GestureTarget};
pub use http::HttpApi;
pub use store::ReactionStore;
pub use sync::{ReactionEvent, SyncClient, SyncError, SyncResult};
pub use view::{render, Badge, ReactionView};
