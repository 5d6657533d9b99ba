//! Backend API traits (ports)
//!
//! The client core depends only on these traits; the HTTP adapter and test
//! fakes provide the implementations.

use async_trait::async_trait;

use crate::entities::{EntityRef, ReactionKind, ReactionSnapshot};
use crate::error::ApiResult;

// ============================================================================
// Reaction API
// ============================================================================

#[async_trait]
pub trait ReactionApi: Send + Sync {
    /// Create the viewer's first reaction on an entity
    async fn create_reaction(&self, entity: EntityRef, kind: ReactionKind) -> ApiResult<()>;

    /// Change the viewer's existing reaction to another kind
    async fn update_reaction(&self, entity: EntityRef, kind: ReactionKind) -> ApiResult<()>;

    /// Fetch the authoritative reaction data for an entity
    async fn fetch_snapshot(&self, entity: EntityRef) -> ApiResult<ReactionSnapshot>;
}

// ============================================================================
// Content API
// ============================================================================

#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Replace the text of a post or comment
    async fn edit_content(&self, entity: EntityRef, content: &str) -> ApiResult<()>;

    /// Delete a post or comment
    async fn delete_content(&self, entity: EntityRef) -> ApiResult<()>;
}
