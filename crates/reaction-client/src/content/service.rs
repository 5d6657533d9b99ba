//! Content service
//!
//! Edits and deletes posts and comments. A successful edit reseeds the
//! entity's reaction state; a successful delete evicts it.

use std::sync::Arc;

use reaction_core::{ContentApi, EntityRef};
use tracing::{info, instrument};
use validator::Validate;

use crate::sync::{SyncClient, SyncError, SyncResult};
use crate::view::ReactionView;

/// Edit request, validated before it is sent
#[derive(Debug, Clone, Validate)]
pub struct EditContentRequest {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
}

impl EditContentRequest {
    /// Build a request from raw textarea input
    pub fn new(raw: &str) -> Self {
        Self {
            content: raw.trim().to_string(),
        }
    }
}

/// Content service
pub struct ContentService {
    sync: Arc<SyncClient>,
    api: Arc<dyn ContentApi>,
}

impl ContentService {
    /// Create a new ContentService
    pub fn new(sync: Arc<SyncClient>, api: Arc<dyn ContentApi>) -> Self {
        Self { sync, api }
    }

    /// Replace an entity's text, then reload its reactions
    ///
    /// Returns the refreshed view, or `None` if the entity turned out to be gone.
    #[instrument(skip_all, fields(entity = %entity))]
    pub async fn edit(&self, entity: EntityRef, raw: &str) -> SyncResult<Option<ReactionView>> {
        let request = EditContentRequest::new(raw);
        if let Err(errors) = request.validate() {
            let err = SyncError::from(errors);
            self.sync.notify(entity, &err);
            return Err(err);
        }

        let sent = self
            .sync
            .bounded(entity, self.api.edit_content(entity, &request.content))
            .await;
        if let Err(err) = sent {
            self.sync.report_failure(entity, &err).await;
            return Err(err);
        }

        info!(len = request.content.chars().count(), "Content edited");
        self.sync.reseed(entity).await
    }

    /// Delete an entity and drop its reaction state
    #[instrument(skip_all, fields(entity = %entity))]
    pub async fn delete(&self, entity: EntityRef) -> SyncResult<()> {
        let sent = self
            .sync
            .bounded(entity, self.api.delete_content(entity))
            .await;
        if let Err(err) = sent {
            self.sync.report_failure(entity, &err).await;
            return Err(err);
        }

        info!("Content deleted");
        self.sync.evict(entity);
        Ok(())
    }
}
