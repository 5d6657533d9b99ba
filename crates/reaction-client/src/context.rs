//! Client context - dependency container for one page
//!
//! Wires the store, the sync client, and the content service to a backend
//! and hands out one gesture dispatcher per reaction container.

use std::sync::Arc;

use reaction_common::ClientConfig;
use reaction_core::{ApiResult, ContentApi, ReactionApi};
use tracing::info;

use crate::content::ContentService;
use crate::dispatch::GestureDispatcher;
use crate::http::HttpApi;
use crate::store::ReactionStore;
use crate::sync::SyncClient;

/// Everything a page needs to display and change reactions
#[derive(Clone)]
pub struct ClientContext {
    sync: Arc<SyncClient>,
    content: Arc<ContentService>,
}

impl ClientContext {
    /// Connect to the backend named in the config over HTTP
    pub fn connect(config: &ClientConfig, cookies: &str) -> ApiResult<Self> {
        let api = Arc::new(HttpApi::new(config, cookies)?);
        info!(
            app = %config.app.name,
            base_url = %config.server.base_url,
            "Reaction client connected"
        );
        Ok(Self::with_apis(config, api.clone(), api))
    }

    /// Build a context over arbitrary port implementations
    pub fn with_apis(
        config: &ClientConfig,
        reactions: Arc<dyn ReactionApi>,
        content: Arc<dyn ContentApi>,
    ) -> Self {
        let store = Arc::new(ReactionStore::new());
        let sync = Arc::new(SyncClient::new(store, reactions, &config.sync));
        let content = Arc::new(ContentService::new(sync.clone(), content));
        Self { sync, content }
    }

    /// Get the sync client
    pub fn sync(&self) -> &Arc<SyncClient> {
        &self.sync
    }

    /// Get the content service
    pub fn content(&self) -> &ContentService {
        &self.content
    }

    /// Create a dispatcher for one reaction container
    pub fn dispatcher(&self) -> GestureDispatcher {
        GestureDispatcher::new(self.sync.clone())
    }
}
