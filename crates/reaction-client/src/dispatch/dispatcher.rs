//! Per-container gesture dispatcher
//!
//! One dispatcher serves every entity of a container. In-flight submits are
//! tracked by the shared sync client, so a gesture on an entity that is
//! already in flight is dropped no matter which container it came from.

use std::sync::Arc;

use reaction_core::EntityRef;
use tracing::{debug, instrument};

use super::gesture::GestureTarget;
use crate::sync::{SyncClient, SyncResult};
use crate::view::ReactionView;

/// Result of a gesture that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The click did not land on a reaction choice
    Ignored,
    /// The picked kind is already the viewer's reaction
    Suppressed,
    /// A submit for this entity is still in flight; the gesture was dropped
    Busy,
    /// The backend confirmed the pick
    Applied(ReactionView),
}

/// Routes reaction gestures of one container to the sync client
pub struct GestureDispatcher {
    sync: Arc<SyncClient>,
}

impl GestureDispatcher {
    /// Create a new GestureDispatcher
    pub fn new(sync: Arc<SyncClient>) -> Self {
        Self { sync }
    }

    /// Check if a submit for the entity is outstanding
    pub fn is_in_flight(&self, entity: EntityRef) -> bool {
        self.sync.is_in_flight(entity)
    }

    /// Handle a click on the reaction control of an entity
    #[instrument(skip(self))]
    pub async fn dispatch(
        &self,
        entity: EntityRef,
        target: GestureTarget,
    ) -> SyncResult<GestureOutcome> {
        let Some(kind) = target.kind() else {
            return Ok(GestureOutcome::Ignored);
        };

        let state = self.sync.store().get(entity)?;
        if state.viewer_reaction() == Some(kind) {
            debug!(kind = %kind, "Pick matches current reaction");
            return Ok(GestureOutcome::Suppressed);
        }

        let Some(_slot) = self.sync.claim(entity) else {
            debug!("Submit already in flight, dropping gesture");
            return Ok(GestureOutcome::Busy);
        };

        self.sync
            .submit(entity, kind)
            .await
            .map(GestureOutcome::Applied)
    }
}
