//! Reaction sync client
//!
//! Owns the create-or-update protocol: the store's current phase decides
//! which request is sent, and the store is only touched after the backend
//! confirms it.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reaction_common::{Notice, SyncConfig};
use reaction_core::{
    ApiError, ApiResult, DomainError, EntityRef, ReactionApi, ReactionKind, ReactionPhase,
    ReactionSnapshot, ReactionState,
};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, trace, warn};

use super::error::{SyncError, SyncResult};
use super::events::ReactionEvent;
use crate::store::ReactionStore;
use crate::view::{render, ReactionView};

/// Sync client shared by every dispatcher of a page
#[derive(Clone)]
pub struct SyncClient {
    store: Arc<ReactionStore>,
    api: Arc<dyn ReactionApi>,
    events: broadcast::Sender<ReactionEvent>,
    in_flight: Arc<Mutex<HashSet<EntityRef>>>,
    request_timeout: Duration,
}

impl SyncClient {
    /// Create a new SyncClient
    pub fn new(store: Arc<ReactionStore>, api: Arc<dyn ReactionApi>, config: &SyncConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        Self {
            store,
            api,
            events,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            request_timeout: config.request_timeout,
        }
    }

    /// Read access to the store
    pub fn store(&self) -> &ReactionStore {
        &self.store
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<ReactionEvent> {
        self.events.subscribe()
    }

    /// Check if a gesture-driven submit for the entity is outstanding
    pub fn is_in_flight(&self, entity: EntityRef) -> bool {
        self.in_flight.lock().contains(&entity)
    }

    /// Mark the entity as in flight; `None` if it already is
    pub(crate) fn claim(&self, entity: EntityRef) -> Option<InFlightSlot<'_>> {
        let claimed = self.in_flight.lock().insert(entity);
        claimed.then(|| InFlightSlot {
            set: &self.in_flight,
            entity,
        })
    }

    /// Render the current state of an entity
    pub fn view(&self, entity: EntityRef) -> SyncResult<ReactionView> {
        Ok(render(&self.store.get(entity)?))
    }

    /// Install a server snapshot for an entity and publish its view
    pub fn seed(&self, entity: EntityRef, snapshot: ReactionSnapshot) -> SyncResult<ReactionView> {
        let state = ReactionState::from_snapshot(entity, snapshot)?;
        debug!(entity = %entity, viewer_reaction = ?state.viewer_reaction(), "Seeding reaction state");
        Ok(self.commit(state))
    }

    /// Replace the entity's state with a fresh server snapshot
    ///
    /// Returns `None` when the server no longer knows the entity, in which
    /// case it is evicted.
    #[instrument(skip_all, fields(entity = %entity))]
    pub async fn reseed(&self, entity: EntityRef) -> SyncResult<Option<ReactionView>> {
        match self.bounded(entity, self.api.fetch_snapshot(entity)).await {
            Ok(snapshot) => self.seed(entity, snapshot).map(Some),
            Err(SyncError::NotFound(_)) => {
                self.evict(entity);
                Ok(None)
            }
            Err(err) => {
                warn!(error = %err, "Reseed failed");
                Err(err)
            }
        }
    }

    /// Send the viewer's pick and reconcile the store once it is confirmed
    ///
    /// An unreacted entity gets a create, a reacted one an update. Picking the
    /// kind already held is rejected without a request.
    #[instrument(skip_all, fields(entity = %entity, kind = %kind))]
    pub async fn submit(&self, entity: EntityRef, kind: ReactionKind) -> SyncResult<ReactionView> {
        let phase = self.store.get(entity)?.phase();

        let sent = match phase {
            ReactionPhase::Unreacted => {
                debug!("Creating reaction");
                self.bounded(entity, self.api.create_reaction(entity, kind))
                    .await
            }
            ReactionPhase::Reacted(current) if current == kind => {
                return Err(DomainError::SameReactionKind { entity, kind }.into());
            }
            ReactionPhase::Reacted(current) => {
                debug!(from = %current, "Updating reaction");
                self.bounded(entity, self.api.update_reaction(entity, kind))
                    .await
            }
        };

        if let Err(err) = sent {
            self.report_failure(entity, &err).await;
            return Err(err);
        }

        let applied = match phase {
            ReactionPhase::Unreacted => self.store.apply_first_reaction(entity, kind),
            ReactionPhase::Reacted(_) => self.store.apply_reaction_change(entity, kind),
        };

        match applied {
            Ok(state) => {
                info!(
                    viewer_reaction = %kind,
                    total = state.counts().total(),
                    "Reaction applied"
                );
                Ok(self.publish_view(&state))
            }
            Err(err) => {
                // Local state moved while the request was out
                warn!(error = %err, "Confirmed reaction no longer applies locally");
                if err.is_not_found() {
                    return Err(err.into());
                }
                match self.reseed(entity).await {
                    Ok(Some(view)) if view.icon_for_viewer == Some(kind) => {
                        info!(viewer_reaction = %kind, "Reaction confirmed by server snapshot");
                        Ok(view)
                    }
                    Ok(_) => Err(err.into()),
                    Err(reseed_err) => {
                        warn!(error = %reseed_err, "Reseed after reconciliation failure failed");
                        Err(err.into())
                    }
                }
            }
        }
    }

    /// Drop an entity and tell subscribers it is gone
    pub(crate) fn evict(&self, entity: EntityRef) -> bool {
        let removed = self.store.evict(entity);
        info!(entity = %entity, removed, "Reaction state evicted");
        self.publish(ReactionEvent::Evicted { entity });
        removed
    }

    /// Publish a notice for a failure the viewer should see
    pub(crate) fn notify(&self, entity: EntityRef, err: &SyncError) {
        if err.is_viewer_visible() {
            self.publish(ReactionEvent::Notice {
                entity,
                notice: Notice::from(err),
            });
        }
    }

    pub(crate) async fn report_failure(&self, entity: EntityRef, err: &SyncError) {
        warn!(error = %err, code = err.error_code(), "Request failed");
        self.notify(entity, err);

        if err.needs_reseed() {
            if let Err(reseed_err) = self.reseed(entity).await {
                warn!(error = %reseed_err, "Reseed after failed request failed");
            }
        }
    }

    fn commit(&self, state: ReactionState) -> ReactionView {
        self.store.seed(state.clone());
        self.publish_view(&state)
    }

    fn publish_view(&self, state: &ReactionState) -> ReactionView {
        let view = render(state);
        self.publish(ReactionEvent::Rendered {
            entity: state.entity(),
            view: view.clone(),
        });
        view
    }

    fn publish(&self, event: ReactionEvent) {
        let event_type = event.event_type();
        if self.events.send(event).is_err() {
            trace!(event_type, "No reaction event subscribers");
        }
    }

    /// Run a backend call under the request timeout
    pub(crate) async fn bounded<T, F>(&self, entity: EntityRef, call: F) -> SyncResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(|err: ApiError| SyncError::from_api(entity, err)),
            Err(_) => Err(SyncError::Timeout(self.request_timeout)),
        }
    }
}

/// Holds an entity's in-flight mark until dropped
pub(crate) struct InFlightSlot<'a> {
    set: &'a Mutex<HashSet<EntityRef>>,
    entity: EntityRef,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.entity);
    }
}
