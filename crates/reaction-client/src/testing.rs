//! In-memory backend used by the unit tests

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reaction_core::{
    ApiError, ApiResult, ContentApi, EntityRef, ReactionApi, ReactionCounts, ReactionKind,
    ReactionSnapshot,
};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(EntityRef, ReactionKind),
    Update(EntityRef, ReactionKind),
    Fetch(EntityRef),
    Edit(EntityRef, String),
    Delete(EntityRef),
}

/// Scripted backend: every request is recorded, then answered from the
/// configured results. Mutating reaction calls wait on `hold` when set.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    mutation_result: Mutex<Option<ApiError>>,
    content_result: Mutex<Option<ApiError>>,
    snapshot: Mutex<Option<ApiResult<ReactionSnapshot>>>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn mutation_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Create(..) | Call::Update(..)))
            .count()
    }

    pub fn fail_mutations_with(&self, err: ApiError) {
        *self.mutation_result.lock() = Some(err);
    }

    pub fn fail_content_with(&self, err: ApiError) {
        *self.content_result.lock() = Some(err);
    }

    pub fn serve_snapshot(&self, result: ApiResult<ReactionSnapshot>) {
        *self.snapshot.lock() = Some(result);
    }

    /// Make create/update wait until the returned handle is notified
    pub fn hold_mutations(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.hold.lock() = Some(gate.clone());
        gate
    }

    pub fn release_hold(&self) {
        *self.hold.lock() = None;
    }

    async fn mutate(&self, call: Call) -> ApiResult<()> {
        self.calls.lock().push(call);
        let gate = self.hold.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.mutation_result.lock().clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ReactionApi for FakeApi {
    async fn create_reaction(&self, entity: EntityRef, kind: ReactionKind) -> ApiResult<()> {
        self.mutate(Call::Create(entity, kind)).await
    }

    async fn update_reaction(&self, entity: EntityRef, kind: ReactionKind) -> ApiResult<()> {
        self.mutate(Call::Update(entity, kind)).await
    }

    async fn fetch_snapshot(&self, entity: EntityRef) -> ApiResult<ReactionSnapshot> {
        self.calls.lock().push(Call::Fetch(entity));
        self.snapshot
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(ReactionSnapshot::default()))
    }
}

#[async_trait]
impl ContentApi for FakeApi {
    async fn edit_content(&self, entity: EntityRef, content: &str) -> ApiResult<()> {
        self.calls.lock().push(Call::Edit(entity, content.to_string()));
        self.content_result.lock().clone().map_or(Ok(()), Err)
    }

    async fn delete_content(&self, entity: EntityRef) -> ApiResult<()> {
        self.calls.lock().push(Call::Delete(entity));
        self.content_result.lock().clone().map_or(Ok(()), Err)
    }
}

pub fn snapshot(viewer: Option<ReactionKind>, pairs: &[(ReactionKind, u32)]) -> ReactionSnapshot {
    let counts: ReactionCounts = pairs.iter().copied().collect();
    ReactionSnapshot::new(viewer, counts)
}
