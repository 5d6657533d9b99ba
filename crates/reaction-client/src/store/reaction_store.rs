//! In-memory reaction state, partitioned by entity
//!
//! Readers get owned snapshots. Mutations are crate-private so only the sync
//! client reconciles state, and each one runs under the entity's shard lock.

use dashmap::DashMap;
use reaction_core::{DomainError, DomainResult, EntityRef, ReactionKind, ReactionState};

/// Map of entity to its current reaction state
#[derive(Debug, Default)]
pub struct ReactionStore {
    states: DashMap<EntityRef, ReactionState>,
}

impl ReactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the state of an entity
    pub(crate) fn seed(&self, state: ReactionState) {
        self.states.insert(state.entity(), state);
    }

    /// Current state of an entity
    pub fn get(&self, entity: EntityRef) -> DomainResult<ReactionState> {
        self.states
            .get(&entity)
            .map(|state| state.value().clone())
            .ok_or(DomainError::EntityNotSeeded(entity))
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        self.states.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Record a confirmed create
    pub(crate) fn apply_first_reaction(
        &self,
        entity: EntityRef,
        kind: ReactionKind,
    ) -> DomainResult<ReactionState> {
        self.mutate(entity, |state| state.apply_first_reaction(kind))
    }

    /// Record a confirmed update
    pub(crate) fn apply_reaction_change(
        &self,
        entity: EntityRef,
        new_kind: ReactionKind,
    ) -> DomainResult<ReactionState> {
        self.mutate(entity, |state| state.apply_reaction_change(new_kind))
    }

    /// Drop an entity; returns whether it was present
    pub(crate) fn evict(&self, entity: EntityRef) -> bool {
        self.states.remove(&entity).is_some()
    }

    fn mutate<F>(&self, entity: EntityRef, f: F) -> DomainResult<ReactionState>
    where
        F: FnOnce(&mut ReactionState) -> DomainResult<()>,
    {
        let mut state = self
            .states
            .get_mut(&entity)
            .ok_or(DomainError::EntityNotSeeded(entity))?;
        f(state.value_mut())?;
        Ok(state.value().clone())
    }
}
