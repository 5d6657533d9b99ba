//! Reaction entities - emoji kinds, aggregate counts, and per-entity reaction state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::EntityRef;
use crate::error::{DomainError, DomainResult};

/// Closed set of emoji reactions a viewer can pick
///
/// Declaration order is the display priority used to break ties between
/// badges with equal counts (`Like` first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
    Smile,
    Heart,
    Thanks,
}

impl ReactionKind {
    /// Every kind, in priority order
    pub const ALL: [Self; 5] = [
        Self::Like,
        Self::Dislike,
        Self::Smile,
        Self::Heart,
        Self::Thanks,
    ];

    /// Kind picked by the quick-react button
    pub const PRIMARY: Self = Self::Like;

    /// Wire name (the backend's `emojiType`)
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Smile => "smile",
            Self::Heart => "heart",
            Self::Thanks => "thanks",
        }
    }

    /// Tie-break rank, lower sorts first
    #[inline]
    pub const fn priority(self) -> u8 {
        self as u8
    }

    /// Emoji glyph class shown on badges and on the viewer's button
    pub const fn glyph_class(self) -> &'static str {
        match self {
            Self::Like => "em---1",
            Self::Dislike => "em--1",
            Self::Smile => "em-smile",
            Self::Heart => "em-heart",
            Self::Thanks => "em-bouquet",
        }
    }

    /// Accessible label for the glyph
    pub const fn label(self) -> &'static str {
        match self {
            Self::Like => "THUMBS UP SIGN",
            Self::Dislike => "THUMBS DOWN SIGN",
            Self::Smile => "SMILING FACE WITH OPEN MOUTH AND SMILING EYES",
            Self::Heart => "HEAVY BLACK HEART",
            Self::Thanks => "BOUQUET",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownReactionKind(s.to_string()))
    }
}

/// Number of distinct viewers per reaction kind
///
/// Only positive counts are stored: a kind that drops to zero is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct ReactionCounts(BTreeMap<ReactionKind, u32>);

impl ReactionCounts {
    /// Empty counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a kind, zero when absent
    #[inline]
    pub fn get(&self, kind: ReactionKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Check if any viewer picked this kind
    #[inline]
    pub fn contains(&self, kind: ReactionKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// Add one viewer to a kind, saturating at `u32::MAX`
    pub fn increment(&mut self, kind: ReactionKind) {
        let count = self.0.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Decrement a kind, removing the entry when it reaches zero
    pub fn decrement(&mut self, kind: ReactionKind) -> DomainResult<()> {
        match self.0.get_mut(&kind) {
            Some(count) if *count > 1 => {
                *count -= 1;
                Ok(())
            }
            Some(_) => {
                self.0.remove(&kind);
                Ok(())
            }
            None => Err(DomainError::CountUnderflow { kind }),
        }
    }

    /// Sum of all counts, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.0
            .values()
            .fold(0u32, |total, count| total.saturating_add(*count))
    }

    /// Number of kinds with a positive count
    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(kind, count)` pairs in priority order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, u32)> + '_ {
        self.0.iter().map(|(kind, count)| (*kind, *count))
    }
}

impl FromIterator<(ReactionKind, u32)> for ReactionCounts {
    fn from_iter<I: IntoIterator<Item = (ReactionKind, u32)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (kind, count) in iter {
            let total = counts.entry(kind).or_insert(0u32);
            *total = total.saturating_add(count);
        }
        counts.retain(|_, count| *count > 0);
        Self(counts)
    }
}

impl TryFrom<BTreeMap<String, u32>> for ReactionCounts {
    type Error = DomainError;

    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(name, count)| Ok((name.parse::<ReactionKind>()?, count)))
            .collect::<DomainResult<Vec<_>>>()
            .map(|pairs| pairs.into_iter().collect())
    }
}

impl From<ReactionCounts> for BTreeMap<String, u32> {
    fn from(counts: ReactionCounts) -> Self {
        counts
            .0
            .into_iter()
            .map(|(kind, count)| (kind.as_str().to_string(), count))
            .collect()
    }
}

/// Explicit create-or-update state of the viewer's own reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionPhase {
    /// Viewer has not reacted; the next pick is a create
    Unreacted,
    /// Viewer picked this kind; a different pick is an update
    Reacted(ReactionKind),
}

/// Server-provided reaction data used to seed or reseed an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSnapshot {
    pub viewer_reaction: Option<ReactionKind>,
    #[serde(default)]
    pub counts: ReactionCounts,
}

impl ReactionSnapshot {
    pub fn new(viewer_reaction: Option<ReactionKind>, counts: ReactionCounts) -> Self {
        Self {
            viewer_reaction,
            counts,
        }
    }
}

/// Reaction state of one post or comment as seen by the current viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionState {
    entity: EntityRef,
    viewer_reaction: Option<ReactionKind>,
    counts: ReactionCounts,
    synced_at: DateTime<Utc>,
}

impl ReactionState {
    /// Build a state from a server snapshot
    ///
    /// Fails if the snapshot claims a viewer reaction whose kind has no count.
    pub fn from_snapshot(entity: EntityRef, snapshot: ReactionSnapshot) -> DomainResult<Self> {
        if let Some(kind) = snapshot.viewer_reaction {
            if !snapshot.counts.contains(kind) {
                return Err(DomainError::InconsistentSnapshot { entity, kind });
            }
        }

        Ok(Self {
            entity,
            viewer_reaction: snapshot.viewer_reaction,
            counts: snapshot.counts,
            synced_at: Utc::now(),
        })
    }

    #[inline]
    pub fn entity(&self) -> EntityRef {
        self.entity
    }

    #[inline]
    pub fn viewer_reaction(&self) -> Option<ReactionKind> {
        self.viewer_reaction
    }

    #[inline]
    pub fn counts(&self) -> &ReactionCounts {
        &self.counts
    }

    /// When the state was last confirmed by the server
    #[inline]
    pub fn synced_at(&self) -> DateTime<Utc> {
        self.synced_at
    }

    /// Current position in the create-or-update state machine
    pub fn phase(&self) -> ReactionPhase {
        self.viewer_reaction
            .map_or(ReactionPhase::Unreacted, ReactionPhase::Reacted)
    }

    /// Record the viewer's first reaction after a confirmed create
    pub fn apply_first_reaction(&mut self, kind: ReactionKind) -> DomainResult<()> {
        if self.viewer_reaction.is_some() {
            return Err(DomainError::ReactionAlreadyExists(self.entity));
        }

        self.counts.increment(kind);
        self.viewer_reaction = Some(kind);
        self.synced_at = Utc::now();
        Ok(())
    }

    /// Move the viewer's reaction to another kind after a confirmed update
    ///
    /// All-or-nothing: on error the state is left as it was.
    pub fn apply_reaction_change(&mut self, new_kind: ReactionKind) -> DomainResult<()> {
        let old_kind = self
            .viewer_reaction
            .ok_or(DomainError::NoExistingReaction(self.entity))?;

        if old_kind == new_kind {
            return Err(DomainError::SameReactionKind {
                entity: self.entity,
                kind: new_kind,
            });
        }

        let mut counts = self.counts.clone();
        counts.decrement(old_kind)?;
        counts.increment(new_kind);

        self.counts = counts;
        self.viewer_reaction = Some(new_kind);
        self.synced_at = Utc::now();
        Ok(())
    }
}
