//! Pure projection from `ReactionState` to the data a reaction bar displays

use std::cmp::Reverse;

use reaction_core::{ReactionKind, ReactionState};
use serde::Serialize;

/// One `(kind, count)` pair in the aggregate reaction display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub kind: ReactionKind,
    pub count: u32,
    pub glyph_class: &'static str,
    pub label: &'static str,
}

impl Badge {
    fn new(kind: ReactionKind, count: u32) -> Self {
        Self {
            kind,
            count,
            glyph_class: kind.glyph_class(),
            label: kind.label(),
        }
    }

    /// Text of the hover indicator over the badge
    pub fn indicator(&self) -> String {
        self.count.to_string()
    }
}

/// Display model of one entity's reactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionView {
    /// The viewer's own pick, shown on the reaction button
    pub icon_for_viewer: Option<ReactionKind>,
    /// Count descending, equal counts in kind priority order
    pub ordered_badges: Vec<Badge>,
    /// Reactions beyond one per badge: `sum(counts) - distinct kinds`
    ///
    /// A display heuristic behind the "+N" counter, not a reaction total.
    pub overflow_count: u32,
}

impl ReactionView {
    /// Text of the counter next to the badges: `+N`, or `0` when nothing overflows
    pub fn counter_label(&self) -> String {
        if self.overflow_count > 0 {
            format!("+{}", self.overflow_count)
        } else {
            "0".to_string()
        }
    }

    /// Glyph class for the viewer's reaction button, if they reacted
    pub fn viewer_glyph_class(&self) -> Option<&'static str> {
        self.icon_for_viewer.map(ReactionKind::glyph_class)
    }
}

/// Render the display model of a reaction state
pub fn render(state: &ReactionState) -> ReactionView {
    let counts = state.counts();

    let mut ordered_badges: Vec<Badge> = counts
        .iter()
        .map(|(kind, count)| Badge::new(kind, count))
        .collect();
    ordered_badges.sort_by_key(|badge| (Reverse(badge.count), badge.kind.priority()));

    let distinct = u32::try_from(counts.distinct()).unwrap_or(u32::MAX);
    let overflow_count = counts.total().saturating_sub(distinct);

    ReactionView {
        icon_for_viewer: state.viewer_reaction(),
        ordered_badges,
        overflow_count,
    }
}
