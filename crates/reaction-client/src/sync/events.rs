//! Events published to reaction display subscribers

use reaction_common::Notice;
use reaction_core::EntityRef;

use crate::view::ReactionView;

/// Something the display layer should react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionEvent {
    /// The entity's reaction state changed; redraw with this view
    Rendered { entity: EntityRef, view: ReactionView },
    /// A request failed in a way the viewer should see
    Notice { entity: EntityRef, notice: Notice },
    /// The entity is gone; remove its reaction bar
    Evicted { entity: EntityRef },
}

impl ReactionEvent {
    pub fn entity(&self) -> EntityRef {
        match self {
            Self::Rendered { entity, .. } | Self::Notice { entity, .. } | Self::Evicted { entity } => {
                *entity
            }
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Rendered { .. } => "REACTION_RENDERED",
            Self::Notice { .. } => "REACTION_NOTICE",
            Self::Evicted { .. } => "REACTION_EVICTED",
        }
    }
}
