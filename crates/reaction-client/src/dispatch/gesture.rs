//! Click target resolution

use reaction_core::ReactionKind;

/// Name of the quick-react button
const QUICK_REACT_NAME: &str = "like";

/// What a click on a reaction control landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureTarget {
    /// The primary button; always picks `like`
    QuickReact,
    /// An entry of the expanded emoji panel
    EmojiPanel(ReactionKind),
    /// Anything else inside the control
    Other,
}

impl GestureTarget {
    /// Resolve a click from the target's `name` and `data-name` attributes
    pub fn resolve(name: Option<&str>, data_name: Option<&str>) -> Self {
        if name == Some(QUICK_REACT_NAME) {
            return Self::QuickReact;
        }

        data_name
            .and_then(|value| value.parse::<ReactionKind>().ok())
            .map_or(Self::Other, Self::EmojiPanel)
    }

    /// Reaction kind the click picks, if any
    pub fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::QuickReact => Some(ReactionKind::PRIMARY),
            Self::EmojiPanel(kind) => Some(kind),
            Self::Other => None,
        }
    }
}
