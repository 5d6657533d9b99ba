//! Request and response bodies as the backend speaks them

use reaction_core::{
    ApiError, ApiResult, EntityId, ReactionCounts, ReactionKind, ReactionSnapshot,
};
use serde::{Deserialize, Serialize};

/// Body of a reaction create or update
#[derive(Debug, Serialize)]
pub(crate) struct EmojiBody {
    #[serde(rename = "emojiType")]
    pub emoji_type: ReactionKind,
}

/// Body of a content edit
#[derive(Debug, Serialize)]
pub(crate) struct EditBody<'a> {
    pub id: EntityId,
    pub content: &'a str,
}

/// Body of a content delete
#[derive(Debug, Serialize)]
pub(crate) struct DeleteBody {
    pub id: EntityId,
}

/// Error body the backend sends with non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// `"True"` / `"False"` as rendered by the backend, or a JSON bool
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

/// Response of a reaction read
#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotBody {
    like: Flag,
    #[serde(rename = "emojiType", default)]
    emoji_type: Option<String>,
    #[serde(default)]
    counts: ReactionCounts,
}

impl SnapshotBody {
    pub fn into_snapshot(self) -> ApiResult<ReactionSnapshot> {
        let viewer_reaction = if self.like.is_set() {
            let name = self
                .emoji_type
                .ok_or_else(|| ApiError::MalformedResponse("missing emojiType".to_string()))?;
            let kind = name
                .parse::<ReactionKind>()
                .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
            Some(kind)
        } else {
            None
        };

        Ok(ReactionSnapshot::new(viewer_reaction, self.counts))
    }
}
