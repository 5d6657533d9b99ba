//! Viewer notices
//!
//! A notice is what the viewer is told when a reaction or content request
//! fails: a stable code, a human-readable message, and whether trying again
//! might help.

use serde::Serialize;

/// Viewer-visible failure notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl Notice {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }

    /// Short text for a toast or alert
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.retryable {
            format!("{} Please try again.", self.message)
        } else {
            self.message.clone()
        }
    }
}
