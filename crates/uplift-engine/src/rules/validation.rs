//! Post-condition assertions attached to actions.

use serde::{Deserialize, Serialize};

/// Substring assertions checked against the rewritten file text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionValidation {
    /// Text that must appear after the rewrite.
    pub contains: Option<String>,
    /// Text that must not appear after the rewrite.
    pub not_contains: Option<String>,
    /// Compare with comments kept (whitespace canonicalized) instead of
    /// stripping comments and whitespace.
    pub check_comments: bool,
}

impl ActionValidation {
    pub fn contains(text: impl Into<String>) -> Self {
        Self {
            contains: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn not_contains(text: impl Into<String>) -> Self {
        Self {
            not_contains: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_comments(mut self) -> Self {
        self.check_comments = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.contains.is_none() && self.not_contains.is_none()
    }
}
