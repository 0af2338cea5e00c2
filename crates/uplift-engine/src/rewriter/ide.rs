//! Editor-facing edits produced by incremental rewrites.

use serde::{Deserialize, Serialize};

use crate::syntax::TextSpan;

/// Replace the original text at `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChange {
    pub span: TextSpan,
    pub new_text: String,
}

/// One applied action as an editor sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeFileAction {
    /// Match site the action was stamped with.
    pub span: TextSpan,
    pub description: String,
    pub text_changes: Vec<TextChange>,
}
