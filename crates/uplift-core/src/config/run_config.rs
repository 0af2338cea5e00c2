//! Per-run behaviour: dry runs and target framework versions.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TARGET_VERSION;

/// Configuration for a single migration run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Produce execution logs without writing any file. Default: false.
    pub mock_run: Option<bool>,
    /// Target framework monikers handed to the manifest mutator.
    #[serde(default)]
    pub target_versions: Vec<String>,
    /// Emit editor edits. Incremental runs default to true; full runs only
    /// render edits when this is set to true.
    pub ide_edits: Option<bool>,
}

impl RunConfig {
    pub fn effective_mock_run(&self) -> bool {
        self.mock_run.unwrap_or(false)
    }

    /// Returns the configured targets, or the compiled default target.
    pub fn effective_target_versions(&self) -> Vec<String> {
        if self.target_versions.is_empty() {
            vec![DEFAULT_TARGET_VERSION.to_string()]
        } else {
            self.target_versions.clone()
        }
    }

    pub fn effective_ide_edits(&self) -> bool {
        self.ide_edits.unwrap_or(true)
    }

    /// Whether a full project run renders editor edits.
    pub fn full_run_ide_edits(&self) -> bool {
        self.ide_edits.unwrap_or(false)
    }
}
