//! Matching/rewriting engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_WORKERS};

/// Configuration for the tree matcher, rewriter, and worker pool.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum tree depth visited by the matcher and rewriter. Default: 256.
    pub max_depth: Option<usize>,
    /// Worker threads shared by solution and project fan-out. 0 = auto.
    pub max_workers: Option<usize>,
    /// Run post-rewrite validation of action assertions. Default: true.
    pub validate: Option<bool>,
}

impl EngineConfig {
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn effective_max_workers(&self) -> usize {
        self.max_workers.unwrap_or(DEFAULT_MAX_WORKERS)
    }

    pub fn effective_validate(&self) -> bool {
        self.validate.unwrap_or(true)
    }
}
