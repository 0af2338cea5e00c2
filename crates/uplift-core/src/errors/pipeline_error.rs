//! Pipeline errors and non-fatal error collection.

use std::path::PathBuf;

use super::error_code::{self, UpliftErrorCode};
use super::{ConfigError, NodeError, ProjectError, RuleError, TransformError};

/// Errors that can occur while orchestrating a migration run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Processing {path} failed: {message}")]
    FileFailed { path: PathBuf, message: String },

    #[error("Processing project {name} failed: {message}")]
    ProjectFailed { name: String, message: String },
}

impl UpliftErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Rule(e) => e.error_code(),
            Self::Transform(e) => e.error_code(),
            Self::Node(e) => e.error_code(),
            Self::Project(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::FileFailed { .. } => error_code::FILE_FAILED,
            Self::ProjectFailed { .. } => error_code::PROJECT_FAILED,
        }
    }
}

/// Result of a run that accumulates non-fatal errors.
/// Allows partial results to be returned even when some files fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
