//! Project-level errors: manifest mutation, project actions, persistence.

use std::path::PathBuf;

use super::error_code::{self, UpliftErrorCode};

/// Errors raised while running project-level actions or writing output.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Manifest rewrite failed for {path}: {message}")]
    ManifestRewrite { path: PathBuf, message: String },

    #[error("Package merge failed for {path}: {message}")]
    PackageMerge { path: PathBuf, message: String },

    #[error("Project action {name} failed: {message}")]
    ActionFailed { name: String, message: String },

    #[error("Failed to persist {path}: {message}")]
    Persistence { path: PathBuf, message: String },
}

impl UpliftErrorCode for ProjectError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ManifestRewrite { .. } | Self::PackageMerge { .. } => error_code::MANIFEST_ERROR,
            Self::ActionFailed { .. } => error_code::PROJECT_ACTION_ERROR,
            Self::Persistence { .. } => error_code::PERSISTENCE_ERROR,
        }
    }
}
