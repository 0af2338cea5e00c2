//! Writing rewritten files.

use std::fs;
use std::path::Path;

use uplift_core::errors::ProjectError;

/// Destination for rewritten source text. Never called in a mock run.
pub trait Persistence: Send + Sync {
    fn write(&self, path: &Path, text: &str) -> Result<(), ProjectError>;
}

/// Writes files in place on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPersistence;

impl Persistence for FsPersistence {
    fn write(&self, path: &Path, text: &str) -> Result<(), ProjectError> {
        fs::write(path, text).map_err(|e| ProjectError::Persistence {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
