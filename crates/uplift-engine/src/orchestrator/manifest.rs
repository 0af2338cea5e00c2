//! Boundary to the project manifest. Serialization of the manifest itself
//! lives outside this crate; the engine only sequences calls.

use uplift_core::errors::ProjectError;

use crate::rules::{PackageAction, ProjectContext};

pub trait ManifestMutator: Send + Sync {
    /// Retarget the manifest to `context.target_versions`. Returns a
    /// human-readable summary.
    fn rewrite_manifest(&self, context: &ProjectContext) -> Result<String, ProjectError>;

    /// Merge package references into the manifest.
    fn merge_packages(
        &self,
        context: &ProjectContext,
        packages: &[PackageAction],
    ) -> Result<String, ProjectError>;
}

/// Describes what would change without touching the manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestPreview;

impl ManifestMutator for ManifestPreview {
    fn rewrite_manifest(&self, context: &ProjectContext) -> Result<String, ProjectError> {
        Ok(format!(
            "{}: target {}",
            context.manifest_path.display(),
            context.target_versions.join(";")
        ))
    }

    fn merge_packages(
        &self,
        context: &ProjectContext,
        packages: &[PackageAction],
    ) -> Result<String, ProjectError> {
        let list: Vec<String> = packages
            .iter()
            .map(|p| format!("{} {}", p.name, p.version))
            .collect();
        Ok(format!(
            "{}: add {}",
            context.manifest_path.display(),
            if list.is_empty() { "nothing".to_string() } else { list.join(", ") }
        ))
    }
}
