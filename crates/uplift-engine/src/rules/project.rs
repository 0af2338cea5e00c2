//! Project-level actions: packages, project types, manifest-shaped actions.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uplift_core::errors::ProjectError;

/// A package reference to add to the project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageAction {
    pub name: String,
    pub version: String,
}

impl PackageAction {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Project flavours that gate project-level actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectType {
    ClassLibrary,
    WebApi,
    Mvc,
    WebForms,
    Wcf,
    Console,
}

impl ProjectType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClassLibrary => "ClassLibrary",
            Self::WebApi => "WebApi",
            Self::Mvc => "Mvc",
            Self::WebForms => "WebForms",
            Self::Wcf => "Wcf",
            Self::Console => "Console",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a project-level action sees: the project being migrated.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub project_name: String,
    pub manifest_path: PathBuf,
    pub target_versions: Vec<String>,
    pub project_types: Vec<ProjectType>,
    pub mock_run: bool,
}

/// Transformation of the project as a whole. Returns a human-readable
/// outcome string.
pub trait ProjectTransform: Send + Sync {
    fn run(&self, context: &ProjectContext) -> Result<String, ProjectError>;
}

impl<F> ProjectTransform for F
where
    F: Fn(&ProjectContext) -> Result<String, ProjectError> + Send + Sync,
{
    fn run(&self, context: &ProjectContext) -> Result<String, ProjectError> {
        self(context)
    }
}

#[derive(Clone)]
pub struct ProjectLevelAction {
    pub name: String,
    pub description: String,
    /// Only run when this project type was detected. `None` runs always.
    pub project_type: Option<ProjectType>,
    transform: Arc<dyn ProjectTransform>,
}

impl ProjectLevelAction {
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&ProjectContext) -> Result<String, ProjectError> + Send + Sync + 'static,
    {
        Self::from_transform(name, Arc::new(transform))
    }

    pub fn from_transform(name: impl Into<String>, transform: Arc<dyn ProjectTransform>) -> Self {
        let name = name.into();
        Self {
            description: name.clone(),
            name,
            project_type: None,
            transform,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn for_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
        self
    }

    pub fn applies_to(&self, detected: &[ProjectType]) -> bool {
        self.project_type.map_or(true, |t| detected.contains(&t))
    }

    pub fn run(&self, context: &ProjectContext) -> Result<String, ProjectError> {
        self.transform.run(context)
    }
}

impl fmt::Debug for ProjectLevelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectLevelAction")
            .field("name", &self.name)
            .field("project_type", &self.project_type)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ProjectLevelAction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.project_type == other.project_type
    }
}

impl Eq for ProjectLevelAction {}
