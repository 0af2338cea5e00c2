//! Inputs and results of project and solution runs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::Serialize;

use uplift_core::errors::NodeError;

use crate::matcher::FileActions;
use crate::rewriter::{GenericActionExecution, IdeFileAction};
use crate::rules::{PackageAction, ProjectType};
use crate::syntax::{Dialect, SyntaxTree};

/// One project as supplied by the caller: its manifest and parsed files.
#[derive(Debug, Clone, Default)]
pub struct ProjectInput {
    pub name: String,
    pub manifest_path: PathBuf,
    pub files: Vec<SyntaxTree>,
}

impl ProjectInput {
    pub fn new(name: impl Into<String>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            manifest_path: manifest_path.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, tree: SyntaxTree) -> Self {
        self.files.push(tree);
        self
    }
}

/// Everything produced for one file that matched at least one rule.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub dialect: Dialect,
    #[serde(skip)]
    pub actions: FileActions,
    pub executions: Vec<GenericActionExecution>,
    #[serde(skip)]
    pub rewritten_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ide_edits: Vec<IdeFileAction>,
    #[serde(skip)]
    pub node_errors: Vec<NodeError>,
}

/// Per-file results of a project, keyed by path. Workers insert once per
/// file; an incremental run replaces the entry for a path.
#[derive(Debug, Default)]
pub struct ProjectActions {
    files: DashMap<PathBuf, FileResult>,
}

impl ProjectActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the result for the file's path.
    pub fn upsert(&self, result: FileResult) {
        self.files.insert(result.path.clone(), result);
    }

    pub fn remove(&self, path: &Path) -> Option<FileResult> {
        self.files.remove(path).map(|(_, result)| result)
    }

    pub fn get(&self, path: &Path) -> Option<FileResult> {
        self.files.get(path).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Snapshot sorted by path.
    pub fn to_sorted_vec(&self) -> Vec<FileResult> {
        let mut results: Vec<FileResult> = self.files.iter().map(|e| e.value().clone()).collect();
        results.sort_by(|a, b| a.path.cmp(&b.path));
        results
    }

    pub fn into_sorted_vec(self) -> Vec<FileResult> {
        let mut results: Vec<FileResult> = self.files.into_iter().map(|(_, r)| r).collect();
        results.sort_by(|a, b| a.path.cmp(&b.path));
        results
    }
}

/// Outcome of one project-level step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectActionOutcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectActionOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectResult {
    pub name: String,
    pub manifest_path: PathBuf,
    /// Files with at least one action, sorted by path.
    pub files: Vec<FileResult>,
    /// Package references, first seen wins per name.
    pub packages: Vec<PackageAction>,
    pub project_types: BTreeSet<ProjectType>,
    /// Project-level steps in the order they ran.
    pub project_actions: Vec<ProjectActionOutcome>,
}

impl ProjectResult {
    pub fn file(&self, path: impl Into<PathBuf>) -> Option<&FileResult> {
        let path = path.into();
        self.files.iter().find(|f| f.path == path)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SolutionResult {
    /// One entry per project that completed, in input order.
    pub projects: Vec<ProjectResult>,
}

impl SolutionResult {
    pub fn project(&self, name: &str) -> Option<&ProjectResult> {
        self.projects.iter().find(|p| p.name == name)
    }
}
