//! Rule tokens: immutable rule entries keyed by node identity.

use super::action::Action;
use super::category::Category;
use super::key::IdentityKey;
use super::project::{PackageAction, ProjectLevelAction, ProjectType};

/// A rule entry. Actions, packages, and project-level actions are cargo;
/// identity is `(category, key)` only.
#[derive(Debug, Clone)]
pub struct Token {
    pub category: Category,
    pub key: IdentityKey,
    pub description: String,
    pub actions: Vec<Action>,
    pub packages: Vec<PackageAction>,
    pub project_level_actions: Vec<ProjectLevelAction>,
    /// Project type this rule is evidence of, if any.
    pub project_type: Option<ProjectType>,
}

impl Token {
    pub fn new(category: Category, key: IdentityKey) -> Self {
        Self {
            description: key.to_string(),
            category,
            key,
            actions: Vec::new(),
            packages: Vec::new(),
            project_level_actions: Vec::new(),
            project_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_package(mut self, package: PackageAction) -> Self {
        self.packages.push(package);
        self
    }

    pub fn with_project_action(mut self, action: ProjectLevelAction) -> Self {
        self.project_level_actions.push(action);
        self
    }

    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
        self
    }

    /// True if matching this token contributes anything to a file.
    pub fn has_cargo(&self) -> bool {
        !self.actions.is_empty()
            || !self.packages.is_empty()
            || !self.project_level_actions.is_empty()
            || self.project_type.is_some()
    }

    /// Append another token's cargo. Used when rule files repeat a key.
    pub(crate) fn merge(&mut self, other: Token) {
        self.actions.extend(other.actions);
        self.packages.extend(other.packages);
        self.project_level_actions
            .extend(other.project_level_actions);
        if self.project_type.is_none() {
            self.project_type = other.project_type;
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.key == other.key
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.key.hash(state);
    }
}
