//! Per-file accumulation of matched actions.

use std::collections::BTreeSet;
use std::path::PathBuf;

use uplift_core::types::{FxHashMap, FxHashSet};

use crate::rules::{Action, ActionIdentity, Category, PackageAction, ProjectLevelAction, ProjectType, Token};
use crate::syntax::{Dialect, TextSpan};

/// Insertion-ordered set of actions, deduplicated by structural identity.
#[derive(Debug, Clone, Default)]
pub struct ActionSet {
    actions: Vec<Action>,
    seen: FxHashSet<ActionIdentity>,
}

impl ActionSet {
    /// Returns false if an equal action was already present.
    pub fn insert(&mut self, action: Action) -> bool {
        if !self.seen.insert(action.identity()) {
            return false;
        }
        self.actions.push(action);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Actions stamped with `key`.
    pub fn with_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Action> + 'a {
        self.actions.iter().filter(move |a| a.key == key)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Everything the matcher found in one file.
#[derive(Debug, Clone)]
pub struct FileActions {
    pub path: PathBuf,
    pub dialect: Dialect,
    sets: FxHashMap<Category, ActionSet>,
    pub packages: Vec<PackageAction>,
    pub project_level_actions: Vec<ProjectLevelAction>,
    pub project_types: BTreeSet<ProjectType>,
}

impl FileActions {
    pub fn new(path: impl Into<PathBuf>, dialect: Dialect) -> Self {
        Self {
            path: path.into(),
            dialect,
            sets: FxHashMap::default(),
            packages: Vec::new(),
            project_level_actions: Vec::new(),
            project_types: BTreeSet::new(),
        }
    }

    /// Record a token hit at a match site. Actions of `node_category` are
    /// stamped with `site_key`; all actions get the site's span.
    pub fn record_hit(
        &mut self,
        token: &Token,
        span: TextSpan,
        node_category: Option<Category>,
        site_key: Option<&str>,
    ) {
        for action in &token.actions {
            let key = if Some(action.category) == node_category {
                site_key
            } else {
                None
            };
            self.insert(action.stamped(span, key));
        }
        for package in &token.packages {
            if !self.packages.contains(package) {
                self.packages.push(package.clone());
            }
        }
        for action in &token.project_level_actions {
            if !self.project_level_actions.contains(action) {
                self.project_level_actions.push(action.clone());
            }
        }
        if let Some(project_type) = token.project_type {
            self.project_types.insert(project_type);
        }
    }

    /// Fold the hits of `other` into this file.
    pub fn absorb(&mut self, other: FileActions) {
        for (_, set) in other.sets {
            for action in set.actions {
                self.insert(action);
            }
        }
        for package in other.packages {
            if !self.packages.contains(&package) {
                self.packages.push(package);
            }
        }
        for action in other.project_level_actions {
            if !self.project_level_actions.contains(&action) {
                self.project_level_actions.push(action);
            }
        }
        self.project_types.extend(other.project_types);
    }

    pub fn insert(&mut self, action: Action) -> bool {
        self.sets.entry(action.category).or_default().insert(action)
    }

    pub fn actions(&self, category: Category) -> Option<&ActionSet> {
        self.sets.get(&category)
    }

    /// All node-level actions in category order, then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        Category::ALL
            .iter()
            .filter_map(|c| self.sets.get(c))
            .flat_map(|set| set.iter())
    }

    pub fn action_count(&self) -> usize {
        self.sets.values().map(ActionSet::len).sum()
    }

    /// True if matching contributed nothing to this file.
    pub fn is_empty(&self) -> bool {
        self.action_count() == 0
            && self.packages.is_empty()
            && self.project_level_actions.is_empty()
            && self.project_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::IdentityKey;
    use crate::syntax::SyntaxFactory;

    fn comment_action(category: Category) -> Action {
        Action::new(category, "AddComment", "ControllerBase", |_: &SyntaxFactory, n| Ok(n))
            .with_value("note")
    }

    #[test]
    fn test_name_bound_stamping() {
        let token = Token::new(Category::Class, IdentityKey::qualified("ControllerBase"))
            .with_action(comment_action(Category::Class))
            .with_action(comment_action(Category::Using));
        let mut file = FileActions::new("Widget.cs", Dialect::CSharp);
        file.record_hit(&token, TextSpan::new(3, 30), Some(Category::Class), Some("Widget"));

        let class = file.actions(Category::Class).unwrap().iter().next().unwrap();
        assert_eq!(class.key, "Widget");
        assert_eq!(class.text_span, Some(TextSpan::new(3, 30)));
        let using = file.actions(Category::Using).unwrap().iter().next().unwrap();
        assert_eq!(using.key, "ControllerBase");
    }

    #[test]
    fn test_duplicate_hits_deduplicate() {
        let token = Token::new(Category::Class, IdentityKey::qualified("ControllerBase"))
            .with_action(comment_action(Category::Class))
            .with_package(PackageAction::new("Microsoft.AspNetCore.Mvc", "2.2.0"));
        let mut file = FileActions::new("Widget.cs", Dialect::CSharp);
        let span = TextSpan::new(0, 10);
        file.record_hit(&token, span, Some(Category::Class), Some("Widget"));
        file.record_hit(&token, span, Some(Category::Class), Some("Widget"));
        assert_eq!(file.action_count(), 1);
        assert_eq!(file.packages.len(), 1);
    }
}
