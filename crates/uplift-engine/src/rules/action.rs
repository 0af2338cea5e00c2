//! Typed node-level actions.
//!
//! An action is a rule-authored template: category, name, key, value, and a
//! shared transformation. The matcher clones templates per match site with
//! [`Action::stamped`]; the templates inside the rule index never change.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uplift_core::errors::TransformError;

use super::category::Category;
use super::validation::ActionValidation;
use crate::syntax::{SyntaxFactory, SyntaxNode, TextSpan};

/// Transformation of one matched node. Implemented for any suitable closure.
pub trait NodeTransform: Send + Sync {
    fn apply(&self, factory: &SyntaxFactory, node: SyntaxNode)
        -> Result<SyntaxNode, TransformError>;
}

impl<F> NodeTransform for F
where
    F: Fn(&SyntaxFactory, SyntaxNode) -> Result<SyntaxNode, TransformError> + Send + Sync,
{
    fn apply(
        &self,
        factory: &SyntaxFactory,
        node: SyntaxNode,
    ) -> Result<SyntaxNode, TransformError> {
        self(factory, node)
    }
}

/// Structural identity of an action instance: what dedup and folding compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionIdentity {
    pub category: Category,
    pub name: String,
    pub key: String,
    pub value: String,
    pub span: Option<TextSpan>,
}

#[derive(Clone)]
pub struct Action {
    pub category: Category,
    /// Action type name, e.g. `RenameClass`.
    pub name: String,
    /// Site key the rewriter compares against the node's identity.
    pub key: String,
    /// Action argument, e.g. the new name.
    pub value: String,
    pub description: String,
    /// Span of the match site, set by [`Action::stamped`].
    pub text_span: Option<TextSpan>,
    pub validation: Option<ActionValidation>,
    /// Set when [`Action::stamped`] replaced the key with the site's own
    /// key; such an action only applies at `text_span`.
    site_bound: bool,
    transform: Arc<dyn NodeTransform>,
}

impl Action {
    pub fn new<F>(
        category: Category,
        name: impl Into<String>,
        key: impl Into<String>,
        transform: F,
    ) -> Self
    where
        F: Fn(&SyntaxFactory, SyntaxNode) -> Result<SyntaxNode, TransformError>
            + Send
            + Sync
            + 'static,
    {
        Self::from_transform(category, name, key, Arc::new(transform))
    }

    /// Build from an existing transformation, e.g. one shared by several
    /// rules.
    pub fn from_transform(
        category: Category,
        name: impl Into<String>,
        key: impl Into<String>,
        transform: Arc<dyn NodeTransform>,
    ) -> Self {
        let name = name.into();
        Self {
            category,
            description: name.clone(),
            name,
            key: key.into(),
            value: String::new(),
            text_span: None,
            validation: None,
            site_bound: false,
            transform,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_validation(mut self, validation: ActionValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Copy of this action bound to one match site. The transformation is
    /// shared, not cloned.
    pub fn stamped(&self, span: TextSpan, site_key: Option<&str>) -> Action {
        let mut copy = self.clone();
        copy.text_span = Some(span);
        if let Some(key) = site_key {
            copy.key = key.to_string();
            copy.site_bound = true;
        }
        copy
    }

    /// Whether this action may run at `node`. A site-bound action runs only
    /// at the node it was matched on, so two declarations sharing a name do
    /// not both pick it up.
    pub fn applies_at(&self, node: &SyntaxNode) -> bool {
        !self.site_bound || self.text_span.map_or(true, |span| span == node.span)
    }

    pub fn apply(
        &self,
        factory: &SyntaxFactory,
        node: SyntaxNode,
    ) -> Result<SyntaxNode, TransformError> {
        self.transform.apply(factory, node)
    }

    pub fn identity(&self) -> ActionIdentity {
        ActionIdentity {
            category: self.category,
            name: self.name.clone(),
            key: self.key.clone(),
            value: self.value.clone(),
            span: self.text_span,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("key", &self.key)
            .field("value", &self.value)
            .field("text_span", &self.text_span)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.name == other.name
            && self.key == other.key
            && self.value == other.value
            && self.text_span == other.text_span
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.name.hash(state);
        self.key.hash(state);
        self.value.hash(state);
        self.text_span.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Action {
        Action::new(Category::Class, "AddComment", "ControllerBase", |_, n| Ok(n))
        .with_value("migrated")
    }

    #[test]
    fn test_stamped_copy_leaves_template_untouched() {
        let template = noop();
        let stamped = template.stamped(TextSpan::new(10, 40), Some("Widget"));
        assert_eq!(template.key, "ControllerBase");
        assert_eq!(template.text_span, None);
        assert_eq!(stamped.key, "Widget");
        assert_eq!(stamped.text_span, Some(TextSpan::new(10, 40)));
    }

    #[test]
    fn test_equality_includes_span() {
        let a = noop().stamped(TextSpan::new(0, 5), None);
        let b = noop().stamped(TextSpan::new(0, 5), None);
        let c = noop().stamped(TextSpan::new(6, 9), None);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_site_bound_action_applies_only_at_its_span() {
        use crate::syntax::NodeKind;

        let here = SyntaxNode::new(NodeKind::CompilationUnit).with_span(TextSpan::new(10, 40));
        let elsewhere =
            SyntaxNode::new(NodeKind::CompilationUnit).with_span(TextSpan::new(50, 80));

        let bound = noop().stamped(TextSpan::new(10, 40), Some("Widget"));
        assert!(bound.applies_at(&here));
        assert!(!bound.applies_at(&elsewhere));

        let cross = noop().stamped(TextSpan::new(10, 40), None);
        assert!(cross.applies_at(&elsewhere));
    }
}
