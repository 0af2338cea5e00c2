//! Enclosing location carried down the tree during matching.

use crate::syntax::{NodeKind, SyntaxNode};

/// Namespace and innermost type enclosing the node being visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchContext {
    pub namespace: String,
    pub type_name: String,
}

impl MatchContext {
    /// Nested namespace declarations accumulate: `A { B { } }` is `A.B`.
    pub fn enter_namespace(&self, name: &str) -> Self {
        let namespace = if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.namespace)
        };
        Self {
            namespace,
            type_name: String::new(),
        }
    }

    pub fn enter_type(&self, name: &str) -> Self {
        Self {
            namespace: self.namespace.clone(),
            type_name: name.to_string(),
        }
    }

    /// Context for the children of `node`, or `None` when it is unchanged.
    pub fn enter(&self, node: &SyntaxNode) -> Option<Self> {
        match &node.kind {
            NodeKind::Namespace { name } => Some(self.enter_namespace(name)),
            NodeKind::Class(decl) | NodeKind::Interface(decl) => Some(self.enter_type(&decl.name)),
            _ => None,
        }
    }

    /// `namespace.name`, or just `name` at global scope.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.namespace)
        }
    }
}
