//! Tree-building helper handed to every transformation closure.

use super::node::{
    AttributeNode, Dialect, IdentifierName, Invocation, MemberAccess, NodeKind, ObjectCreation,
    OtherNode, SyntaxNode, UsingDirective,
};

/// Builds fresh nodes in the dialect of the file being rewritten.
/// Synthesized nodes carry an empty span and no semantic info.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxFactory {
    dialect: Dialect,
}

impl SyntaxFactory {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn identifier(&self, name: impl Into<String>) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Identifier(IdentifierName {
            name: name.into(),
            semantic: None,
        }))
    }

    /// Build `A.B.C` as a member-access chain over an identifier.
    pub fn qualified_name(&self, dotted: &str) -> SyntaxNode {
        let mut parts = dotted.split('.').filter(|p| !p.is_empty());
        let first = parts.next().unwrap_or_default();
        parts.fold(self.identifier(first), |target, part| {
            self.member_access(target, part)
        })
    }

    pub fn member_access(&self, target: SyntaxNode, name: impl Into<String>) -> SyntaxNode {
        SyntaxNode::new(NodeKind::MemberAccess(MemberAccess {
            name: name.into(),
            semantic: None,
        }))
        .with_child(target)
    }

    pub fn invocation(&self, callee: SyntaxNode, arguments: Vec<SyntaxNode>) -> SyntaxNode {
        let mut children = Vec::with_capacity(arguments.len() + 1);
        children.push(callee);
        children.extend(arguments);
        SyntaxNode::new(NodeKind::Invocation(Invocation::default())).with_children(children)
    }

    pub fn object_creation(
        &self,
        type_name: impl Into<String>,
        arguments: Vec<SyntaxNode>,
    ) -> SyntaxNode {
        SyntaxNode::new(NodeKind::ObjectCreation(ObjectCreation {
            type_name: type_name.into(),
            semantic: None,
        }))
        .with_children(arguments)
    }

    pub fn attribute(&self, name: impl Into<String>, arguments: &[&str]) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Attribute(AttributeNode {
            name: name.into(),
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
            semantic: None,
        }))
    }

    pub fn using_directive(&self, name: impl Into<String>) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Using(UsingDirective {
            name: name.into(),
            alias: None,
            is_static: false,
        }))
    }

    /// Raw expression text, printed verbatim.
    pub fn expression(&self, text: impl Into<String>) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Other(OtherNode {
            kind: "expression".to_string(),
            prefix: text.into(),
            ..Default::default()
        }))
    }

    /// Wrap an expression as a statement (`;` terminated in C#).
    pub fn statement(&self, expression: SyntaxNode) -> SyntaxNode {
        let suffix = match self.dialect {
            Dialect::CSharp => ";",
            Dialect::VisualBasic => "",
        };
        SyntaxNode::new(NodeKind::Other(OtherNode {
            kind: "expression_statement".to_string(),
            suffix: suffix.to_string(),
            ..Default::default()
        }))
        .with_child(expression)
    }
}
