//! Annotated syntax nodes: one closed enum of node kinds plus shared
//! span, comment, and child data.

use serde::{Deserialize, Serialize};

use uplift_core::errors::NodeError;

use super::span::TextSpan;

/// Source dialect of a tree. Both share one object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    CSharp,
    VisualBasic,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CSharp => "C#",
            Self::VisualBasic => "Visual Basic",
        }
    }
}

/// Semantic facts resolved by the external analyzer. Every field is optional;
/// an absent or empty `original_definition` means the symbol is unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticInfo {
    /// Fully-qualified original definition, e.g. `System.Web.Mvc.Controller.View()`.
    pub original_definition: Option<String>,
    /// Containing namespace of the symbol.
    pub namespace: Option<String>,
    /// Declared or containing type name (unqualified).
    pub type_name: Option<String>,
    /// Fully-qualified base type of a declared type.
    pub base_type: Option<String>,
    /// Assembly the symbol was resolved from.
    pub assembly: Option<String>,
}

impl SemanticInfo {
    /// The original definition, if one was actually resolved.
    pub fn resolved_definition(&self) -> Option<&str> {
        self.original_definition
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn namespace_or_empty(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    pub fn type_name_or_empty(&self) -> &str {
        self.type_name.as_deref().unwrap_or("")
    }

    /// `Namespace.Type`, or just the type when the namespace is unknown.
    pub fn qualified_type(&self) -> Option<String> {
        let type_name = self.type_name.as_deref().filter(|t| !t.is_empty())?;
        match self.namespace.as_deref().filter(|n| !n.is_empty()) {
            Some(ns) => Some(format!("{ns}.{type_name}")),
            None => Some(type_name.to_string()),
        }
    }
}

/// Keyword introducing a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeKeyword {
    #[default]
    Class,
    Struct,
    Record,
    /// VB `Module` block.
    Module,
}

/// Class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDeclaration {
    pub name: String,
    pub keyword: TypeKeyword,
    pub modifiers: Vec<String>,
    /// Base types and implemented interfaces as written.
    pub base_list: Vec<String>,
    pub semantic: Option<SemanticInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodDeclaration {
    pub name: String,
    pub modifiers: Vec<String>,
    pub return_type: String,
    /// Parameters as written, e.g. `int id`.
    pub parameters: Vec<String>,
    /// False for abstract/interface members rendered with `;`.
    pub has_body: bool,
    pub semantic: Option<SemanticInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeNode {
    pub name: String,
    pub arguments: Vec<String>,
    pub semantic: Option<SemanticInfo>,
}

/// `using X;` / `Imports X`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsingDirective {
    pub name: String,
    pub alias: Option<String>,
    pub is_static: bool,
}

/// `callee(args)`, children `[callee, arg...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Invocation {
    pub semantic: Option<SemanticInfo>,
}

/// `target.name`, children `[target]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberAccess {
    pub name: String,
    pub semantic: Option<SemanticInfo>,
}

/// `target[index...]`, children `[target, index...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementAccess {
    pub semantic: Option<SemanticInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierName {
    pub name: String,
    pub semantic: Option<SemanticInfo>,
}

/// `new Type(args)`, children `[arg...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectCreation {
    pub type_name: String,
    pub semantic: Option<SemanticInfo>,
}

/// Any other construct, rendered as `prefix` + children joined by
/// `separator` + `suffix`. Statements and literals live here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherNode {
    pub kind: String,
    pub prefix: String,
    pub separator: String,
    pub suffix: String,
}

/// Node kind with the data relevant to its matching strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum NodeKind {
    CompilationUnit,
    Namespace { name: String },
    Class(TypeDeclaration),
    Interface(TypeDeclaration),
    Method(MethodDeclaration),
    Attribute(AttributeNode),
    Using(UsingDirective),
    Invocation(Invocation),
    MemberAccess(MemberAccess),
    ElementAccess(ElementAccess),
    Identifier(IdentifierName),
    ObjectCreation(ObjectCreation),
    Other(OtherNode),
}

impl NodeKind {
    /// Short kind name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CompilationUnit => "compilation_unit",
            Self::Namespace { .. } => "namespace",
            Self::Class(_) => "class",
            Self::Interface(_) => "interface",
            Self::Method(_) => "method",
            Self::Attribute(_) => "attribute",
            Self::Using(_) => "using",
            Self::Invocation(_) => "invocation",
            Self::MemberAccess(_) => "member_access",
            Self::ElementAccess(_) => "element_access",
            Self::Identifier(_) => "identifier",
            Self::ObjectCreation(_) => "object_creation",
            Self::Other(_) => "other",
        }
    }

    /// Semantic info attached to this kind, if the kind carries any.
    pub fn semantic(&self) -> Option<&SemanticInfo> {
        match self {
            Self::Class(t) | Self::Interface(t) => t.semantic.as_ref(),
            Self::Method(m) => m.semantic.as_ref(),
            Self::Attribute(a) => a.semantic.as_ref(),
            Self::Invocation(i) => i.semantic.as_ref(),
            Self::MemberAccess(m) => m.semantic.as_ref(),
            Self::ElementAccess(e) => e.semantic.as_ref(),
            Self::Identifier(i) => i.semantic.as_ref(),
            Self::ObjectCreation(o) => o.semantic.as_ref(),
            Self::CompilationUnit | Self::Namespace { .. } | Self::Using(_) | Self::Other(_) => {
                None
            }
        }
    }
}

/// One node of an annotated syntax tree. Trees are plain owned values:
/// the rewriter always builds new nodes instead of mutating shared ones.
///
/// `Clone` and `Drop` are iterative, so arbitrarily deep inputs never
/// overflow the stack when copied or freed.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub span: TextSpan,
    #[serde(default)]
    pub leading_comments: Vec<String>,
    #[serde(default)]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            span: TextSpan::default(),
            leading_comments: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = span;
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_leading_comment(mut self, comment: impl Into<String>) -> Self {
        self.leading_comments.push(comment.into());
        self
    }

    /// Declared or referenced name, for kinds that have one.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Namespace { name } => Some(name),
            NodeKind::Class(t) | NodeKind::Interface(t) => Some(&t.name),
            NodeKind::Method(m) => Some(&m.name),
            NodeKind::Attribute(a) => Some(&a.name),
            NodeKind::Using(u) => Some(&u.name),
            NodeKind::MemberAccess(m) => Some(&m.name),
            NodeKind::Identifier(i) => Some(&i.name),
            NodeKind::ObjectCreation(o) => Some(&o.type_name),
            NodeKind::CompilationUnit
            | NodeKind::Invocation(_)
            | NodeKind::ElementAccess(_)
            | NodeKind::Other(_) => None,
        }
    }

    /// Name used in log lines: the node's own name, the resolved definition,
    /// or the kind name.
    pub fn display_identifier(&self) -> String {
        if let Some(name) = self.name() {
            return name.to_string();
        }
        if let Some(def) = self.kind.semantic().and_then(|s| s.resolved_definition()) {
            return def.to_string();
        }
        match &self.kind {
            NodeKind::Other(o) => o.kind.clone(),
            other => other.name().to_string(),
        }
    }

    /// Rename the node in place. Returns false for kinds without a name.
    pub fn set_name(&mut self, new_name: impl Into<String>) -> bool {
        let new_name = new_name.into();
        match &mut self.kind {
            NodeKind::Namespace { name } => *name = new_name,
            NodeKind::Class(t) | NodeKind::Interface(t) => t.name = new_name,
            NodeKind::Method(m) => m.name = new_name,
            NodeKind::Attribute(a) => a.name = new_name,
            NodeKind::Using(u) => u.name = new_name,
            NodeKind::MemberAccess(m) => m.name = new_name,
            NodeKind::Identifier(i) => i.name = new_name,
            NodeKind::ObjectCreation(o) => o.type_name = new_name,
            NodeKind::CompilationUnit
            | NodeKind::Invocation(_)
            | NodeKind::ElementAccess(_)
            | NodeKind::Other(_) => return false,
        }
        true
    }

    /// Leading attribute children of a declaration.
    pub fn attributes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children
            .iter()
            .filter(|c| matches!(c.kind, NodeKind::Attribute(_)))
    }

    /// Check structural requirements the printer and matcher rely on.
    pub fn check_shape(&self) -> Result<(), NodeError> {
        let needs_target = matches!(
            self.kind,
            NodeKind::Invocation(_) | NodeKind::MemberAccess(_) | NodeKind::ElementAccess(_)
        );
        if needs_target && self.children.is_empty() {
            return Err(NodeError::Malformed {
                kind: self.kind.name().to_string(),
                identifier: self.display_identifier(),
                message: "missing target expression".to_string(),
            });
        }
        Ok(())
    }

    /// Depth of the deepest path below this node (a leaf has depth 1).
    /// Iterative so pathological inputs cannot overflow the stack.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, d)) = stack.pop() {
            max = max.max(d);
            stack.extend(node.children.iter().map(|c| (c, d + 1)));
        }
        max
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl Clone for SyntaxNode {
    fn clone(&self) -> Self {
        // Post-order: a node is built once all of its children are.
        let mut frames: Vec<(&SyntaxNode, usize)> = vec![(self, 0)];
        let mut built: Vec<SyntaxNode> = Vec::new();
        while let Some((node, next)) = frames.pop() {
            if let Some(child) = node.children.get(next) {
                frames.push((node, next + 1));
                frames.push((child, 0));
                continue;
            }
            let children = built.split_off(built.len() - node.children.len());
            built.push(SyntaxNode {
                kind: node.kind.clone(),
                span: node.span,
                leading_comments: node.leading_comments.clone(),
                children,
            });
        }
        built.pop().unwrap_or_else(|| SyntaxNode::new(self.kind.clone()))
    }
}

impl Drop for SyntaxNode {
    fn drop(&mut self) {
        if self.children.iter().all(|c| c.children.is_empty()) {
            return;
        }
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order, stack-based traversal.
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
