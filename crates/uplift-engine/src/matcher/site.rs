//! Match-site identity shared by the matcher and the rewriter.
//!
//! The matcher stamps actions with the key computed here; the rewriter
//! recomputes it on the original node and applies only actions whose stored
//! key agrees.

use crate::rules::Category;
use crate::syntax::{NodeKind, SyntaxNode};

/// Category of actions a node can carry, if any. Imports carry none at node
/// level: their actions run once against the file root.
pub fn node_category(node: &SyntaxNode) -> Option<Category> {
    match &node.kind {
        NodeKind::Namespace { .. } => Some(Category::Namespace),
        NodeKind::Class(_) => Some(Category::Class),
        NodeKind::Interface(_) => Some(Category::Interface),
        NodeKind::Method(_) => Some(Category::Method),
        NodeKind::Attribute(_) => Some(Category::Attribute),
        NodeKind::Invocation(_) => Some(Category::Invocation),
        NodeKind::MemberAccess(_) => Some(Category::MemberAccess),
        NodeKind::ElementAccess(_) => Some(Category::ElementAccess),
        NodeKind::Identifier(_) => Some(Category::Identifier),
        NodeKind::ObjectCreation(_) => Some(Category::ObjectCreation),
        NodeKind::Using(_) => Some(Category::Using),
        NodeKind::CompilationUnit | NodeKind::Other(_) => None,
    }
}

/// The concrete identity of a node at its match site.
pub fn site_key(node: &SyntaxNode) -> Option<String> {
    let semantic = node.kind.semantic();
    match &node.kind {
        NodeKind::Namespace { name } => Some(name.clone()),
        NodeKind::Class(decl) | NodeKind::Interface(decl) => Some(decl.name.clone()),
        NodeKind::Method(method) => Some(method.name.clone()),
        NodeKind::Attribute(attr) => Some(attr.name.clone()),
        NodeKind::Using(using) => Some(using.name.clone()),
        NodeKind::Invocation(_) | NodeKind::ObjectCreation(_) => {
            semantic.and_then(|s| s.resolved_definition()).map(str::to_string)
        }
        NodeKind::MemberAccess(access) => Some(member_key(semantic, &access.name)),
        NodeKind::ElementAccess(_) => {
            let member = element_member(node)?;
            Some(member_key(semantic, member))
        }
        NodeKind::Identifier(ident) => Some(
            semantic
                .and_then(|s| s.qualified_type())
                .unwrap_or_else(|| ident.name.clone()),
        ),
        NodeKind::CompilationUnit | NodeKind::Other(_) => None,
    }
}

/// Name of the member an element access indexes into: the name of its
/// target expression.
pub fn element_member(node: &SyntaxNode) -> Option<&str> {
    node.children.first().and_then(|target| target.name())
}

fn member_key(semantic: Option<&crate::syntax::SemanticInfo>, member: &str) -> String {
    match semantic.map(|s| s.type_name_or_empty()).filter(|t| !t.is_empty()) {
        Some(type_name) => format!("{type_name}.{member}"),
        None => member.to_string(),
    }
}

/// Remove generic argument lists: `List<int>` and `List(Of Integer)` both
/// become `List`.
pub fn erase_generics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut angle = 0usize;
    let mut paren_of: Vec<bool> = Vec::new();

    for (i, c) in text.char_indices() {
        match c {
            '<' => angle += 1,
            '>' if angle > 0 => angle -= 1,
            '(' => {
                let is_of = text[i + 1..].trim_start().starts_with("Of ");
                paren_of.push(is_of);
                if !is_of && angle == 0 && !paren_of.iter().any(|&of| of) {
                    out.push(c);
                }
            }
            ')' => {
                let was_of = paren_of.pop().unwrap_or(false);
                if !was_of && angle == 0 && !paren_of.iter().any(|&of| of) {
                    out.push(c);
                }
            }
            _ if angle > 0 || paren_of.iter().any(|&of| of) => {}
            _ => out.push(c),
        }
    }
    out
}
