//! Rule lookups for a single node.

use uplift_core::types::{SmallVec2, SmallVec4};

use super::context::MatchContext;
use super::site::{element_member, erase_generics};
use crate::rules::{Category, IdentityKey, RuleIndex, Token};
use crate::syntax::{NodeKind, SemanticInfo, SyntaxNode, TypeDeclaration};

/// Tokens found for one node.
#[derive(Debug, Default)]
pub struct NodeMatch<'i> {
    pub hits: SmallVec4<&'i Token>,
    /// Children are presumed replaced together with the node.
    pub skip_children: bool,
}

impl<'i> NodeMatch<'i> {
    fn push(&mut self, token: Option<&'i Token>) -> bool {
        let Some(token) = token else {
            return false;
        };
        if !self.hits.iter().any(|t| std::ptr::eq(*t, token)) {
            self.hits.push(token);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Lookups for C# trees, where every node kind can match.
pub fn csharp<'i>(index: &'i RuleIndex, node: &SyntaxNode, ctx: &MatchContext) -> NodeMatch<'i> {
    let mut found = NodeMatch::default();
    let semantic = node.kind.semantic();

    match &node.kind {
        NodeKind::Namespace { name } => {
            found.push(index.lookup(Category::Namespace, &IdentityKey::name(name.as_str())));
        }
        NodeKind::Using(using) => {
            found.push(index.lookup(Category::Using, &IdentityKey::name(using.name.as_str())));
        }
        NodeKind::Class(decl) => declaration(index, Category::Class, decl, ctx, &mut found),
        NodeKind::Interface(decl) => declaration(index, Category::Interface, decl, ctx, &mut found),
        NodeKind::Method(method) => {
            let (namespace, type_name) = located(semantic, ctx);
            let key = IdentityKey::symbol(method.name.as_str(), namespace, type_name);
            found.push(index.lookup(Category::Method, &key));
        }
        NodeKind::Attribute(attr) => {
            found.push(index.lookup(Category::Attribute, &symbol(&attr.name, semantic)));
        }
        NodeKind::MemberAccess(access) => {
            found.push(index.lookup(Category::MemberAccess, &symbol(&access.name, semantic)));
        }
        NodeKind::ElementAccess(_) => {
            if let Some(member) = element_member(node) {
                found.push(index.lookup(Category::ElementAccess, &symbol(member, semantic)));
            }
        }
        NodeKind::Identifier(_) => {
            if let Some(qualified) = semantic.and_then(SemanticInfo::qualified_type) {
                found.push(index.lookup(Category::Identifier, &IdentityKey::qualified(qualified)));
            }
        }
        NodeKind::Invocation(_) => {
            if let Some(def) = semantic.and_then(SemanticInfo::resolved_definition) {
                found.push(index.lookup(Category::Invocation, &symbol(def, semantic)));
            }
        }
        NodeKind::ObjectCreation(creation) => {
            // Unresolved creations never match, not even by literal type.
            if let Some(def) = semantic.and_then(SemanticInfo::resolved_definition) {
                let by_name = IdentityKey::name(creation.type_name.as_str());
                let by_location =
                    IdentityKey::location(ctx.namespace.as_str(), ctx.type_name.as_str());
                let strategies: [IdentityKey; 3] = [by_name, by_location, symbol(def, semantic)];
                let mut any = false;
                for key in &strategies {
                    any |= found.push(index.lookup(Category::ObjectCreation, key));
                }
                found.skip_children = any;
            }
        }
        NodeKind::CompilationUnit | NodeKind::Other(_) => {}
    }
    found
}

/// Lookups for Visual Basic trees: namespaces, imports, and invocations.
/// Class and interface blocks are looked up by the rewriter through
/// [`visual_basic_type_block`].
pub fn visual_basic<'i>(
    index: &'i RuleIndex,
    node: &SyntaxNode,
    _ctx: &MatchContext,
) -> NodeMatch<'i> {
    let mut found = NodeMatch::default();
    let semantic = node.kind.semantic();

    match &node.kind {
        NodeKind::Namespace { name } => {
            found.push(index.lookup(Category::Namespace, &IdentityKey::name(name.as_str())));
        }
        NodeKind::Using(import) => {
            found.push(index.lookup(Category::Using, &IdentityKey::name(import.name.as_str())));
        }
        NodeKind::Invocation(_) => {
            if let Some(def) = semantic.and_then(SemanticInfo::resolved_definition) {
                if !found.push(index.lookup(Category::Invocation, &symbol(def, semantic))) {
                    let erased = IdentityKey::symbol(
                        erase_generics(def),
                        erase_generics(semantic.map_or("", SemanticInfo::namespace_or_empty)),
                        erase_generics(semantic.map_or("", SemanticInfo::type_name_or_empty)),
                    );
                    found.push(index.lookup(Category::Invocation, &erased));
                }
            }
        }
        _ => {}
    }
    found
}

/// Visual Basic class and interface blocks, looked up while rewriting with
/// the same base-type-then-own-name order as C# declarations.
pub fn visual_basic_type_block<'i>(
    index: &'i RuleIndex,
    node: &SyntaxNode,
    ctx: &MatchContext,
) -> NodeMatch<'i> {
    let mut found = NodeMatch::default();
    match &node.kind {
        NodeKind::Class(decl) => declaration(index, Category::Class, decl, ctx, &mut found),
        NodeKind::Interface(decl) => declaration(index, Category::Interface, decl, ctx, &mut found),
        _ => {}
    }
    found
}

/// Class/interface: by declared base type first, then by the declaration's
/// own qualified name. Hits from both are kept.
fn declaration<'i>(
    index: &'i RuleIndex,
    category: Category,
    decl: &TypeDeclaration,
    ctx: &MatchContext,
    found: &mut NodeMatch<'i>,
) {
    let resolved_base = decl
        .semantic
        .as_ref()
        .and_then(|s| s.base_type.as_deref())
        .filter(|b| !b.trim().is_empty());
    let bases: SmallVec2<&str> = match resolved_base {
        Some(base) => std::iter::once(base).collect(),
        None => decl.base_list.iter().map(String::as_str).collect(),
    };
    for base in bases {
        found.push(index.lookup(category, &IdentityKey::qualified(base)));
    }

    let own = match decl.semantic.as_ref().and_then(|s| s.namespace.as_deref()) {
        Some(ns) if !ns.is_empty() => format!("{ns}.{}", decl.name),
        _ => ctx.qualify(&decl.name),
    };
    found.push(index.lookup(category, &IdentityKey::qualified(own)));
}

fn symbol(name: &str, semantic: Option<&SemanticInfo>) -> IdentityKey {
    IdentityKey::symbol(
        name,
        semantic.map_or("", SemanticInfo::namespace_or_empty),
        semantic.map_or("", SemanticInfo::type_name_or_empty),
    )
}

/// Declared namespace/type from semantics, falling back to the enclosing
/// location.
fn located<'a>(semantic: Option<&'a SemanticInfo>, ctx: &'a MatchContext) -> (&'a str, &'a str) {
    let namespace = semantic
        .and_then(|s| s.namespace.as_deref())
        .filter(|n| !n.is_empty())
        .unwrap_or(ctx.namespace.as_str());
    let type_name = semantic
        .and_then(|s| s.type_name.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(ctx.type_name.as_str());
    (namespace, type_name)
}
