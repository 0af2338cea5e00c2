//! Tree and rule fixtures shared by the engine integration tests.
#![allow(dead_code)]

use uplift_engine::rules::{RuleIndex, Token};
use uplift_engine::syntax::*;

pub fn semantic(namespace: &str, type_name: &str) -> SemanticInfo {
    SemanticInfo {
        namespace: Some(namespace.into()),
        type_name: Some(type_name.into()),
        ..Default::default()
    }
}

pub fn resolved(definition: &str, namespace: &str, type_name: &str) -> SemanticInfo {
    SemanticInfo {
        original_definition: Some(definition.into()),
        ..semantic(namespace, type_name)
    }
}

pub fn unit(children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::CompilationUnit).with_children(children)
}

pub fn namespace(name: &str, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Namespace { name: name.into() }).with_children(children)
}

pub fn using(name: &str) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Using(UsingDirective {
        name: name.into(),
        alias: None,
        is_static: false,
    }))
}

pub fn class(name: &str, bases: &[&str], members: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Class(TypeDeclaration {
        name: name.into(),
        modifiers: vec!["public".into()],
        base_list: bases.iter().map(|b| b.to_string()).collect(),
        ..Default::default()
    }))
    .with_children(members)
}

/// A class whose semantic base type is resolved to `base`.
pub fn derived_class(name: &str, namespace: &str, base: &str, members: Vec<SyntaxNode>) -> SyntaxNode {
    let short = base.rsplit('.').next().unwrap_or(base);
    SyntaxNode::new(NodeKind::Class(TypeDeclaration {
        name: name.into(),
        modifiers: vec!["public".into()],
        base_list: vec![short.to_string()],
        semantic: Some(SemanticInfo {
            namespace: Some(namespace.into()),
            base_type: Some(base.into()),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .with_children(members)
}

pub fn method(name: &str, return_type: &str, body: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Method(MethodDeclaration {
        name: name.into(),
        modifiers: vec!["public".into()],
        return_type: return_type.into(),
        parameters: Vec::new(),
        has_body: true,
        semantic: None,
    }))
    .with_children(body)
}

pub fn ident(name: &str) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Identifier(IdentifierName {
        name: name.into(),
        semantic: None,
    }))
}

pub fn member(target: SyntaxNode, name: &str) -> SyntaxNode {
    SyntaxNode::new(NodeKind::MemberAccess(MemberAccess {
        name: name.into(),
        semantic: None,
    }))
    .with_child(target)
}

/// `callee(args)` with the given semantic info.
pub fn call(callee: SyntaxNode, semantic: Option<SemanticInfo>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Invocation(Invocation { semantic })).with_child(callee)
}

pub fn new_object(type_name: &str, semantic: Option<SemanticInfo>, args: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::ObjectCreation(ObjectCreation {
        type_name: type_name.into(),
        semantic,
    }))
    .with_children(args)
}

/// Wrap an expression as a statement.
pub fn stmt(expression: SyntaxNode) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Other(OtherNode {
        kind: "expression_statement".into(),
        suffix: ";".into(),
        ..Default::default()
    }))
    .with_child(expression)
}

/// Give every node a distinct span, in pre-order.
pub fn with_spans(mut root: SyntaxNode) -> SyntaxNode {
    fn assign(node: &mut SyntaxNode, next: &mut usize) {
        let start = *next;
        *next += 10;
        for child in &mut node.children {
            assign(child, next);
        }
        node.span = TextSpan::new(start, *next);
        *next += 1;
    }
    let mut next = 0;
    assign(&mut root, &mut next);
    root
}

pub fn cs(path: &str, root: SyntaxNode) -> SyntaxTree {
    SyntaxTree::new(path, Dialect::CSharp, with_spans(root))
}

pub fn vb(path: &str, root: SyntaxNode) -> SyntaxTree {
    SyntaxTree::new(path, Dialect::VisualBasic, with_spans(root))
}

pub fn index(tokens: Vec<Token>) -> RuleIndex {
    let mut builder = RuleIndex::builder();
    builder.add_all(tokens).expect("valid tokens");
    builder.build()
}

/// Nest `depth` identifiers inside one another.
pub fn deep_chain(depth: usize) -> SyntaxNode {
    let mut node = ident("leaf");
    for i in 1..depth {
        node = SyntaxNode::new(NodeKind::Other(OtherNode {
            kind: format!("paren{i}"),
            prefix: "(".into(),
            suffix: ")".into(),
            ..Default::default()
        }))
        .with_child(node);
    }
    node
}
