//! Expression actions: invocations, member and element access, object
//! creation.

use uplift_core::errors::TransformError;

use super::expect_category;
use crate::rules::{Action, Category};
use crate::syntax::{NodeKind, SyntaxFactory, SyntaxNode};

/// Rename the method an invocation calls: `a.Foo(x)` becomes `a.Bar(x)`.
pub fn rename_invoked_method(key: &str, new_name: &str) -> Action {
    let name = new_name.to_string();
    Action::new(
        Category::Invocation,
        "RenameInvokedMethod",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| {
            expect_category(&node, Category::Invocation)?;
            let callee = node
                .children
                .first_mut()
                .ok_or_else(|| TransformError::failed("invocation has no callee"))?;
            if !matches!(callee.kind, NodeKind::MemberAccess(_) | NodeKind::Identifier(_)) {
                return Err(TransformError::unexpected("method name", callee.kind.name()));
            }
            callee.set_name(name.as_str());
            Ok(node)
        },
    )
    .with_value(new_name)
    .with_description(format!("Rename invoked method to {new_name}"))
}

/// Replace the matched invocation, member access, or element access with
/// raw expression text. Leading comments survive.
pub fn replace_with_expression(category: Category, key: &str, expression: &str) -> Action {
    let text = expression.to_string();
    Action::new(
        category,
        format!("Replace{category}"),
        key,
        move |factory: &SyntaxFactory, mut node: SyntaxNode| {
            expect_category(&node, category)?;
            let mut replacement = factory.expression(text.as_str()).with_span(node.span);
            replacement.leading_comments = std::mem::take(&mut node.leading_comments);
            Ok(replacement)
        },
    )
    .with_value(expression)
    .with_description(format!("Replace with {expression}"))
}

/// `new Old(args)` becomes `new New(args)`.
pub fn replace_object_creation_type(key: &str, new_type: &str) -> Action {
    let type_name = new_type.to_string();
    Action::new(
        Category::ObjectCreation,
        "ReplaceObjectCreationType",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| match &mut node.kind {
            NodeKind::ObjectCreation(creation) => {
                creation.type_name = type_name.clone();
                Ok(node)
            }
            other => Err(TransformError::unexpected("object_creation", other.name())),
        },
    )
    .with_value(new_type)
    .with_description(format!("Replace created type with {new_type}"))
}
