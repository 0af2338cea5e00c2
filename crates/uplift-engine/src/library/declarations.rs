//! Declaration actions: renames, base types, attributes, return types.

use uplift_core::errors::TransformError;

use super::expect_category;
use crate::rules::{Action, Category};
use crate::syntax::{NodeKind, SyntaxFactory, SyntaxNode, TypeDeclaration};

/// Rename the matched class, interface, method, namespace, attribute, or
/// identifier.
pub fn rename(category: Category, key: &str, new_name: &str) -> Action {
    let name = new_name.to_string();
    Action::new(
        category,
        format!("Rename{category}"),
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| {
            expect_category(&node, category)?;
            if !node.set_name(name.as_str()) {
                return Err(TransformError::failed(format!(
                    "{} nodes cannot be renamed",
                    node.kind.name()
                )));
            }
            Ok(node)
        },
    )
    .with_value(new_name)
    .with_description(format!("Rename {} to {new_name}", category.name().to_lowercase()))
}

pub fn replace_base_type(category: Category, key: &str, old: &str, new: &str) -> Action {
    let (old_base, new_base) = (old.to_string(), new.to_string());
    Action::new(
        category,
        "ReplaceBaseType",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| {
            let decl = type_declaration(&mut node, category)?;
            let Some(slot) = decl.base_list.iter_mut().find(|b| is_same_type(b, &old_base)) else {
                return Err(TransformError::failed(format!(
                    "'{}' does not derive from {old_base}",
                    decl.name
                )));
            };
            *slot = new_base.clone();
            if let Some(semantic) = decl.semantic.as_mut() {
                semantic.base_type = None;
            }
            Ok(node)
        },
    )
    .with_value(new)
    .with_description(format!("Replace base type {old} with {new}"))
}

pub fn add_base_type(category: Category, key: &str, base: &str) -> Action {
    let base_name = base.to_string();
    Action::new(
        category,
        "AddBaseType",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| {
            let decl = type_declaration(&mut node, category)?;
            if !decl.base_list.iter().any(|b| is_same_type(b, &base_name)) {
                decl.base_list.push(base_name.clone());
            }
            Ok(node)
        },
    )
    .with_value(base)
    .with_description(format!("Add base type {base}"))
}

pub fn remove_base_type(category: Category, key: &str, base: &str) -> Action {
    let base_name = base.to_string();
    Action::new(
        category,
        "RemoveBaseType",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| {
            let decl = type_declaration(&mut node, category)?;
            decl.base_list.retain(|b| !is_same_type(b, &base_name));
            Ok(node)
        },
    )
    .with_value(base)
    .with_description(format!("Remove base type {base}"))
}

/// Add `[name(args)]` to the matched declaration, after any existing
/// attributes.
pub fn add_attribute(category: Category, key: &str, name: &str, args: &[&str]) -> Action {
    let attr_name = name.to_string();
    let attr_args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    Action::new(
        category,
        "AddAttribute",
        key,
        move |factory: &SyntaxFactory, mut node: SyntaxNode| {
            expect_category(&node, category)?;
            if node.attributes().any(|a| a.name() == Some(attr_name.as_str())) {
                return Ok(node);
            }
            let arg_refs: Vec<&str> = attr_args.iter().map(String::as_str).collect();
            let at = node.attributes().count();
            node.children
                .insert(at, factory.attribute(attr_name.as_str(), &arg_refs));
            Ok(node)
        },
    )
    .with_value(name)
    .with_description(format!("Add attribute {name}"))
}

pub fn remove_attribute(category: Category, key: &str, name: &str) -> Action {
    let attr_name = name.to_string();
    Action::new(
        category,
        "RemoveAttribute",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| {
            expect_category(&node, category)?;
            node.children.retain(|c| {
                !(matches!(c.kind, NodeKind::Attribute(_)) && c.name() == Some(attr_name.as_str()))
            });
            Ok(node)
        },
    )
    .with_value(name)
    .with_description(format!("Remove attribute {name}"))
}

pub fn change_return_type(key: &str, new_type: &str) -> Action {
    let return_type = new_type.to_string();
    Action::new(
        Category::Method,
        "ChangeReturnType",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| match &mut node.kind {
            NodeKind::Method(method) => {
                method.return_type = return_type.clone();
                Ok(node)
            }
            other => Err(TransformError::unexpected("method", other.name())),
        },
    )
    .with_value(new_type)
    .with_description(format!("Change return type to {new_type}"))
}

fn type_declaration(
    node: &mut SyntaxNode,
    category: Category,
) -> Result<&mut TypeDeclaration, TransformError> {
    match (&mut node.kind, category) {
        (NodeKind::Class(decl), Category::Class) | (NodeKind::Interface(decl), Category::Interface) => {
            Ok(decl)
        }
        (other, _) => Err(TransformError::unexpected(category.name(), other.name())),
    }
}

/// `System.Web.Mvc.Controller` and `Controller` name the same type.
fn is_same_type(written: &str, wanted: &str) -> bool {
    written == wanted
        || wanted.rsplit('.').next() == Some(written)
        || written.rsplit('.').next() == Some(wanted)
}
