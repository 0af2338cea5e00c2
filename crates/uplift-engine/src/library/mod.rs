//! Built-in actions.
//!
//! Rule definitions reference these by name instead of carrying their own
//! closures. Every constructor returns an unstamped [`Action`] template.

pub mod comments;
pub mod declarations;
pub mod expressions;
pub mod usings;

use uplift_core::errors::TransformError;

use crate::matcher::node_category;
use crate::rules::{Action, Category};
use crate::syntax::SyntaxNode;

pub use comments::add_comment;
pub use declarations::{
    add_attribute, add_base_type, change_return_type, remove_attribute, remove_base_type,
    rename, replace_base_type,
};
pub use expressions::{rename_invoked_method, replace_object_creation_type, replace_with_expression};
pub use usings::{add_using, remove_using, remove_usings_matching, rename_using};

/// Fail unless `node` is of the kind `category` acts on.
pub(crate) fn expect_category(node: &SyntaxNode, category: Category) -> Result<(), TransformError> {
    if node_category(node) == Some(category) {
        Ok(())
    } else {
        Err(TransformError::unexpected(category.name(), node.kind.name()))
    }
}

/// Look up a built-in action by name. `args` are the action's value
/// arguments in declaration order.
pub fn by_name(name: &str, category: Category, key: &str, args: &[&str]) -> Option<Action> {
    let arg = |i: usize| args.get(i).copied();
    let action = match name {
        "AddComment" => add_comment(category, key, arg(0)?),
        "Rename" => rename(category, key, arg(0)?),
        "ReplaceBaseType" => replace_base_type(category, key, arg(0)?, arg(1)?),
        "AddBaseType" => add_base_type(category, key, arg(0)?),
        "RemoveBaseType" => remove_base_type(category, key, arg(0)?),
        "AddAttribute" => add_attribute(category, key, arg(0)?, args.get(1..).unwrap_or_default()),
        "RemoveAttribute" => remove_attribute(category, key, arg(0)?),
        "ChangeReturnType" => change_return_type(key, arg(0)?),
        "AddUsing" => add_using(key, arg(0)?),
        "RemoveUsing" => remove_using(key, arg(0)?),
        "RemoveUsingsMatching" => remove_usings_matching(key, arg(0)?).ok()?,
        "RenameUsing" => rename_using(key, arg(0)?, arg(1)?),
        "RenameInvokedMethod" => rename_invoked_method(key, arg(0)?),
        "ReplaceWithExpression" => replace_with_expression(category, key, arg(0)?),
        "ReplaceObjectCreationType" => replace_object_creation_type(key, arg(0)?),
        _ => return None,
    };
    Some(action)
}
