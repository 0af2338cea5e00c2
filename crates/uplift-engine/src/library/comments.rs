//! Comment actions.

use crate::rules::{Action, Category};
use crate::syntax::{NodeKind, SyntaxFactory, SyntaxNode};

/// Attach `comment` above the matched node. Works for every category;
/// for imports the comment lands on the first import of the file.
pub fn add_comment(category: Category, key: &str, comment: &str) -> Action {
    let text = comment.to_string();
    Action::new(
        category,
        "AddComment",
        key,
        move |_: &SyntaxFactory, mut node: SyntaxNode| {
            let target = if category == Category::Using {
                first_using(&mut node)
            } else {
                Some(&mut node)
            };
            if let Some(target) = target {
                if !target.leading_comments.contains(&text) {
                    target.leading_comments.push(text.clone());
                }
            }
            Ok(node)
        },
    )
    .with_value(comment)
    .with_description(format!("Add comment '{comment}'"))
}

fn first_using(root: &mut SyntaxNode) -> Option<&mut SyntaxNode> {
    if matches!(root.kind, NodeKind::Using(_)) {
        return Some(root);
    }
    root.children
        .iter_mut()
        .find(|c| matches!(c.kind, NodeKind::Using(_)))
}
