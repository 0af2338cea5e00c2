//! Import/using actions. These run once per file against the root.

use glob::Pattern;

use uplift_core::errors::RuleError;

use crate::rules::{Action, Category};
use crate::syntax::{NodeKind, SyntaxFactory, SyntaxNode};

pub fn add_using(key: &str, namespace: &str) -> Action {
    let name = namespace.to_string();
    Action::new(
        Category::Using,
        "AddUsing",
        key,
        move |factory: &SyntaxFactory, mut root: SyntaxNode| {
            let mut present = false;
            visit_usings(&mut root, &mut |using| present |= using.name() == Some(name.as_str()));
            if !present {
                let at = root
                    .children
                    .iter()
                    .take_while(|c| matches!(c.kind, NodeKind::Using(_)))
                    .count();
                root.children.insert(at, factory.using_directive(name.as_str()));
            }
            Ok(root)
        },
    )
    .with_value(namespace)
    .with_description(format!("Add using {namespace}"))
}

pub fn remove_using(key: &str, namespace: &str) -> Action {
    let name = namespace.to_string();
    Action::new(
        Category::Using,
        "RemoveUsing",
        key,
        move |_: &SyntaxFactory, mut root: SyntaxNode| {
            retain_usings(&mut root, &|using| using.name() != Some(name.as_str()));
            Ok(root)
        },
    )
    .with_value(namespace)
    .with_description(format!("Remove using {namespace}"))
}

/// Remove every import whose name matches the glob `pattern`.
pub fn remove_usings_matching(key: &str, pattern: &str) -> Result<Action, RuleError> {
    let compiled = Pattern::new(pattern).map_err(|e| RuleError::InvalidWildcard {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;
    Ok(Action::new(
        Category::Using,
        "RemoveUsingsMatching",
        key,
        move |_: &SyntaxFactory, mut root: SyntaxNode| {
            retain_usings(&mut root, &|using| {
                !using.name().is_some_and(|n| compiled.matches(n))
            });
            Ok(root)
        },
    )
    .with_value(pattern)
    .with_description(format!("Remove usings matching {pattern}")))
}

pub fn rename_using(key: &str, old: &str, new: &str) -> Action {
    let (old_name, new_name) = (old.to_string(), new.to_string());
    Action::new(
        Category::Using,
        "RenameUsing",
        key,
        move |_: &SyntaxFactory, mut root: SyntaxNode| {
            visit_usings(&mut root, &mut |using| {
                if using.name() == Some(old_name.as_str()) {
                    using.set_name(new_name.as_str());
                }
            });
            // A rename onto an existing import leaves a duplicate behind.
            let mut seen = Vec::new();
            dedup_usings(&mut root, &mut seen);
            Ok(root)
        },
    )
    .with_value(new)
    .with_description(format!("Rename using {old} to {new}"))
}

/// Visit imports at the root and inside namespaces.
fn visit_usings(node: &mut SyntaxNode, f: &mut dyn FnMut(&mut SyntaxNode)) {
    for child in node.children.iter_mut() {
        if matches!(child.kind, NodeKind::Using(_)) {
            f(child);
        } else if matches!(child.kind, NodeKind::Namespace { .. }) {
            visit_usings(child, f);
        }
    }
}

fn retain_usings(node: &mut SyntaxNode, keep: &dyn Fn(&SyntaxNode) -> bool) {
    node.children
        .retain(|c| !matches!(c.kind, NodeKind::Using(_)) || keep(c));
    for child in node.children.iter_mut() {
        if matches!(child.kind, NodeKind::Namespace { .. }) {
            retain_usings(child, keep);
        }
    }
}

fn dedup_usings(node: &mut SyntaxNode, seen: &mut Vec<String>) {
    node.children.retain(|c| match &c.kind {
        NodeKind::Using(using) if using.alias.is_none() => {
            if seen.contains(&using.name) {
                false
            } else {
                seen.push(using.name.clone());
                true
            }
        }
        _ => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::printer::render;
    use crate::syntax::Dialect;

    fn unit(f: &SyntaxFactory, names: &[&str]) -> SyntaxNode {
        let children = names.iter().map(|n| f.using_directive(*n)).collect();
        SyntaxNode::new(NodeKind::CompilationUnit).with_children(children)
    }

    #[test]
    fn test_add_using_appends_after_existing() {
        let f = SyntaxFactory::new(Dialect::CSharp);
        let action = add_using("System.Web.Mvc", "Microsoft.AspNetCore.Mvc");
        let root = action.apply(&f, unit(&f, &["System"])).unwrap();
        let root = action.apply(&f, root).unwrap();
        assert_eq!(
            render(&root, Dialect::CSharp),
            "using System;\nusing Microsoft.AspNetCore.Mvc;\n"
        );
    }

    #[test]
    fn test_remove_usings_matching_glob() {
        let f = SyntaxFactory::new(Dialect::VisualBasic);
        let action = remove_usings_matching("System.Web.*", "System.Web.*").unwrap();
        let root = action
            .apply(&f, unit(&f, &["System", "System.Web.Mvc", "System.Web.Http"]))
            .unwrap();
        assert_eq!(render(&root, Dialect::VisualBasic), "Imports System\n");
    }

    #[test]
    fn test_rename_using_onto_existing_dedups() {
        let f = SyntaxFactory::new(Dialect::CSharp);
        let action = rename_using("System.Web.Mvc", "System.Web.Mvc", "Microsoft.AspNetCore.Mvc");
        let root = action
            .apply(&f, unit(&f, &["Microsoft.AspNetCore.Mvc", "System.Web.Mvc"]))
            .unwrap();
        assert_eq!(render(&root, Dialect::CSharp), "using Microsoft.AspNetCore.Mvc;\n");
    }
}
