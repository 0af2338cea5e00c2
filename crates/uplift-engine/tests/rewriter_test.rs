//! Rewriter tests (T-RW-01 through T-RW-11).

mod common;

use common::*;
use uplift_core::errors::TransformError;
use uplift_engine::library;
use uplift_engine::matcher::{FileActions, TreeMatcher};
use uplift_engine::rewriter::Rewriter;
use uplift_engine::rules::{Action, Category, IdentityKey, Token};
use uplift_engine::syntax::{SyntaxFactory, SyntaxNode, SyntaxTree};

fn match_and_rewrite(tokens: Vec<Token>, tree: &SyntaxTree) -> (FileActions, uplift_engine::rewriter::RewriteOutcome) {
    let idx = index(tokens);
    let actions = TreeMatcher::new(&idx).match_tree(tree).file_actions.expect("file has actions");
    let outcome = Rewriter::new().rewrite(tree, &actions);
    (actions, outcome)
}

fn widget_tree() -> SyntaxTree {
    cs(
        "Widget.cs",
        unit(vec![
            using("System.Web.Mvc"),
            namespace("Contoso", vec![derived_class("Widget", "Contoso", "System.Web.Mvc.Controller", vec![
                method("Index", "ActionResult", vec![]),
            ])]),
        ]),
    )
}

/// T-RW-01: a closure returning an error is counted and leaves the node as
/// it was.
#[test]
fn test_failing_action_keeps_node() {
    let failing = Action::new(Category::Class, "Explode", "Controller", |_: &SyntaxFactory, _: SyntaxNode| {
        Err(TransformError::failed("cannot migrate"))
    });
    let tree = widget_tree();
    let (_, outcome) = match_and_rewrite(
        vec![Token::new(Category::Class, IdentityKey::qualified("System.Web.Mvc.Controller")).with_action(failing)],
        &tree,
    );

    let records = outcome.executions.into_vec();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].times_run, 1);
    assert_eq!(records[0].executions_with_error, 1);
    assert_eq!(records[0].key, "Widget");
    assert_eq!(outcome.tree.to_text(), tree.to_text());
}

/// T-RW-02: a panicking closure is contained and counted like an error.
#[test]
fn test_panicking_action_is_contained() {
    let panicking = Action::new(Category::Method, "Explode", "Index", |_: &SyntaxFactory, _: SyntaxNode| -> Result<SyntaxNode, TransformError> {
        panic!("closure bug")
    });
    let rename = library::rename(Category::Class, "Widget", "WidgetController");
    let tree = widget_tree();
    let (_, outcome) = match_and_rewrite(
        vec![
            Token::new(Category::Method, IdentityKey::symbol("Index", "Contoso", "Widget")).with_action(panicking),
            Token::new(Category::Class, IdentityKey::qualified("Contoso.Widget")).with_action(rename),
        ],
        &tree,
    );

    let records = outcome.executions.into_vec();
    let failed = records.iter().find(|r| r.name == "Explode").unwrap();
    assert_eq!(failed.executions_with_error, 1);
    assert!(failed.error.as_deref().unwrap().contains("closure bug"));
    let renamed = records.iter().find(|r| r.name == "RenameClass").unwrap();
    assert_eq!(renamed.executions_with_error, 0);
    assert!(outcome.tree.to_text().contains("class WidgetController : Controller"));
}

/// T-RW-03: import actions run after every node-level action, whatever the
/// position of the imports in the file.
#[test]
fn test_using_actions_run_last() {
    let tree = cs(
        "Widget.cs",
        unit(vec![
            namespace("Contoso", vec![derived_class("Widget", "Contoso", "System.Web.Mvc.Controller", vec![])]),
            using("System.Web.Mvc"),
        ]),
    );
    let (_, outcome) = match_and_rewrite(
        vec![
            Token::new(Category::Using, IdentityKey::name("System.Web.Mvc"))
                .with_action(library::rename_using("System.Web.Mvc", "System.Web.Mvc", "Microsoft.AspNetCore.Mvc")),
            Token::new(Category::Class, IdentityKey::qualified("System.Web.Mvc.Controller"))
                .with_action(library::replace_base_type(Category::Class, "Widget", "Controller", "ControllerBase")),
        ],
        &tree,
    );

    let categories: Vec<_> = outcome.executions.iter().map(|e| e.category).collect();
    assert_eq!(categories, vec![Category::Class, Category::Using]);
    let text = outcome.tree.to_text();
    assert!(text.contains("using Microsoft.AspNetCore.Mvc;"));
    assert!(text.contains("class Widget : ControllerBase"));
}

/// T-RW-04: name-bound actions report the concrete declaration they touched.
#[test]
fn test_name_bound_key_reports_site() {
    let tree = cs(
        "Controllers.cs",
        unit(vec![namespace("Contoso", vec![
            derived_class("Alpha", "Contoso", "System.Web.Mvc.Controller", vec![]),
            derived_class("Beta", "Contoso", "System.Web.Mvc.Controller", vec![]),
        ])]),
    );
    let (_, outcome) = match_and_rewrite(
        vec![Token::new(Category::Class, IdentityKey::qualified("System.Web.Mvc.Controller"))
            .with_action(library::add_comment(Category::Class, "Controller", "migrated"))],
        &tree,
    );
    let keys: Vec<_> = outcome.executions.iter().map(|e| e.key.clone()).collect();
    assert_eq!(keys, vec!["Alpha".to_string(), "Beta".to_string()]);
}

/// T-RW-05: repeated sites of one action fold into one record.
#[test]
fn test_repeated_sites_fold() {
    let def = "System.Web.Mvc.Controller.View()";
    let view = || stmt(call(ident("View"), Some(resolved(def, "System.Web.Mvc", "Controller"))));
    let tree = cs("A.cs", unit(vec![method("A", "ActionResult", vec![view(), view(), view()])]));
    let (actions, outcome) = match_and_rewrite(
        vec![Token::new(Category::Invocation, IdentityKey::symbol(def, "System.Web.Mvc", "Controller"))
            .with_action(library::rename_invoked_method(def, "Ok"))],
        &tree,
    );
    assert_eq!(actions.action_count(), 3);
    let records = outcome.executions.into_vec();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].times_run, 3);
    assert!(outcome.ide_edits.is_empty());

    let with_edits = Rewriter::new().with_ide_edits(true).rewrite(&tree, &actions);
    assert_eq!(with_edits.ide_edits.len(), 3);
}

/// T-RW-06: a successful object-creation action replaces the node; its
/// arguments are not visited.
#[test]
fn test_object_creation_suppresses_children() {
    let def = "System.Web.HttpCookie.HttpCookie(string)";
    let inner_def = "Legacy.Name()";
    let arg = call(ident("Name"), Some(resolved(inner_def, "Legacy", "Cookies")));
    let tree = cs("A.cs", unit(vec![stmt(new_object("HttpCookie", Some(resolved(def, "System.Web", "HttpCookie")), vec![arg]))]));

    let idx = index(vec![Token::new(Category::ObjectCreation, IdentityKey::symbol(def, "System.Web", "HttpCookie"))
        .with_action(library::replace_object_creation_type(def, "CookieOptions"))]);
    let mut actions = TreeMatcher::new(&idx).match_tree(&tree).file_actions.unwrap();
    // Force an invocation action for the argument into the bag.
    actions.insert(library::rename_invoked_method(inner_def, "NewName"));

    let outcome = Rewriter::new().rewrite(&tree, &actions);
    let text = outcome.tree.to_text();
    assert!(text.contains("new CookieOptions(Name())"));
    assert_eq!(outcome.executions.len(), 1);
}

/// T-RW-07: single-action mode applies only at the action's own site.
#[test]
fn test_rewrite_single_applies_at_span() {
    let def = "System.Web.Mvc.Controller.View()";
    let view = || stmt(call(ident("View"), Some(resolved(def, "System.Web.Mvc", "Controller"))));
    let tree = cs("A.cs", unit(vec![view(), view()]));
    let idx = index(vec![Token::new(Category::Invocation, IdentityKey::symbol(def, "System.Web.Mvc", "Controller"))
        .with_action(library::rename_invoked_method(def, "Ok"))]);
    let actions = TreeMatcher::new(&idx).match_tree(&tree).file_actions.unwrap();
    let second = actions.actions(Category::Invocation).unwrap().iter().nth(1).unwrap();

    let outcome = Rewriter::new().rewrite_single(&tree, second);
    assert_eq!(outcome.tree.to_text(), "View();\nOk();\n");
    assert_eq!(outcome.ide_edits.len(), 1);
    let edit = &outcome.ide_edits[0];
    assert_eq!(edit.span, second.text_span.unwrap());
    assert_eq!(edit.text_changes[0].new_text, "Ok()");
}

/// T-RW-08: the input tree is never modified.
#[test]
fn test_input_tree_unchanged() {
    let tree = widget_tree();
    let before = tree.clone();
    let _ = match_and_rewrite(
        vec![Token::new(Category::Class, IdentityKey::qualified("Contoso.Widget"))
            .with_action(library::rename(Category::Class, "Widget", "Gadget"))],
        &tree,
    );
    assert_eq!(tree, before);
}

/// T-RW-09: subtrees beyond the depth bound are copied unchanged.
#[test]
fn test_depth_bound_copies_subtree() {
    let tree = cs("Deep.cs", unit(vec![stmt(deep_chain(40))]));
    let mut actions = FileActions::new("Deep.cs", tree.dialect);
    actions.insert(library::add_comment(Category::Identifier, "leaf", "deep"));

    let outcome = Rewriter::new().with_max_depth(8).rewrite(&tree, &actions);
    assert_eq!(outcome.tree.root, tree.root);
    assert_eq!(outcome.node_errors.len(), 1);
    assert!(outcome.executions.is_empty());
}

/// T-RW-10: a method action applies only to the declaration it was matched
/// on, not to every method with the same name.
#[test]
fn test_same_named_methods_rewrite_only_match_site() {
    let tree = cs(
        "Controllers.cs",
        unit(vec![namespace("Contoso", vec![
            class("HomeController", &["Controller"], vec![method("Index", "ActionResult", vec![])]),
            class("Unrelated", &[], vec![method("Index", "void", vec![])]),
        ])]),
    );
    let (actions, outcome) = match_and_rewrite(
        vec![Token::new(Category::Method, IdentityKey::symbol("Index", "Contoso", "HomeController"))
            .with_action(library::rename(Category::Method, "Index", "IndexAsync"))],
        &tree,
    );

    assert_eq!(actions.action_count(), 1);
    let records = outcome.executions.into_vec();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].times_run, 1);
    let text = outcome.tree.to_text();
    assert_eq!(text.matches("IndexAsync").count(), 1);
    assert!(text.contains("public void Index()"));
}

/// T-RW-11: Visual Basic class blocks are looked up while rewriting, by
/// resolved base type.
#[test]
fn test_visual_basic_class_block_matched_at_rewrite() {
    let tree = vb(
        "HomeController.vb",
        unit(vec![namespace("Contoso", vec![derived_class(
            "HomeController",
            "Contoso",
            "System.Web.Mvc.Controller",
            vec![],
        )])]),
    );
    let idx = index(vec![Token::new(Category::Class, IdentityKey::qualified("System.Web.Mvc.Controller"))
        .with_action(library::add_comment(Category::Class, "Controller", "migrated"))]);
    assert!(TreeMatcher::new(&idx).match_tree(&tree).file_actions.is_none());

    let empty = FileActions::new(tree.path.clone(), tree.dialect);
    let outcome = Rewriter::new().rewrite_with_index(&tree, &empty, &idx);
    let records = outcome.executions.into_vec();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "HomeController");
    assert!(outcome.tree.to_text().contains("' migrated"));
    let found = outcome.type_block_actions.expect("class block matched");
    assert_eq!(found.action_count(), 1);
}
