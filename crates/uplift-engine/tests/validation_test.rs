//! Validator tests (T-VAL-01 through T-VAL-06).

mod common;

use common::*;
use uplift_core::config::EngineConfig;
use uplift_core::errors::TransformError;
use uplift_engine::library;
use uplift_engine::orchestrator::process_file;
use uplift_engine::rules::{Action, ActionValidation, Category, IdentityKey, Token};
use uplift_engine::syntax::SyntaxTree;

fn widget() -> SyntaxTree {
    cs(
        "Widget.cs",
        unit(vec![namespace("Contoso", vec![derived_class("Widget", "Contoso", "System.Web.Mvc.Controller", vec![])])]),
    )
}

fn run(action: Action) -> uplift_engine::orchestrator::FileResult {
    let idx = index(vec![Token::new(Category::Class, IdentityKey::qualified("System.Web.Mvc.Controller")).with_action(action)]);
    process_file(&idx, &EngineConfig::default(), &widget(), false).result.unwrap()
}

/// T-VAL-01: an action that leaves its own marker behind is invalid, not
/// erroring.
#[test]
fn test_not_contains_todo_marks_invalid() {
    let action = library::add_comment(Category::Class, "Controller", "TODO migrate filters")
        .with_validation(ActionValidation::not_contains("TODO").with_comments());
    let result = run(action);
    let execution = &result.executions[0];
    assert_eq!(execution.times_run, 1);
    assert_eq!(execution.invalid_executions, 1);
    assert_eq!(execution.executions_with_error, 0);
}

/// T-VAL-02: comments are ignored unless the assertion asks for them.
#[test]
fn test_comments_stripped_by_default() {
    let action = library::add_comment(Category::Class, "Controller", "TODO migrate filters")
        .with_validation(ActionValidation::not_contains("TODO"));
    let result = run(action);
    assert_eq!(result.executions[0].invalid_executions, 0);
}

/// T-VAL-03: `contains` compares with whitespace removed on both sides.
#[test]
fn test_contains_ignores_whitespace() {
    let action = library::replace_base_type(Category::Class, "Widget", "Controller", "ControllerBase")
        .with_validation(ActionValidation::contains("class Widget  :  ControllerBase"));
    let result = run(action);
    assert_eq!(result.executions[0].invalid_executions, 0);

    let wrong = library::replace_base_type(Category::Class, "Widget", "Controller", "ControllerBase")
        .with_validation(ActionValidation::contains("class Widget : ApiController"));
    assert_eq!(run(wrong).executions[0].invalid_executions, 1);
}

/// T-VAL-04: executions that errored are not validated.
#[test]
fn test_errored_executions_skip_validation() {
    let action = Action::new(Category::Class, "Explode", "Controller", |_, _| {
        Err(TransformError::failed("no"))
    })
    .with_validation(ActionValidation::contains("never present"));
    let result = run(action);
    assert_eq!(result.executions[0].executions_with_error, 1);
    assert_eq!(result.executions[0].invalid_executions, 0);
}

/// T-VAL-05: validation can be switched off in configuration.
#[test]
fn test_validation_disabled() {
    let idx = index(vec![Token::new(Category::Class, IdentityKey::qualified("System.Web.Mvc.Controller"))
        .with_action(library::add_comment(Category::Class, "Controller", "TODO")
            .with_validation(ActionValidation::not_contains("TODO").with_comments()))]);
    let config = EngineConfig {
        validate: Some(false),
        ..Default::default()
    };
    let result = process_file(&idx, &config, &widget(), false).result.unwrap();
    assert_eq!(result.executions[0].invalid_executions, 0);
}

/// T-VAL-06: an expected text made only of comments asserts nothing once
/// comments are stripped, so it is rejected instead of passing.
#[test]
fn test_comment_only_contains_is_rejected() {
    let action = library::add_comment(Category::Class, "Controller", "migrated")
        .with_validation(ActionValidation::contains("// migrated"));
    let result = run(action);
    assert_eq!(result.executions[0].times_run, 1);
    assert_eq!(result.executions[0].invalid_executions, 1);

    let kept = library::add_comment(Category::Class, "Controller", "migrated")
        .with_validation(ActionValidation::contains("// migrated").with_comments());
    assert_eq!(run(kept).executions[0].invalid_executions, 0);
}
