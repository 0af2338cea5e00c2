//! End-to-end migration scenarios through the project runner (T-SCN-01
//! through T-SCN-04).

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::*;
use uplift_core::config::{RunConfig, UpliftConfig};
use uplift_core::errors::TransformError;
use uplift_engine::library;
use uplift_engine::orchestrator::{ProjectInput, ProjectResult, ProjectRunner};
use uplift_engine::rules::*;
use uplift_engine::syntax::SyntaxTree;

fn run(tokens: Vec<Token>, tree: SyntaxTree) -> ProjectResult {
    let config = UpliftConfig {
        run: RunConfig {
            mock_run: Some(true),
            ..Default::default()
        },
        ..Default::default()
    };
    let runner = ProjectRunner::new(Arc::new(index(tokens)), config).unwrap();
    let result = runner.run(&ProjectInput::new("Contoso.Api", "Contoso.Api.csproj").with_file(tree));
    assert!(result.is_clean(), "unexpected errors: {:?}", result.errors);
    result.data
}

/// T-SCN-01: a `ControllerBase` subclass gets the Web API class action and
/// project actions; view-result (MVC) actions stay out.
#[test]
fn test_web_api_controller() {
    const API_BASE: &str = "System.Web.Http.ControllerBase";
    const MVC_BASE: &str = "System.Web.Mvc.Controller";
    let tokens = vec![
        Token::new(Category::Class, IdentityKey::qualified(API_BASE))
            .with_action(library::add_attribute(Category::Class, API_BASE, "ApiController", &[]))
            .with_project_type(ProjectType::WebApi)
            .with_project_action(
                ProjectLevelAction::new("AddWebApiRouting", |_| Ok("routing added".into()))
                    .for_project_type(ProjectType::WebApi),
            )
            .with_project_action(
                ProjectLevelAction::new("AddViewResultSupport", |_| Ok("views added".into()))
                    .for_project_type(ProjectType::Mvc),
            ),
        Token::new(Category::Class, IdentityKey::qualified(MVC_BASE))
            .with_action(library::add_comment(Category::Class, MVC_BASE, "return View() needs Razor"))
            .with_project_type(ProjectType::Mvc),
    ];
    let tree = cs(
        "Controllers/Widget.cs",
        unit(vec![namespace(
            "Contoso.Api",
            vec![derived_class("Widget", "Contoso.Api", API_BASE, vec![method("Get", "string", vec![])])],
        )]),
    );

    let result = run(tokens, tree);
    let file = result.file("Controllers/Widget.cs").unwrap();
    let class_actions: Vec<_> = file.actions.actions(Category::Class).unwrap().iter().collect();
    assert_eq!(class_actions.len(), 1);
    assert_eq!(class_actions[0].name, "AddAttribute");
    assert_eq!(class_actions[0].key, "Widget");
    assert!(file.rewritten_text.contains("[ApiController]"));
    assert!(!file.rewritten_text.contains("Razor"));

    assert_eq!(result.project_types, BTreeSet::from([ProjectType::WebApi]));
    let steps: Vec<_> = result.project_actions.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(steps, vec!["RewriteManifest", "MergePackages", "AddWebApiRouting"]);
}

/// T-SCN-02: an invocation with an empty definition records nothing, even
/// with a rule for its exact text.
#[test]
fn test_unresolved_invocation_is_ignored() {
    let def = "Contoso.Legacy.Helpers.Format(string)";
    let tokens = vec![Token::new(Category::Invocation, IdentityKey::symbol(def, "Contoso.Legacy", "Helpers"))
        .with_action(library::rename_invoked_method(def, "FormatInvariant"))];
    let unresolved = resolved("", "Contoso.Legacy", "Helpers");
    let tree = cs(
        "Legacy.cs",
        unit(vec![class(
            "Caller",
            &[],
            vec![method(
                "Run",
                "void",
                vec![stmt(call(member(ident("Helpers"), "Format"), Some(unresolved)))],
            )],
        )]),
    );

    let result = run(tokens, tree);
    assert!(result.files.is_empty());
}

/// T-SCN-03: a failing closure is counted once and the file text is
/// unchanged.
#[test]
fn test_failing_action_leaves_text_unchanged() {
    let action = Action::new(Category::Class, "Explode", "Widget", |_, _| {
        Err(TransformError::failed("base list is read-only"))
    });
    let tokens = vec![Token::new(Category::Class, IdentityKey::qualified("Contoso.Widget")).with_action(action)];
    let tree = cs("Widget.cs", unit(vec![namespace("Contoso", vec![class("Widget", &[], vec![])])]));
    let original = tree.to_text();

    let result = run(tokens, tree);
    let file = &result.files[0];
    assert_eq!(file.executions.len(), 1);
    assert_eq!(file.executions[0].times_run, 1);
    assert_eq!(file.executions[0].executions_with_error, 1);
    assert_eq!(file.rewritten_text, original);
}

/// T-SCN-04: an action that leaves "TODO" behind despite a `not_contains`
/// assertion is invalid, not erroring.
#[test]
fn test_todo_left_behind_is_invalid() {
    let action = library::replace_base_type(Category::Class, "Widget", "ApiController", "TODO")
        .with_validation(ActionValidation::not_contains("TODO"));
    let tokens = vec![Token::new(Category::Class, IdentityKey::qualified("ApiController")).with_action(action)];
    let tree = cs(
        "Widget.cs",
        unit(vec![namespace("Contoso", vec![class("Widget", &["ApiController"], vec![])])]),
    );

    let result = run(tokens, tree);
    let execution = &result.files[0].executions[0];
    assert_eq!(execution.times_run, 1);
    assert_eq!(execution.invalid_executions, 1);
    assert_eq!(execution.executions_with_error, 0);
}
