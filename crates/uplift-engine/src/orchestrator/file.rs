//! Match, rewrite, and validate one file.

use tracing::{debug_span, field};

use uplift_core::config::EngineConfig;
use uplift_core::errors::NodeError;
use uplift_core::tracing::metrics;

use super::types::FileResult;
use crate::matcher::{FileActions, TreeMatcher};
use crate::rewriter::Rewriter;
use crate::rules::{Category, RuleIndex};
use crate::syntax::{Dialect, SyntaxTree};
use crate::validation::Validator;

#[derive(Debug)]
pub struct FileOutcome {
    /// `None` when nothing in the file matched.
    pub result: Option<FileResult>,
    pub node_errors: Vec<NodeError>,
}

/// Run the matcher and, on any hit, the rewriter and validator. Never
/// writes anything. Editor edits are rendered only when `ide_edits` is set.
pub fn process_file(
    index: &RuleIndex,
    config: &EngineConfig,
    tree: &SyntaxTree,
    ide_edits: bool,
) -> FileOutcome {
    let span = debug_span!(
        "file",
        path = %tree.path.display(),
        actions_executed = field::Empty,
        executions_with_error = field::Empty,
        invalid_executions = field::Empty,
    );
    let _guard = span.enter();

    let matched = TreeMatcher::from_config(index, config).match_tree(tree);
    let mut node_errors = matched.node_errors;
    // Visual Basic type blocks are only looked up while rewriting.
    let type_blocks = tree.dialect == Dialect::VisualBasic
        && (index.has_category(Category::Class) || index.has_category(Category::Interface));
    let mut actions = match matched.file_actions {
        Some(actions) => actions,
        None if type_blocks => FileActions::new(tree.path.clone(), tree.dialect),
        None => {
            return FileOutcome {
                result: None,
                node_errors,
            }
        }
    };

    let rewrite = Rewriter::from_config(config)
        .with_ide_edits(ide_edits)
        .rewrite_with_index(tree, &actions, index);
    node_errors.extend(rewrite.node_errors);
    if let Some(found) = rewrite.type_block_actions {
        actions.absorb(found);
    }
    if actions.is_empty() {
        return FileOutcome {
            result: None,
            node_errors,
        };
    }
    let rewritten_text = rewrite.tree.to_text();
    let mut executions = rewrite.executions;
    if config.effective_validate() {
        Validator::new(tree.dialect).validate(&mut executions, &rewritten_text);
    }
    let executions = executions.into_vec();

    span.record(metrics::ACTIONS_EXECUTED, executions.len());
    span.record(
        metrics::EXECUTIONS_WITH_ERROR,
        executions.iter().map(|e| e.executions_with_error).sum::<u32>(),
    );
    span.record(
        metrics::INVALID_EXECUTIONS,
        executions.iter().map(|e| e.invalid_executions).sum::<u32>(),
    );

    FileOutcome {
        result: Some(FileResult {
            path: tree.path.clone(),
            dialect: tree.dialect,
            actions,
            executions,
            rewritten_text,
            ide_edits: rewrite.ide_edits,
            node_errors: node_errors.clone(),
        }),
        node_errors,
    }
}
