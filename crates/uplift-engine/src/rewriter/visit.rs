//! Bottom-up rewriting of one tree with a file's matched actions.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use uplift_core::config::EngineConfig;
use uplift_core::constants::DEFAULT_MAX_DEPTH;
use uplift_core::errors::{NodeError, TransformError};
use uplift_core::types::FxHashSet;

use super::execution::{ExecutionLog, GenericActionExecution};
use super::ide::{IdeFileAction, TextChange};
use crate::matcher::lookup::visual_basic_type_block;
use crate::matcher::{node_category, site_key, ActionSet, FileActions, MatchContext};
use crate::rules::{Action, Category, RuleIndex};
use crate::syntax::printer::render_fragment;
use crate::syntax::{Dialect, NodeKind, SyntaxFactory, SyntaxNode, SyntaxTree, TextSpan};

/// A rewritten tree and what happened while producing it.
#[derive(Debug)]
pub struct RewriteOutcome {
    pub tree: SyntaxTree,
    pub executions: ExecutionLog,
    /// Empty unless edits were requested.
    pub ide_edits: Vec<IdeFileAction>,
    pub node_errors: Vec<NodeError>,
    /// Visual Basic class and interface hits found during the rewrite.
    pub type_block_actions: Option<FileActions>,
}

/// Applies matched actions to a tree. The input tree is never modified;
/// the output shares no structure with it.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter {
    max_depth: usize,
    ide_edits: bool,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ide_edits: false,
        }
    }
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_depth: config.effective_max_depth(),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render an IDE edit for every successful action.
    pub fn with_ide_edits(mut self, ide_edits: bool) -> Self {
        self.ide_edits = ide_edits;
        self
    }

    /// Apply every action in `actions` at the nodes whose site key matches.
    /// Import actions run last, once, against the file root.
    pub fn rewrite(&self, tree: &SyntaxTree, actions: &FileActions) -> RewriteOutcome {
        self.run(tree, actions, None, None, self.ide_edits)
    }

    /// Like [`Rewriter::rewrite`]; Visual Basic class and interface blocks
    /// are additionally looked up in `index` as they are visited.
    pub fn rewrite_with_index(
        &self,
        tree: &SyntaxTree,
        actions: &FileActions,
        index: &RuleIndex,
    ) -> RewriteOutcome {
        let index = (tree.dialect == Dialect::VisualBasic).then_some(index);
        self.run(tree, actions, index, None, self.ide_edits)
    }

    /// Apply exactly one action, always with its IDE edit. A stamped action
    /// only applies at its own match site.
    pub fn rewrite_single(&self, tree: &SyntaxTree, action: &Action) -> RewriteOutcome {
        let mut single = FileActions::new(tree.path.clone(), tree.dialect);
        single.insert(action.clone());
        self.run(tree, &single, None, action.text_span, true)
    }

    fn run(
        &self,
        tree: &SyntaxTree,
        actions: &FileActions,
        index: Option<&RuleIndex>,
        only_span: Option<TextSpan>,
        ide_edits: bool,
    ) -> RewriteOutcome {
        let mut visit = Visit {
            actions,
            index,
            type_blocks: FileActions::new(tree.path.clone(), tree.dialect),
            factory: SyntaxFactory::new(tree.dialect),
            max_depth: self.max_depth,
            only_span,
            ide_edits,
            log: ExecutionLog::default(),
            edits: Vec::new(),
            node_errors: Vec::new(),
        };

        let mut root = visit.node(&tree.root, &MatchContext::default(), 1);
        for action in visit.candidates(Category::Using, None, None) {
            root = visit.apply(root, &action).0;
        }

        debug!(
            path = %tree.path.display(),
            executions = visit.log.len(),
            type_block_actions = visit.type_blocks.action_count(),
            "rewrote file"
        );
        RewriteOutcome {
            tree: SyntaxTree::new(tree.path.clone(), tree.dialect, root),
            executions: visit.log,
            ide_edits: visit.edits,
            node_errors: visit.node_errors,
            type_block_actions: (!visit.type_blocks.is_empty()).then_some(visit.type_blocks),
        }
    }
}

struct Visit<'a> {
    actions: &'a FileActions,
    /// Set for Visual Basic trees only.
    index: Option<&'a RuleIndex>,
    type_blocks: FileActions,
    factory: SyntaxFactory,
    max_depth: usize,
    only_span: Option<TextSpan>,
    ide_edits: bool,
    log: ExecutionLog,
    edits: Vec<IdeFileAction>,
    node_errors: Vec<NodeError>,
}

impl Visit<'_> {
    fn node(&mut self, node: &SyntaxNode, ctx: &MatchContext, depth: usize) -> SyntaxNode {
        if depth > self.max_depth {
            let identifier = node.display_identifier();
            warn!(depth, kind = node.kind.name(), %identifier, "max depth reached, subtree copied unchanged");
            self.node_errors.push(NodeError::DepthExceeded {
                depth,
                kind: node.kind.name().to_string(),
                identifier,
            });
            return node.clone();
        }
        if let Err(e) = node.check_shape() {
            warn!(error = %e, "malformed node left unchanged");
            self.node_errors.push(e);
            return self.rebuild(node, ctx, depth);
        }

        // Keys are read from the original node, before any action renames it.
        let category = node_category(node);
        let key = site_key(node);
        if let Some(index) = self.index {
            let found = visual_basic_type_block(index, node, ctx);
            for token in &found.hits {
                self.type_blocks
                    .record_hit(token, node.span, category, key.as_deref());
            }
        }

        let candidates = match (category, key) {
            (Some(category), Some(key)) if category != Category::Using => {
                if self.only_span.is_some_and(|s| s != node.span) {
                    Vec::new()
                } else {
                    self.candidates(category, Some(&key), Some(node))
                }
            }
            _ => Vec::new(),
        };

        if matches!(node.kind, NodeKind::ObjectCreation(_)) && !candidates.is_empty() {
            let mut current = node.clone();
            let mut any = false;
            for action in &candidates {
                let (next, ok) = self.apply(current, action);
                current = next;
                any |= ok;
            }
            if any {
                return current;
            }
            return self.rebuild(node, ctx, depth);
        }

        let mut current = self.rebuild(node, ctx, depth);
        for action in &candidates {
            current = self.apply(current, action).0;
        }
        current
    }

    /// Copy of `node` with rewritten children.
    fn rebuild(&mut self, node: &SyntaxNode, ctx: &MatchContext, depth: usize) -> SyntaxNode {
        let entered = self.index.and_then(|_| ctx.enter(node));
        let child_ctx = entered.as_ref().unwrap_or(ctx);
        let children = node
            .children
            .iter()
            .map(|child| self.node(child, child_ctx, depth + 1))
            .collect();
        SyntaxNode {
            kind: node.kind.clone(),
            span: node.span,
            leading_comments: node.leading_comments.clone(),
            children,
        }
    }

    /// Actions of `category` stamped with `key` (any key when `None`) that
    /// may run at `at`, one per `(name, key, value)`.
    fn candidates(
        &self,
        category: Category,
        key: Option<&str>,
        at: Option<&SyntaxNode>,
    ) -> Vec<Action> {
        let mut seen = FxHashSet::default();
        [self.actions.actions(category), self.type_blocks.actions(category)]
            .into_iter()
            .flatten()
            .flat_map(ActionSet::iter)
            .filter(|a| key.map_or(true, |k| a.key == k))
            .filter(|a| at.map_or(true, |node| a.applies_at(node)))
            .filter(|a| seen.insert((a.name.as_str(), a.key.as_str(), a.value.as_str())))
            .cloned()
            .collect()
    }

    /// Apply one action. On error or panic the pre-transformation node is
    /// returned and the failure is counted.
    fn apply(&mut self, node: SyntaxNode, action: &Action) -> (SyntaxNode, bool) {
        let before = node.clone();
        let factory = self.factory;
        let result = panic::catch_unwind(AssertUnwindSafe(|| action.apply(&factory, node)))
            .unwrap_or_else(|payload| {
                Err(TransformError::Panicked {
                    message: panic_message(payload.as_ref()),
                })
            });

        match result {
            Ok(rewritten) => {
                self.log.record(GenericActionExecution::ran(action));
                if self.ide_edits {
                    self.edits.push(IdeFileAction {
                        span: action.text_span.unwrap_or(before.span),
                        description: action.description.clone(),
                        text_changes: vec![TextChange {
                            span: before.span,
                            new_text: render_fragment(&rewritten, self.factory.dialect()),
                        }],
                    });
                }
                (rewritten, true)
            }
            Err(e) => {
                warn!(action = %action.name, key = %action.key, error = %e, "action failed, node left unchanged");
                self.log
                    .record(GenericActionExecution::failed(action, e.to_string()));
                (before, false)
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
