//! Depth-first, depth-bounded walk of one annotated tree.

use tracing::{debug, warn};

use uplift_core::config::EngineConfig;
use uplift_core::constants::DEFAULT_MAX_DEPTH;
use uplift_core::errors::NodeError;

use super::context::MatchContext;
use super::file_actions::FileActions;
use super::lookup::{self, NodeMatch};
use super::site::{node_category, site_key};
use crate::rules::RuleIndex;
use crate::syntax::{Dialect, SyntaxNode, SyntaxTree};

type LookupFn = for<'i> fn(&'i RuleIndex, &SyntaxNode, &MatchContext) -> NodeMatch<'i>;

/// Result of matching one file.
#[derive(Debug)]
pub struct MatchOutcome {
    /// `None` when the file matched nothing.
    pub file_actions: Option<FileActions>,
    /// Nodes that could not be matched. Never fatal.
    pub node_errors: Vec<NodeError>,
}

/// Finds every node in a tree whose identity has an entry in the index.
#[derive(Debug, Clone, Copy)]
pub struct TreeMatcher<'a> {
    index: &'a RuleIndex,
    max_depth: usize,
}

impl<'a> TreeMatcher<'a> {
    pub fn new(index: &'a RuleIndex) -> Self {
        Self {
            index,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn from_config(index: &'a RuleIndex, config: &EngineConfig) -> Self {
        Self {
            index,
            max_depth: config.effective_max_depth(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Match one file. The tree is never modified.
    pub fn match_tree(&self, tree: &SyntaxTree) -> MatchOutcome {
        let lookup: LookupFn = match tree.dialect {
            Dialect::CSharp => lookup::csharp,
            Dialect::VisualBasic => lookup::visual_basic,
        };
        let mut walk = Walk {
            index: self.index,
            max_depth: self.max_depth,
            lookup,
            actions: FileActions::new(tree.path.clone(), tree.dialect),
            node_errors: Vec::new(),
        };
        walk.visit(&tree.root, &MatchContext::default(), 1);

        debug!(
            path = %tree.path.display(),
            actions = walk.actions.action_count(),
            node_errors = walk.node_errors.len(),
            "matched file"
        );
        MatchOutcome {
            file_actions: (!walk.actions.is_empty()).then_some(walk.actions),
            node_errors: walk.node_errors,
        }
    }
}

struct Walk<'a> {
    index: &'a RuleIndex,
    max_depth: usize,
    lookup: LookupFn,
    actions: FileActions,
    node_errors: Vec<NodeError>,
}

impl Walk<'_> {
    fn visit(&mut self, node: &SyntaxNode, ctx: &MatchContext, depth: usize) {
        if depth > self.max_depth {
            let identifier = node.display_identifier();
            warn!(depth, kind = node.kind.name(), %identifier, "max depth reached, subtree not matched");
            self.node_errors.push(NodeError::DepthExceeded {
                depth,
                kind: node.kind.name().to_string(),
                identifier,
            });
            return;
        }

        let mut skip_children = false;
        match node.check_shape() {
            Ok(()) => {
                let found = (self.lookup)(self.index, node, ctx);
                if !found.is_empty() {
                    let category = node_category(node);
                    let key = site_key(node);
                    for token in &found.hits {
                        self.actions
                            .record_hit(token, node.span, category, key.as_deref());
                    }
                }
                skip_children = found.skip_children;
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed node");
                self.node_errors.push(e);
            }
        }
        if skip_children {
            return;
        }

        let entered = ctx.enter(node);
        let child_ctx = entered.as_ref().unwrap_or(ctx);
        for child in &node.children {
            self.visit(child, child_ctx, depth + 1);
        }
    }
}
