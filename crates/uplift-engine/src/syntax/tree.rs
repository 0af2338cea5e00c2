//! A parsed, annotated source file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::node::{Dialect, NodeKind, SyntaxNode};
use super::printer;

/// One source file as supplied by the external parser/analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub path: PathBuf,
    #[serde(default)]
    pub dialect: Dialect,
    pub root: SyntaxNode,
}

impl SyntaxTree {
    pub fn new(path: impl Into<PathBuf>, dialect: Dialect, root: SyntaxNode) -> Self {
        Self {
            path: path.into(),
            dialect,
            root,
        }
    }

    /// An empty compilation unit.
    pub fn empty(path: impl Into<PathBuf>, dialect: Dialect) -> Self {
        Self::new(path, dialect, SyntaxNode::new(NodeKind::CompilationUnit))
    }

    /// Serialize the tree back to source text.
    pub fn to_text(&self) -> String {
        printer::render(&self.root, self.dialect)
    }

    /// Deserialize a tree produced by an external analyzer.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
