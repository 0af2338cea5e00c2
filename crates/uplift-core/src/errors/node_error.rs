//! Errors for malformed or unreachable syntax nodes.

use super::error_code::{self, UpliftErrorCode};

/// Problems with a single input node. Always recovered at the node's scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("Malformed {kind} node '{identifier}': {message}")]
    Malformed {
        kind: String,
        identifier: String,
        message: String,
    },

    #[error("Recursion depth {depth} exceeded at {kind} node '{identifier}'")]
    DepthExceeded {
        depth: usize,
        kind: String,
        identifier: String,
    },
}

impl UpliftErrorCode for NodeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => error_code::NODE_ERROR,
            Self::DepthExceeded { .. } => error_code::DEPTH_EXCEEDED,
        }
    }
}
