//! Errors produced by action transformation closures.

use super::error_code::{self, UpliftErrorCode};

/// Failure of a single action's transformation against one node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("{message}")]
    Failed { message: String },

    #[error("Expected {expected} node, found {found}")]
    UnexpectedNode { expected: String, found: String },

    #[error("Transformation panicked: {message}")]
    Panicked { message: String },
}

impl TransformError {
    /// Shorthand for a plain failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedNode {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl UpliftErrorCode for TransformError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Panicked { .. } => error_code::TRANSFORM_PANIC,
            _ => error_code::TRANSFORM_ERROR,
        }
    }
}
