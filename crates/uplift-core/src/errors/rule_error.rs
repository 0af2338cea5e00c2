//! Rule index construction errors.

use super::error_code::{self, UpliftErrorCode};

/// Errors raised while building a rule index from loaded tokens.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid wildcard key '{pattern}': {message}")]
    InvalidWildcard { pattern: String, message: String },

    #[error("Wildcard key '{key}' is only allowed for imports, not {category}")]
    WildcardNotSupported { category: String, key: String },

    #[error("Empty identity key for {category} token")]
    EmptyKey { category: String },
}

impl UpliftErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
