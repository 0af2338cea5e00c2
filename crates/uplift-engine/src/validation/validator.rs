//! Post-rewrite assertion checks.

use tracing::warn;

use super::normalize::normalize;
use crate::rewriter::ExecutionLog;
use crate::rules::ActionValidation;
use crate::syntax::Dialect;

/// Checks executions that ran cleanly against their actions' assertions.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    dialect: Dialect,
}

impl Validator {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Mark executions whose assertions fail on `text` as invalid. Returns
    /// the number of executions marked.
    pub fn validate(&self, log: &mut ExecutionLog, text: &str) -> usize {
        let mut texts = NormalizedText::new(text, self.dialect);
        let mut invalid = 0;
        for execution in log.iter_mut() {
            if execution.executions_with_error != 0 {
                continue;
            }
            let Some(validation) = execution.validation.as_ref().filter(|v| !v.is_empty()) else {
                continue;
            };
            if let Some(reason) = self.check(validation, &mut texts) {
                warn!(
                    action = %execution.name,
                    key = %execution.key,
                    %reason,
                    "action output failed validation"
                );
                execution.invalid_executions = 1;
                invalid += 1;
            }
        }
        invalid
    }

    fn check(&self, validation: &ActionValidation, texts: &mut NormalizedText<'_>) -> Option<String> {
        let keep = validation.check_comments;
        let haystack = texts.get(keep).to_string();
        if let Some(expected) = &validation.contains {
            let needle = normalize(expected, self.dialect, keep);
            // An empty needle would match any output.
            if needle.is_empty() {
                return Some(format!("expected text '{expected}' is empty once normalized"));
            }
            if !haystack.contains(&needle) {
                return Some(format!("missing expected text '{expected}'"));
            }
        }
        if let Some(forbidden) = &validation.not_contains {
            let needle = normalize(forbidden, self.dialect, keep);
            if !needle.is_empty() && haystack.contains(&needle) {
                return Some(format!("found forbidden text '{forbidden}'"));
            }
        }
        None
    }
}

/// The rewritten text in both normal forms, computed on first use.
struct NormalizedText<'t> {
    raw: &'t str,
    dialect: Dialect,
    stripped: Option<String>,
    with_comments: Option<String>,
}

impl<'t> NormalizedText<'t> {
    fn new(raw: &'t str, dialect: Dialect) -> Self {
        Self {
            raw,
            dialect,
            stripped: None,
            with_comments: None,
        }
    }

    fn get(&mut self, keep_comments: bool) -> &str {
        let (raw, dialect) = (self.raw, self.dialect);
        let slot = if keep_comments {
            &mut self.with_comments
        } else {
            &mut self.stripped
        };
        slot.get_or_insert_with(|| normalize(raw, dialect, keep_comments))
    }
}
