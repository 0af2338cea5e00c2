//! Per-file execution summaries.

use serde::Serialize;

use crate::rewriter::GenericActionExecution;

/// Attempted vs. succeeded vs. failed vs. invalid executions of one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub invalid: u32,
}

impl FileSummary {
    pub fn from_executions(executions: &[GenericActionExecution]) -> Self {
        executions.iter().fold(Self::default(), |mut acc, e| {
            acc.attempted += e.times_run;
            acc.failed += e.executions_with_error;
            acc.invalid += e.invalid_executions;
            acc.succeeded += e
                .times_run
                .saturating_sub(e.executions_with_error + e.invalid_executions);
            acc
        })
    }

    pub fn merge(&mut self, other: FileSummary) {
        self.attempted += other.attempted;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.invalid += other.invalid;
    }
}
