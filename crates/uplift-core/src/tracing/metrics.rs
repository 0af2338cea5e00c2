//! Structured span field names.
//!
//! Orchestrator spans declare these fields empty and record them once a
//! phase completes, so log queries can aggregate across runs.

/// Project: number of files that produced at least one action.
pub const FILES_WITH_ACTIONS: &str = "files_with_actions";

/// Project/file: executions attempted.
pub const ACTIONS_EXECUTED: &str = "actions_executed";

/// Project/file: executions whose transformation failed.
pub const EXECUTIONS_WITH_ERROR: &str = "executions_with_error";

/// Project/file: executions that ran but failed validation.
pub const INVALID_EXECUTIONS: &str = "invalid_executions";

/// Project: project-level actions attempted.
pub const PROJECT_ACTIONS_RUN: &str = "project_actions_run";
