//! Plain-text reporter for terminals.

use std::fmt::Write;

use super::summary::FileSummary;
use super::Reporter;
use crate::orchestrator::SolutionResult;

#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, result: &SolutionResult) -> Result<String, String> {
        let mut out = String::new();
        for project in &result.projects {
            let _ = writeln!(out, "{} ({} files)", project.name, project.files.len());
            for file in &project.files {
                let s = FileSummary::from_executions(&file.executions);
                let _ = writeln!(
                    out,
                    "  {}: {} attempted, {} succeeded, {} failed, {} invalid",
                    file.path.display(),
                    s.attempted,
                    s.succeeded,
                    s.failed,
                    s.invalid
                );
            }
            for step in &project.project_actions {
                let status = match &step.error {
                    Some(e) => format!("failed: {e}"),
                    None => "ok".to_string(),
                };
                let _ = writeln!(out, "  [{}] {status}", step.name);
            }
        }
        Ok(out)
    }
}
