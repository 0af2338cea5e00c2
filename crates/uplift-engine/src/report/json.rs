//! JSON reporter.

use serde_json::{json, Value};

use uplift_core::constants::VERSION;

use super::summary::FileSummary;
use super::Reporter;
use crate::orchestrator::{ProjectResult, SolutionResult};

pub struct JsonReporter;

impl JsonReporter {
    fn project(project: &ProjectResult) -> Value {
        let mut totals = FileSummary::default();
        let files: Vec<Value> = project
            .files
            .iter()
            .map(|file| {
                let summary = FileSummary::from_executions(&file.executions);
                totals.merge(summary);
                json!({
                    "path": file.path.display().to_string(),
                    "summary": summary,
                    "executions": file.executions,
                })
            })
            .collect();

        json!({
            "name": project.name,
            "manifest": project.manifest_path.display().to_string(),
            "project_types": project.project_types,
            "packages": project.packages,
            "project_actions": project.project_actions,
            "summary": totals,
            "files": files,
        })
    }
}

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, result: &SolutionResult) -> Result<String, String> {
        let projects: Vec<Value> = result.projects.iter().map(Self::project).collect();
        let output = json!({ "version": VERSION, "projects": projects });
        serde_json::to_string_pretty(&output).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
