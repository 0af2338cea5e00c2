//! Solution orchestration: projects in parallel on the shared pool.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{error, info, info_span};

use uplift_core::errors::{PipelineError, PipelineResult};

use super::project::ProjectRunner;
use super::types::{ProjectInput, ProjectResult, SolutionResult};
use crate::rewriter::visit::panic_message;

/// Runs every project of a solution. Projects share nothing mutable; each
/// yields its own result.
#[derive(Clone)]
pub struct SolutionRunner {
    runner: ProjectRunner,
}

impl SolutionRunner {
    pub fn new(runner: ProjectRunner) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &ProjectRunner {
        &self.runner
    }

    pub fn run(&self, projects: &[ProjectInput]) -> PipelineResult<SolutionResult> {
        let span = info_span!("solution", projects = projects.len());
        let _guard = span.enter();

        let outcomes: Vec<Result<PipelineResult<ProjectResult>, PipelineError>> =
            self.runner.pool().install(|| {
                projects
                    .par_iter()
                    .map(|project| {
                        panic::catch_unwind(AssertUnwindSafe(|| self.runner.run(project)))
                            .map_err(|payload| PipelineError::ProjectFailed {
                                name: project.name.clone(),
                                message: panic_message(payload.as_ref()),
                            })
                    })
                    .collect()
            });

        let mut result = PipelineResult::new(SolutionResult::default());
        for outcome in outcomes {
            match outcome {
                Ok(project) => {
                    result.errors.extend(project.errors);
                    result.data.projects.push(project.data);
                }
                Err(e) => {
                    error!(error = %e, "project failed");
                    result.add_error(e);
                }
            }
        }
        info!(
            projects = result.data.projects.len(),
            errors = result.error_count(),
            "solution migrated"
        );
        result
    }
}
