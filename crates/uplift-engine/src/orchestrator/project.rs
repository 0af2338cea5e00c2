//! Project orchestration: files in parallel, then project-level steps in
//! order.

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error, field, info, info_span, warn};

use uplift_core::config::UpliftConfig;
use uplift_core::constants::WORKER_STACK_SIZE;
use uplift_core::errors::{ConfigError, PipelineError, PipelineResult, ProjectError};
use uplift_core::tracing::metrics;
use uplift_core::types::FxHashSet;

use super::file::process_file;
use super::manifest::{ManifestMutator, ManifestPreview};
use super::persistence::{FsPersistence, Persistence};
use super::types::{FileResult, ProjectActionOutcome, ProjectActions, ProjectInput, ProjectResult};
use crate::rewriter::visit::panic_message;
use crate::rewriter::GenericActionExecution;
use crate::rules::{PackageAction, ProjectContext, ProjectLevelAction, ProjectType, RuleIndex};
use crate::syntax::SyntaxTree;

/// Runs the engine over projects. Cheap to clone: every clone shares the
/// rule index, the worker pool, and the collaborators.
#[derive(Clone)]
pub struct ProjectRunner {
    index: Arc<RuleIndex>,
    config: Arc<UpliftConfig>,
    pool: Arc<ThreadPool>,
    manifest: Arc<dyn ManifestMutator>,
    persistence: Arc<dyn Persistence>,
}

impl ProjectRunner {
    /// Build a runner with its own worker pool sized by
    /// `engine.max_workers` (0 = one per core).
    pub fn new(index: Arc<RuleIndex>, config: UpliftConfig) -> Result<Self, ConfigError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.engine.effective_max_workers())
            .thread_name(|i| format!("uplift-worker-{i}"))
            .stack_size(WORKER_STACK_SIZE)
            .build()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "engine.max_workers".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            index,
            config: Arc::new(config),
            pool: Arc::new(pool),
            manifest: Arc::new(ManifestPreview),
            persistence: Arc::new(FsPersistence),
        })
    }

    pub fn with_manifest(mut self, manifest: Arc<dyn ManifestMutator>) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn config(&self) -> &UpliftConfig {
        &self.config
    }

    pub fn index(&self) -> &RuleIndex {
        &self.index
    }

    pub(crate) fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    /// Migrate one project. File failures are recorded and the file left
    /// out; they never abort the project.
    pub fn run(&self, project: &ProjectInput) -> PipelineResult<ProjectResult> {
        let span = info_span!(
            "project",
            name = %project.name,
            files_with_actions = field::Empty,
            actions_executed = field::Empty,
            executions_with_error = field::Empty,
            invalid_executions = field::Empty,
            project_actions_run = field::Empty,
        );
        let _guard = span.enter();

        let aggregate = ProjectActions::new();
        let persist = !self.config.run.effective_mock_run();
        let ide_edits = self.config.run.full_run_ide_edits();
        let errors: Vec<PipelineError> = self.pool.install(|| {
            project
                .files
                .par_iter()
                .flat_map_iter(|tree| self.process_isolated(tree, persist, ide_edits, &aggregate))
                .collect()
        });
        let mut result = PipelineResult::new(ProjectResult {
            name: project.name.clone(),
            manifest_path: project.manifest_path.clone(),
            ..Default::default()
        });
        result.errors = errors;

        let files = aggregate.into_sorted_vec();
        let (packages, project_types, project_level_actions) = collect_project_cargo(&files);
        let context = ProjectContext {
            project_name: project.name.clone(),
            manifest_path: project.manifest_path.clone(),
            target_versions: self.config.run.effective_target_versions(),
            project_types: project_types.iter().copied().collect(),
            mock_run: !persist,
        };
        let outcomes =
            self.run_project_actions(&context, &packages, &project_level_actions, &mut result);

        span.record(metrics::FILES_WITH_ACTIONS, files.len());
        span.record(
            metrics::ACTIONS_EXECUTED,
            files.iter().map(|f| f.executions.len()).sum::<usize>(),
        );
        span.record(
            metrics::EXECUTIONS_WITH_ERROR,
            sum_executions(&files, |e| e.executions_with_error),
        );
        span.record(
            metrics::INVALID_EXECUTIONS,
            sum_executions(&files, |e| e.invalid_executions),
        );
        span.record(metrics::PROJECT_ACTIONS_RUN, outcomes.len());
        info!(files = files.len(), errors = result.error_count(), "project migrated");

        result.data.files = files;
        result.data.packages = packages;
        result.data.project_types = project_types;
        result.data.project_actions = outcomes;
        result
    }

    /// Process one file with panics contained. Returns the file's non-fatal
    /// errors; a failed file is left out of `aggregate`.
    pub(crate) fn process_isolated(
        &self,
        tree: &SyntaxTree,
        persist: bool,
        ide_edits: bool,
        aggregate: &ProjectActions,
    ) -> Vec<PipelineError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let outcome = process_file(&self.index, &self.config.engine, tree, ide_edits);
            if let (true, Some(result)) = (persist, outcome.result.as_ref()) {
                self.persistence.write(&result.path, &result.rewritten_text)?;
            } else if outcome.result.is_some() {
                debug!(path = %tree.path.display(), "mock run, not persisting");
            }
            Ok::<_, ProjectError>(outcome)
        }));

        let failure = match outcome {
            Ok(Ok(outcome)) => {
                if let Some(result) = outcome.result {
                    aggregate.upsert(result);
                }
                return outcome.node_errors.into_iter().map(PipelineError::from).collect();
            }
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        error!(path = %tree.path.display(), error = %failure, "file processing failed");
        vec![PipelineError::FileFailed {
            path: tree.path.clone(),
            message: failure,
        }]
    }

    /// Manifest rewrite, then package merge, then project-level actions in
    /// declared order. One step failing does not stop the rest.
    fn run_project_actions(
        &self,
        context: &ProjectContext,
        packages: &[PackageAction],
        actions: &[ProjectLevelAction],
        result: &mut PipelineResult<ProjectResult>,
    ) -> Vec<ProjectActionOutcome> {
        let mut outcomes = Vec::with_capacity(actions.len() + 2);
        let mut step = |name: &str, run: &dyn Fn() -> Result<String, ProjectError>| {
            let ran = panic::catch_unwind(AssertUnwindSafe(run)).unwrap_or_else(|payload| {
                Err(ProjectError::ActionFailed {
                    name: name.to_string(),
                    message: panic_message(payload.as_ref()),
                })
            });
            match ran {
                Ok(summary) => outcomes.push(ProjectActionOutcome {
                    name: name.to_string(),
                    result: Some(summary),
                    error: None,
                }),
                Err(e) => {
                    warn!(action = name, error = %e, "project action failed");
                    outcomes.push(ProjectActionOutcome {
                        name: name.to_string(),
                        result: None,
                        error: Some(e.to_string()),
                    });
                    result.add_error(e.into());
                }
            }
        };

        step("RewriteManifest", &|| self.manifest.rewrite_manifest(context));
        step("MergePackages", &|| self.manifest.merge_packages(context, packages));
        for action in actions.iter().filter(|a| a.applies_to(&context.project_types)) {
            step(action.name.as_str(), &|| action.run(context));
        }
        outcomes
    }
}

/// Packages deduplicated by name (first seen wins), the union of detected
/// project types, and project-level actions deduplicated by name.
fn collect_project_cargo(
    files: &[FileResult],
) -> (Vec<PackageAction>, BTreeSet<ProjectType>, Vec<ProjectLevelAction>) {
    let mut packages = Vec::new();
    let mut package_names = FxHashSet::default();
    let mut project_types = BTreeSet::new();
    let mut actions: Vec<ProjectLevelAction> = Vec::new();

    for file in files {
        for package in &file.actions.packages {
            if package_names.insert(package.name.clone()) {
                packages.push(package.clone());
            }
        }
        project_types.extend(file.actions.project_types.iter().copied());
        for action in &file.actions.project_level_actions {
            if !actions.iter().any(|a| a.name == action.name) {
                actions.push(action.clone());
            }
        }
    }
    (packages, project_types, actions)
}

fn sum_executions(
    files: &[FileResult],
    counter: impl Fn(&GenericActionExecution) -> u32,
) -> u32 {
    files
        .iter()
        .flat_map(|f| f.executions.iter())
        .map(counter)
        .sum()
}
