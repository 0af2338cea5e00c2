//! Incremental runs for editor integration.

use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use uplift_core::errors::{PipelineError, PipelineResult};

use super::project::ProjectRunner;
use super::types::{FileResult, ProjectActions};
use crate::rewriter::{IdeFileAction, Rewriter};
use crate::rules::Action;
use crate::syntax::SyntaxTree;

/// Editor edits for one re-processed file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileEdits {
    pub path: PathBuf,
    pub edits: Vec<IdeFileAction>,
}

/// Keeps a project's per-file results current as files change. Never writes
/// to disk; callers receive edits instead.
pub struct IncrementalRunner {
    runner: ProjectRunner,
    results: ProjectActions,
}

impl IncrementalRunner {
    pub fn new(runner: ProjectRunner) -> Self {
        Self {
            runner,
            results: ProjectActions::new(),
        }
    }

    /// Start from the results of a full run.
    pub fn with_results(runner: ProjectRunner, results: Vec<FileResult>) -> Self {
        let this = Self::new(runner);
        for result in results {
            this.results.upsert(result);
        }
        this
    }

    /// Re-run the engine for `files`. Each file's entry is replaced, or
    /// removed when it no longer matches anything.
    pub fn run(&self, files: &[SyntaxTree]) -> PipelineResult<Vec<FileEdits>> {
        let want_edits = self.runner.config().run.effective_ide_edits();
        let errors: Vec<PipelineError> = self.runner.pool().install(|| {
            files
                .par_iter()
                .flat_map_iter(|tree| {
                    self.results.remove(&tree.path);
                    self.runner
                        .process_isolated(tree, false, want_edits, &self.results)
                })
                .collect()
        });

        let mut result = PipelineResult::new(Vec::new());
        result.errors = errors;
        for tree in files {
            let edits = self
                .results
                .get(&tree.path)
                .map(|file| file.ide_edits)
                .unwrap_or_default();
            result.data.push(FileEdits {
                path: tree.path.clone(),
                edits,
            });
        }
        result
    }

    /// Preview a single action against a tree without recording anything.
    pub fn preview(&self, tree: &SyntaxTree, action: &Action) -> Vec<IdeFileAction> {
        Rewriter::from_config(&self.runner.config().engine)
            .rewrite_single(tree, action)
            .ide_edits
    }

    /// Current results, sorted by path.
    pub fn results(&self) -> Vec<FileResult> {
        self.results.to_sorted_vec()
    }
}
