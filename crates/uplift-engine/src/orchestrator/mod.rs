//! File/project and solution orchestration.
//!
//! Files of a project and projects of a solution run on one bounded rayon
//! pool. Per-file results merge into a `DashMap` keyed by path; project-level
//! steps run serially once every file is done.

pub mod file;
pub mod incremental;
pub mod manifest;
pub mod persistence;
pub mod project;
pub mod solution;
pub mod types;

pub use file::{process_file, FileOutcome};
pub use incremental::{FileEdits, IncrementalRunner};
pub use manifest::{ManifestMutator, ManifestPreview};
pub use persistence::{FsPersistence, Persistence};
pub use project::ProjectRunner;
pub use solution::SolutionRunner;
pub use types::{
    FileResult, ProjectActionOutcome, ProjectActions, ProjectInput, ProjectResult, SolutionResult,
};
