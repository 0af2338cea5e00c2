//! Action Executor / Rewriter.
//!
//! Re-descends the original tree bottom-up and applies each matched action
//! at the node whose site key it was stamped with. Visual Basic class and
//! interface blocks are looked up against the rule index during this pass.
//! A failing or panicking action is counted and skipped; it never aborts
//! the file.

pub mod execution;
pub mod ide;
pub mod visit;

pub use execution::{ExecutionLog, GenericActionExecution};
pub use ide::{IdeFileAction, TextChange};
pub use visit::{RewriteOutcome, Rewriter};
