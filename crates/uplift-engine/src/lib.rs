//! uplift-engine: rule matching and tree rewriting for migrating
//! annotated C# and Visual Basic source trees.
//!
//! Rule Index → Tree Matcher → per-file actions → Rewriter → Validator,
//! fanned out over files and projects by the orchestrators.

pub mod library;
pub mod matcher;
pub mod orchestrator;
pub mod report;
pub mod rewriter;
pub mod rules;
pub mod syntax;
pub mod validation;
