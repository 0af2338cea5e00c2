//! Tree Matcher: finds rule hits in an annotated tree and accumulates the
//! matched actions per file.
//!
//! C# trees match every node kind; Visual Basic trees match namespaces,
//! imports, and invocations, with a generic-erasure retry for invocations.

pub mod context;
pub mod file_actions;
pub mod lookup;
pub mod site;
pub mod walker;

pub use context::MatchContext;
pub use file_actions::{ActionSet, FileActions};
pub use site::{erase_generics, node_category, site_key};
pub use walker::{MatchOutcome, TreeMatcher};
