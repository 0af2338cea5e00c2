//! Rule Index, identity keys, tokens, and actions.

pub mod action;
pub mod category;
pub mod index;
pub mod key;
pub mod project;
pub mod token;
pub mod validation;

pub use action::{Action, ActionIdentity, NodeTransform};
pub use category::Category;
pub use index::{RuleIndex, RuleIndexBuilder};
pub use key::IdentityKey;
pub use project::{PackageAction, ProjectContext, ProjectLevelAction, ProjectTransform, ProjectType};
pub use token::Token;
pub use validation::ActionValidation;
