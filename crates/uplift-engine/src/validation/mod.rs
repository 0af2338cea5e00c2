//! Validator: flips executions that ran but produced the wrong shape to
//! invalid.

pub mod normalize;
pub mod validator;

pub use normalize::{collapse_whitespace, normalize, strip_comments};
pub use validator::Validator;
