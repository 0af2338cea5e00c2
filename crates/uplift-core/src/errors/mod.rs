//! Error handling for uplift.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod node_error;
pub mod pipeline_error;
pub mod project_error;
pub mod rule_error;
pub mod transform_error;

pub use config_error::ConfigError;
pub use error_code::UpliftErrorCode;
pub use node_error::NodeError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use project_error::ProjectError;
pub use rule_error::RuleError;
pub use transform_error::TransformError;
