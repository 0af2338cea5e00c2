//! UpliftErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable code string that
/// report consumers can match on without parsing messages.
pub trait UpliftErrorCode {
    /// Returns the error code string (e.g., "RULE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const RULE_ERROR: &str = "RULE_ERROR";
pub const TRANSFORM_ERROR: &str = "TRANSFORM_ERROR";
pub const TRANSFORM_PANIC: &str = "TRANSFORM_PANIC";
pub const NODE_ERROR: &str = "NODE_ERROR";
pub const DEPTH_EXCEEDED: &str = "DEPTH_EXCEEDED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MANIFEST_ERROR: &str = "MANIFEST_ERROR";
pub const PROJECT_ACTION_ERROR: &str = "PROJECT_ACTION_ERROR";
pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
pub const FILE_FAILED: &str = "FILE_FAILED";
pub const PROJECT_FAILED: &str = "PROJECT_FAILED";
