//! Reporters: output formats for solution results.

pub mod console;
pub mod json;
pub mod summary;

pub use summary::FileSummary;

use crate::orchestrator::SolutionResult;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, result: &SolutionResult) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "json" => Some(Box::new(json::JsonReporter)),
        "console" => Some(Box::new(console::ConsoleReporter)),
        _ => None,
    }
}

pub fn available_formats() -> &'static [&'static str] {
    &["json", "console"]
}
