//! uplift-core: errors, configuration, tracing, collections, and constants
//! shared by every uplift crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
