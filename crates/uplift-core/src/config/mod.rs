//! Configuration system for uplift.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod engine_config;
pub mod run_config;
pub mod uplift_config;

pub use engine_config::EngineConfig;
pub use run_config::RunConfig;
pub use uplift_config::{CliOverrides, UpliftConfig};
