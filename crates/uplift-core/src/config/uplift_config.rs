//! Top-level uplift configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{EngineConfig, RunConfig};
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`UPLIFT_*`)
/// 3. Project config (`uplift.toml` in the solution root)
/// 4. User config (`~/.uplift/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UpliftConfig {
    pub engine: EngineConfig,
    pub run: RunConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_depth: Option<usize>,
    pub max_workers: Option<usize>,
    pub mock_run: Option<bool>,
    pub target_versions: Option<Vec<String>>,
}

impl UpliftConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &UpliftConfig) -> Result<(), ConfigError> {
        if config.engine.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "engine.max_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.run.target_versions.iter().any(|v| v.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "run.target_versions".to_string(),
                message: "target versions must not be blank".to_string(),
            });
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut UpliftConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: UpliftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only values present in `other` win.
    fn merge(base: &mut UpliftConfig, other: &UpliftConfig) {
        if other.engine.max_depth.is_some() {
            base.engine.max_depth = other.engine.max_depth;
        }
        if other.engine.max_workers.is_some() {
            base.engine.max_workers = other.engine.max_workers;
        }
        if other.engine.validate.is_some() {
            base.engine.validate = other.engine.validate;
        }

        if other.run.mock_run.is_some() {
            base.run.mock_run = other.run.mock_run;
        }
        if !other.run.target_versions.is_empty() {
            base.run.target_versions = other.run.target_versions.clone();
        }
        if other.run.ide_edits.is_some() {
            base.run.ide_edits = other.run.ide_edits;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `UPLIFT_ENGINE_MAX_DEPTH`, `UPLIFT_RUN_MOCK`, etc.
    fn apply_env_overrides(config: &mut UpliftConfig) {
        if let Ok(val) = std::env::var("UPLIFT_ENGINE_MAX_DEPTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.engine.max_depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var("UPLIFT_ENGINE_MAX_WORKERS") {
            if let Ok(v) = val.parse::<usize>() {
                config.engine.max_workers = Some(v);
            }
        }
        if let Ok(val) = std::env::var("UPLIFT_RUN_MOCK") {
            if let Ok(v) = val.parse::<bool>() {
                config.run.mock_run = Some(v);
            }
        }
        if let Ok(val) = std::env::var("UPLIFT_RUN_TARGET_VERSIONS") {
            let targets: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !targets.is_empty() {
                config.run.target_versions = targets;
            }
        }
    }

    fn apply_cli_overrides(config: &mut UpliftConfig, cli: &CliOverrides) {
        if let Some(v) = cli.max_depth {
            config.engine.max_depth = Some(v);
        }
        if let Some(v) = cli.max_workers {
            config.engine.max_workers = Some(v);
        }
        if let Some(v) = cli.mock_run {
            config.run.mock_run = Some(v);
        }
        if let Some(ref v) = cli.target_versions {
            config.run.target_versions = v.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
