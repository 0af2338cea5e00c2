//! Shared constants for the uplift engine.

/// uplift version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default recursion bound for the matcher and rewriter.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default worker count (0 = let rayon pick).
pub const DEFAULT_MAX_WORKERS: usize = 0;

/// Stack size of each engine worker thread. Matching and rewriting recurse
/// up to `max_depth` levels; everything past the bound is iterative.
pub const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Default target framework moniker for manifest rewrites.
pub const DEFAULT_TARGET_VERSION: &str = "net8.0";

/// Glob marker recognised in import/using rule keys.
pub const WILDCARD_MARKER: char = '*';

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "uplift.toml";

/// User-level config directory under the home directory.
pub const CONFIG_DIR_NAME: &str = ".uplift";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "UPLIFT_LOG";

/// Fallback tracing filter when `UPLIFT_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "uplift=info";
