//! Configuration loading for featurebase-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. CLI flags
//! 2. `FEATUREBASE_*` environment variables
//! 3. `--config <path>` specified file
//! 4. Project root: `./featurebase-mcp.toml`
//! 5. Global: `$XDG_CONFIG_HOME/featurebase-mcp/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig};
pub use loader::{ConfigLoader, ENV_PREFIX};
