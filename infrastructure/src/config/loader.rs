//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables read by the loader.
pub const ENV_PREFIX: &str = "FEATUREBASE_";

const ENV_KEYS: [&str; 3] = ["api_key", "base_url", "org_url"];

const PROJECT_CONFIG_FILE: &str = "featurebase-mcp.toml";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. CLI flags (`overrides`)
    /// 2. `FEATUREBASE_API_KEY`, `FEATUREBASE_BASE_URL`, `FEATUREBASE_ORG_URL`
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./featurebase-mcp.toml`
    /// 5. Global: `$XDG_CONFIG_HOME/featurebase-mcp/config.toml`
    /// 6. Default values
    pub fn load(
        config_path: Option<&Path>,
        overrides: &FileConfig,
    ) -> Result<FileConfig, Box<figment::Error>> {
        Self::files(config_path)
            .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(Box::new)
    }

    /// Defaults plus every config file that exists, without env or flags.
    pub fn files(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// `$XDG_CONFIG_HOME/featurebase-mcp/config.toml`, falling back to the
    /// platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("featurebase-mcp").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Describe the config sources in priority order (for `--show-config`).
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        lines.push("  [     ] Flags:   --api-key, --base-url, --org-url".to_string());

        let env_set: Vec<String> = ENV_KEYS
            .iter()
            .map(|k| format!("{}{}", ENV_PREFIX, k.to_uppercase()))
            .filter(|var| std::env::var_os(var).is_some())
            .collect();
        if env_set.is_empty() {
            lines.push(format!("  [     ] Env:     {}*", ENV_PREFIX));
        } else {
            lines.push(format!("  [FOUND] Env:     {}", env_set.join(", ")));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{:<5}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE)),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }

    /// Effective configuration as TOML, with the API key masked.
    pub fn render_effective(config: &FileConfig) -> Result<String, toml::ser::Error> {
        toml::to_string(&config.redacted())
    }
}
