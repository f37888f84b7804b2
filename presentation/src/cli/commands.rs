//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for featurebase-mcp
#[derive(Parser, Debug)]
#[command(name = "featurebase-mcp")]
#[command(author, version, about = "MCP server for the Featurebase feedback API")]
#[command(long_about = r#"
featurebase-mcp exposes the Featurebase REST API as MCP tools over stdio.

An MCP client starts this binary and talks JSON-RPC 2.0 on stdin/stdout,
one message per line. Logs go to stderr (and optionally --log-file).

Settings are merged from (lowest to highest priority):
1. Built-in defaults
2. ~/.config/featurebase-mcp/config.toml   Global config
3. ./featurebase-mcp.toml                   Project-level config
4. --config <path>                          Explicit config file
5. FEATUREBASE_API_KEY, FEATUREBASE_BASE_URL, FEATUREBASE_ORG_URL
6. Command-line flags

Example:
  featurebase-mcp --api-key sk_live_xxx --org-url https://feedback.example.com
  FEATUREBASE_API_KEY=sk_live_xxx featurebase-mcp -vv --log-file /tmp/fb.log
"#)]
pub struct Cli {
    /// Featurebase API key
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// REST API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Public organization URL, needed by slug resolution and similarity search
    #[arg(long, value_name = "URL")]
    pub org_url: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
