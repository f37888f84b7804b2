//! CLI entrypoint for featurebase-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use featurebase_application::DispatchToolUseCase;
use featurebase_infrastructure::{
    ConfigLoader, FileConfig, HttpTransport, JsonSchemaToolConverter, default_catalogue,
};
use featurebase_presentation::{Cli, McpHandlers, McpServer};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stdout carries the protocol, so logs never go there
    let _guard = init_logging(&cli)?;

    if cli.show_config {
        return show_config(&cli);
    }

    let config = ConfigLoader::load(cli.config.as_deref(), &overrides(&cli))
        .context("Failed to load configuration")?
        .into_api_config()?;

    info!(
        base_url = config.base_url(),
        org_url = config.org_url().unwrap_or("-"),
        "Starting featurebase-mcp"
    );

    // === Dependency Injection ===
    let transport =
        HttpTransport::new(Arc::new(config)).context("Failed to build HTTP transport")?;
    let dispatcher = DispatchToolUseCase::new(Arc::new(default_catalogue()), Arc::new(transport));
    let handlers = McpHandlers::new(dispatcher, Arc::new(JsonSchemaToolConverter));

    McpServer::new(handlers)
        .run()
        .await
        .context("MCP server stopped with an I/O error")?;

    info!("Input closed, shutting down");
    Ok(())
}

/// CLI flags as the highest-priority configuration layer.
fn overrides(cli: &Cli) -> FileConfig {
    FileConfig {
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone(),
        org_url: cli.org_url.clone(),
    }
}

/// `RUST_LOG` wins over `-v`. Logs go to stderr and, with `--log-file`,
/// to that file as well.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false);

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn show_config(cli: &Cli) -> Result<()> {
    for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
        println!("{}", line);
    }
    println!();

    let effective = ConfigLoader::load(cli.config.as_deref(), &overrides(cli))
        .context("Failed to load configuration")?;
    let rendered = ConfigLoader::render_effective(&effective)
        .context("Failed to render configuration")?;
    println!("Effective configuration:");
    println!("{}", rendered);
    Ok(())
}
