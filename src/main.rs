use anyhow::{Context, Result};
use clap::Parser;
use intransparency::cli::{handle_command, Cli};
use intransparency::core::ConfigManager;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let json_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(json_layer)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("intransparency=info,rocket=warn")),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load(cli.config.as_deref())?;
    init_tracing(config.server.log_file.as_deref())?;

    match &config.config_file {
        Some(path) => info!(
            "Configuration loaded from {} (environment: {}, search service: {})",
            path.display(),
            config.environment,
            config.service.search_url
        ),
        None => info!(
            "Configuration loaded from environment variables (environment: {}, search service: {})",
            config.environment, config.service.search_url
        ),
    }

    handle_command(cli.command, config).await
}
