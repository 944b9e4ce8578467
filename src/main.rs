mod bootstrap;
mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use bootstrap::tracing::init_tracing_subscriber;
use bootstrap::{load_config, resolve_config, wire_dependencies, ConfigOverrides};
use cli::Cli;
use juke_core::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "Command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Pure load; missing file values are resolved below.
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::empty(),
    };

    let overrides = ConfigOverrides {
        backend_url: cli.backend_url.clone(),
        data_dir: cli.data_dir.clone(),
    };
    let resolved = resolve_config(&config, &overrides)?;

    let log_dir = (!cli.ephemeral).then_some(resolved.data_dir.as_path());
    if let Err(err) = init_tracing_subscriber(log_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }
    debug!(base_url = %resolved.base_url, data_dir = %resolved.data_dir.display(), "Configuration resolved");

    let deps = wire_dependencies(&resolved, cli.ephemeral).await?;
    commands::run(cli.command, &deps).await
}
