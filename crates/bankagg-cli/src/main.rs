//! bankagg - account-aggregation CLI - entry point.

use anyhow::Result;
use bankagg_cli::{AppConfig, Application, Command};
use clap::Parser;
use tracing::info;

/// Account-aggregation client over a remote banking API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via BANKAGG_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    bankagg_cli::telemetry::init_logging();

    let config = AppConfig::load(args.config.as_deref())?;
    info!(base_url = %config.base_url, "Configuration loaded");

    let app = Application::new(config)?;
    app.run(args.command).await?;

    Ok(())
}
