//! qiwi-bill
//!
//! Command-line access to the QIWI bill payments API.

mod commands;
mod config;

use clap::Parser;
use commands::Command;
use config::ConfigLoader;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// qiwi-bill - create, inspect, cancel and refund QIWI bills
#[derive(Parser, Debug)]
#[command(name = "qiwi-bill")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./qiwi-config.toml")]
    config: PathBuf,

    /// Override the secret key from the configuration file
    #[arg(long, env = "QIWI_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let loader = ConfigLoader::new(&cli.config, cli.secret_key);
    let config = loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::debug!("Configuration loaded from {:?}", cli.config);

    commands::run(cli.command, &config).await.map_err(|e| {
        tracing::error!("Command failed: {}", e);
        e
    })
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
