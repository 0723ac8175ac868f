use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use porage::{config::Config, server, trace};
use tracing::info;

#[derive(Parser)]
#[command(name = "porage", about = "Porage server application")]
struct Opts {
    /// Path to the TOML configuration file.
    #[arg(short = 'c', long = "config")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let config = Config::from_path(&opts.config)
        .with_context(|| format!("failed to load config {}", opts.config.display()))?;

    trace::init(&config.log).context("failed to initialize logging")?;

    server::run(config, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal.");
        return;
    }
    info!("Shutdown signal received.");
}
