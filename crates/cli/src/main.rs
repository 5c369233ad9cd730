//! RecipeBox CLI - browse and manage recipes from the terminal
//!
//! Results are written to stdout as pretty-printed JSON; diagnostics go
//! through `tracing` to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Commands;
use recipebox_common::observability::init_tracing;
use recipebox_infra::{config, ClientContext};
use tracing::debug;

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Share and discover recipes")]
#[command(version)]
struct Cli {
    /// Configuration file (JSON or TOML). Falls back to the environment
    /// and the standard config locations when omitted.
    #[arg(short = 'c', long, global = true, env = "RECIPEBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Override the API base URL from the loaded configuration
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Override the log filter (e.g. `debug`, `recipebox_infra=trace`)
    #[arg(short = 'l', long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn load_config(&self) -> Result<recipebox_domain::Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from_file(Some(path.clone()))
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => config::load().context("Failed to load configuration")?,
        };

        if let Some(url) = &self.api_url {
            config.api.base_url.clone_from(url);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be installed yet when configuration fails
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    init_tracing(&config.logging).context("Failed to initialize logging")?;

    debug!(base_url = %config.api.base_url, "Starting RecipeBox CLI");

    let context = ClientContext::from_config(&config).context("Failed to build API client")?;
    cli.command.execute(&context).await
}
