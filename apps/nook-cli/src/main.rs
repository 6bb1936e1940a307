//! # Nook CLI
//!
//! Terminal client for the Nook community feed.

use std::process::ExitCode;

use clap::Parser;

mod commands;
mod config;
mod notifier;
mod state;
mod telemetry;

use commands::Command;
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[derive(Parser, Debug)]
#[command(name = "nook", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    let state = AppState::new(&config).await?;

    match commands::run(cli.command, &state).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            commands::report(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}
