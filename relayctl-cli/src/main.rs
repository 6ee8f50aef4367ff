//! relayctl CLI - RFID scan logging and relay toggling backend
//!
//! - `serve`: HTTP API for scanners and relay controllers
//! - `migrate`: apply database migrations
//! - `status`: print relay states
//! - `scan`: process one tag from the command line
//! - `logs`: show recent scans

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::DbArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "relayctl",
    author,
    version,
    about = "Log RFID scans and toggle the scanning user's relays",
    long_about = "Backend for RFID door/relay controllers. Scanners post tags; every scan is \
                  logged and, when the tag belongs to a user, all of that user's relays are \
                  toggled in a single transaction."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.relayctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (relay-status, insert-rfid-data, health)
    Serve(commands::serve::ServeArgs),
    /// Apply pending database migrations and exit
    Migrate(DbArgs),
    /// Print relay statuses as JSON
    Status(DbArgs),
    /// Process one RFID scan and print the outcome
    Scan(commands::scan::ScanArgs),
    /// Show recent scan log entries
    Logs(commands::logs::LogsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env may carry RUST_LOG, so it is read before the subscriber exists
    let env_files = config::load_dotenv();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    for path in &env_files {
        tracing::debug!("Loaded .env from {}", path.display());
    }
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, &config).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args, &config).await,
        Commands::Status(args) => commands::status::run_status(args, &config).await,
        Commands::Scan(args) => commands::scan::run_scan(args, &config).await,
        Commands::Logs(args) => commands::logs::run_logs(args, &config).await,
    }
}
