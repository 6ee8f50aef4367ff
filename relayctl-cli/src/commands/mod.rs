//! Subcommand implementations

pub mod logs;
pub mod migrate;
pub mod scan;
pub mod serve;
pub mod status;

use anyhow::{Context, Result};
use clap::Args;
use relayctl_core::RelayctlConfig;
use sqlx::PgPool;

/// Database selection shared by every subcommand that connects
#[derive(Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Open a pool using the flag, environment, or config file URL.
pub async fn connect(config: &RelayctlConfig, args: &DbArgs) -> Result<PgPool> {
    let url = match args.database_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => url,
        None => config.database.require_url()?,
    };

    relayctl_server::create_pool(url, &config.database)
        .await
        .context("Failed to create database pool")
}
