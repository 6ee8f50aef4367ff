//! Migration command

use anyhow::{Context, Result};
use relayctl_core::RelayctlConfig;

use super::{connect, DbArgs};

/// Apply pending migrations and exit
pub async fn run_migrate(args: DbArgs, config: &RelayctlConfig) -> Result<()> {
    let pool = connect(config, &args).await?;

    relayctl_server::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations applied");
    Ok(())
}
