//! Relay status command
//!
//! Prints the same document controllers receive from `GET /relay-status`.

use anyhow::{Context, Result};
use relayctl_core::RelayctlConfig;
use relayctl_server::RelayRepo;

use super::{connect, DbArgs};

pub async fn run_status(args: DbArgs, config: &RelayctlConfig) -> Result<()> {
    let pool = connect(config, &args).await?;

    let report = RelayRepo::new(&pool)
        .report()
        .await
        .context("Failed to read relay status")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
