//! Scan command: run one scan through the same transaction as the HTTP endpoint

use anyhow::{Context, Result};
use clap::Parser;
use relayctl_core::{RelayctlConfig, RfidTag, ScanOutcome, ScanResponse};
use relayctl_server::ScanRepo;

use super::{connect, DbArgs};

/// Arguments for the scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// RFID tag as read by the scanner (surrounding whitespace is trimmed)
    pub tag: String,

    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_scan(args: ScanArgs, config: &RelayctlConfig) -> Result<()> {
    // Validate before connecting; a blank tag never reaches the database
    let tag = RfidTag::new(&args.tag)?;
    let pool = connect(config, &args.db).await?;

    let receipt = ScanRepo::new(&pool)
        .process(&tag)
        .await
        .context("Scan transaction rolled back")?;

    if let ScanOutcome::Toggled { relays, .. } = &receipt.outcome {
        for (relay_id, state) in relays {
            tracing::info!(relay_id, status = state.as_i16(), "Relay toggled");
        }
    }

    println!(
        "{}",
        serde_json::to_string(&ScanResponse::from(&receipt.outcome))?
    );
    Ok(())
}
