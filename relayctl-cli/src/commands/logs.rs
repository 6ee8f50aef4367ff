//! Scan log command

use anyhow::{Context, Result};
use clap::Parser;
use relayctl_core::RelayctlConfig;
use relayctl_server::ScanRepo;
use serde_json::json;

use super::{connect, DbArgs};

/// Arguments for the logs command
#[derive(Parser, Debug)]
pub struct LogsArgs {
    /// Number of entries to show
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: i64,

    /// Output as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Print recent scans, newest first, in the configured time zone
pub async fn run_logs(args: LogsArgs, config: &RelayctlConfig) -> Result<()> {
    let tz = config.database.tz()?;
    let pool = connect(config, &args.db).await?;

    let entries = ScanRepo::new(&pool)
        .recent(args.limit.max(0))
        .await
        .context("Failed to read scan log")?;

    if args.json {
        let items: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "id": e.id,
                    "rfid_tag": e.rfid_tag,
                    "created_at": e.created_at.with_timezone(&tz).to_rfc3339(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No scans logged");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{:>8}  {}  {}",
            entry.id,
            entry.created_at.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z"),
            entry.rfid_tag
        );
    }
    Ok(())
}
