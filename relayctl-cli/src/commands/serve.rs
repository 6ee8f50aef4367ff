//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use relayctl_core::RelayctlConfig;
use relayctl_server::{run_migrations, run_server, ServerConfig};

use super::{connect, DbArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Do not apply pending migrations on startup
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

impl ServeArgs {
    fn server_config(&self, config: &RelayctlConfig) -> ServerConfig {
        let mut server = ServerConfig::from(&config.server);
        if let Some(bind) = self.bind {
            server.bind_addr = bind;
        }
        server.cors_permissive |= self.cors_permissive;
        server
    }
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs, config: &RelayctlConfig) -> Result<()> {
    let server = args.server_config(config);
    tracing::info!("Starting relayctl server on {}", server.bind_addr);

    let pool = connect(config, &args.db).await?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    run_server(pool, server).await.context("Server error")?;

    Ok(())
}
