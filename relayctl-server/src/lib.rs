//! relayctl-server: HTTP backend for RFID scanners and relay controllers
//!
//! Scanners POST tags to `/insert-rfid-data`; every scan is logged and, when
//! the tag belongs to a user, that user's relays are toggled in one
//! transaction. Relay controllers poll `/relay-status`.

pub mod db;
pub mod http;

pub use db::{create_pool, DbError, RelayRepo, ScanRepo};
pub use http::{build_router, run_server, AppState, ServerConfig};

/// Embedded SQL migrations from the workspace `migrations/` directory
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");

/// Apply pending migrations.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");
    MIGRATOR.run(pool).await?;
    Ok(())
}
