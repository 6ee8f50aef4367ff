//! Repository implementations for database access

pub mod relays;
pub mod scans;

pub use relays::RelayRepo;
pub use scans::{record_scan, ScanLogEntry, ScanRepo};

use relayctl_core::RelayId;

/// Database error type.
///
/// Step-specific variants carry the context that is returned to the scanner
/// when a scan transaction is rolled back.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Transaction begin failed: {source}")]
    Begin { source: sqlx::Error },

    #[error("Commit failed: {source}")]
    Commit { source: sqlx::Error },

    #[error("Insert failed for rfid_logs: {source}")]
    LogInsert { source: sqlx::Error },

    #[error("User lookup failed: {source}")]
    UserLookup { source: sqlx::Error },

    #[error("Relay lookup failed for user {user_id}: {source}")]
    RelayLookup { user_id: i64, source: sqlx::Error },

    #[error("Execute failed for relay_id {relay_id}: {source}")]
    Toggle { relay_id: RelayId, source: sqlx::Error },

    #[error("Stored status {value} for relay_id {relay_id} is not 0 or 1")]
    InvalidStatus { relay_id: RelayId, value: i16 },
}
