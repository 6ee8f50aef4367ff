//! Scan repository
//!
//! A scan is one transaction: log the tag, resolve its user, resolve the
//! user's relays, flip each relay. Either all of it commits or none of it.

use chrono::{DateTime, Utc};
use relayctl_core::{RelayId, RelayState, RfidTag, ScanOutcome, ScanReceipt};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{debug, info, warn};

use super::DbError;

/// Scan log record from database
#[derive(Debug, Clone, FromRow)]
pub struct ScanLogEntry {
    pub id: i64,
    pub rfid_tag: String,
    pub created_at: DateTime<Utc>,
}

/// Scan repository
pub struct ScanRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ScanRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Process one scan inside a transaction.
    ///
    /// Commits when every step succeeds, rolls back otherwise. The returned
    /// error is the failing step's error, even if the rollback itself fails.
    pub async fn process(&self, tag: &RfidTag) -> Result<ScanReceipt, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| DbError::Begin { source })?;

        match record_scan(&mut *tx, tag).await {
            Ok(receipt) => {
                tx.commit()
                    .await
                    .map_err(|source| DbError::Commit { source })?;
                Ok(receipt)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Rollback failed; connection will be discarded");
                }
                Err(e)
            }
        }
    }

    /// Most recent scan log rows, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ScanLogEntry>, DbError> {
        let rows = sqlx::query_as::<_, ScanLogEntry>(
            r#"
            SELECT id, rfid_tag, created_at
            FROM rfid_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// Run the scan steps on an open transaction without committing.
///
/// Relays are flipped in ascending id order so concurrent scans with
/// overlapping relay sets take row locks in the same order.
pub async fn record_scan(conn: &mut PgConnection, tag: &RfidTag) -> Result<ScanReceipt, DbError> {
    let log_id: i64 =
        sqlx::query_scalar("INSERT INTO rfid_logs (rfid_tag) VALUES ($1) RETURNING id")
            .bind(tag.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(|source| DbError::LogInsert { source })?;

    debug!(log_id, tag = %tag, "Scan logged");

    let user_id: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE rfid_tag = $1")
        .bind(tag.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|source| DbError::UserLookup { source })?;

    let Some(user_id) = user_id else {
        info!(log_id, tag = %tag, "No user for tag");
        return Ok(ScanReceipt {
            log_id,
            outcome: ScanOutcome::NoUser,
        });
    };

    let relay_ids: Vec<RelayId> = sqlx::query_scalar(
        "SELECT DISTINCT relay_id FROM user_relays WHERE user_id = $1 ORDER BY relay_id",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|source| DbError::RelayLookup { user_id, source })?;

    if relay_ids.is_empty() {
        info!(log_id, user_id, "User has no relays assigned");
        return Ok(ScanReceipt {
            log_id,
            outcome: ScanOutcome::NoRelays { user_id },
        });
    }

    let mut relays = Vec::with_capacity(relay_ids.len());
    for relay_id in relay_ids {
        let state = toggle_relay(conn, relay_id).await?;
        relays.push((relay_id, state));
    }

    info!(log_id, user_id, relays = ?relays, "Relay statuses toggled");

    Ok(ScanReceipt {
        log_id,
        outcome: ScanOutcome::Toggled { user_id, relays },
    })
}

/// Flip one relay, creating it as on when it has no row yet.
///
/// The upsert locks the existing row for its read-modify-write.
async fn toggle_relay(conn: &mut PgConnection, relay_id: RelayId) -> Result<RelayState, DbError> {
    let status: i16 = sqlx::query_scalar(
        r#"
        INSERT INTO relay_status (relay_id, status) VALUES ($1, $2)
        ON CONFLICT (relay_id) DO UPDATE
        SET status = 1 - relay_status.status, updated_at = NOW()
        RETURNING status
        "#,
    )
    .bind(relay_id)
    .bind(RelayState::FIRST_TOGGLE.as_i16())
    .fetch_one(&mut *conn)
    .await
    .map_err(|source| DbError::Toggle { relay_id, source })?;

    RelayState::from_stored(status).ok_or(DbError::InvalidStatus {
        relay_id,
        value: status,
    })
}
