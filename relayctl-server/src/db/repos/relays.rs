//! Relay status repository (read side)

use relayctl_core::{RelayId, RelayState, RelayStatusReport};
use sqlx::PgPool;

use super::DbError;

/// Relay status repository
pub struct RelayRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RelayRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All stored relay states, ordered by relay id.
    pub async fn states(&self) -> Result<Vec<(RelayId, RelayState)>, DbError> {
        let rows: Vec<(RelayId, i16)> =
            sqlx::query_as("SELECT relay_id, status FROM relay_status ORDER BY relay_id")
                .fetch_all(self.pool)
                .await?;

        rows.into_iter()
            .map(|(relay_id, value)| {
                RelayState::from_stored(value)
                    .map(|state| (relay_id, state))
                    .ok_or(DbError::InvalidStatus { relay_id, value })
            })
            .collect()
    }

    /// Status report document; the error form when no rows exist.
    pub async fn report(&self) -> Result<RelayStatusReport, DbError> {
        Ok(RelayStatusReport::from_states(self.states().await?))
    }
}
