//! Database connection pool management
//!
//! Every pooled connection sets the configured session time zone right after
//! it is opened. The Postgres driver always negotiates UTF-8 as the client
//! encoding.

use std::str::FromStr;

use relayctl_core::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgConnection, PgPool};

/// Connection options parsed from `database_url`.
pub fn connect_options(database_url: &str) -> Result<PgConnectOptions, sqlx::Error> {
    PgConnectOptions::from_str(database_url)
}

/// Set the session time zone on a freshly opened connection.
///
/// sqlx sends `TimeZone=UTC` as a startup parameter, so the zone has to be
/// set once the session exists.
pub async fn set_session_timezone(
    conn: &mut PgConnection,
    timezone: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT set_config('TimeZone', $1, false)")
        .bind(timezone)
        .execute(conn)
        .await?;
    Ok(())
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the first connection fails.
///
/// # Example
///
/// ```ignore
/// let config = DatabaseConfig::default();
/// let pool = create_pool("postgres://localhost/relayctl", &config).await?;
/// ```
pub async fn create_pool(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(database_url)?;
    let timezone = config.timezone.clone();

    tracing::debug!(
        max_connections = config.max_connections,
        timezone = %config.timezone,
        "Connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .after_connect(move |conn, _meta| {
            let timezone = timezone.clone();
            Box::pin(async move { set_session_timezone(conn, &timezone).await })
        })
        .connect_with(options)
        .await
}
