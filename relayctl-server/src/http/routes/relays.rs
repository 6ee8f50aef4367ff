//! Relay status endpoint, polled by relay controllers

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use relayctl_core::RelayStatusReport;

use crate::db::RelayRepo;
use crate::http::server::AppState;

/// GET /relay-status
///
/// A failed query is logged and reported the same way as an empty table.
async fn relay_status(State(state): State<Arc<AppState>>) -> Json<RelayStatusReport> {
    match RelayRepo::new(&state.pool).report().await {
        Ok(report) => Json(report),
        Err(e) => {
            tracing::error!("Failed to read relay status: {}", e);
            Json(RelayStatusReport::unavailable())
        }
    }
}

/// Relay status routes, including the path deployed controllers still poll
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/relay-status", get(relay_status))
        .route("/get_relay_status.php", get(relay_status))
}
