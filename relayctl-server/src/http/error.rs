//! API error type for the scan endpoint.
//!
//! Scanners only read the JSON body, so failures are reported as
//! `{"error": "..."}` with HTTP 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relayctl_core::{ScanResponse, ValidationError};

use crate::db::DbError;

/// Scan endpoint failure
#[derive(Debug)]
pub enum ApiError {
    /// Rejected before the transaction was opened
    Validation(ValidationError),

    /// Transaction failed and was rolled back
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Validation(e) => {
                tracing::debug!(error = %e, "Scan rejected");
                e.to_string()
            }
            Self::Database(e) => {
                tracing::error!("Scan transaction rolled back: {}", e);
                e.to_string()
            }
        };

        (StatusCode::OK, Json(ScanResponse::error(message))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
