//! Scan endpoint, called by RFID readers

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::Method;
use axum::{routing::any, Json, Router};
use relayctl_core::{parse_scan_request, ScanResponse, ValidationError};

use crate::db::ScanRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Largest scan body buffered; anything longer is not a scan request.
pub const MAX_SCAN_BODY_BYTES: usize = 64 * 1024;

/// POST /insert-rfid-data
///
/// Routed for every method so a wrong method still gets a JSON answer.
/// Checks run in order (method, JSON, tag) before any transaction opens.
/// The body is buffered only after the method check.
async fn insert_rfid_data(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Body,
) -> Result<Json<ScanResponse>, ApiError> {
    if method != Method::POST {
        return Err(ValidationError::InvalidMethod.into());
    }

    let body = to_bytes(body, MAX_SCAN_BODY_BYTES)
        .await
        .map_err(|_| ValidationError::InvalidJson)?;
    let tag = parse_scan_request(&body)?;
    let receipt = ScanRepo::new(&state.pool).process(&tag).await?;

    tracing::debug!(log_id = receipt.log_id, outcome = ?receipt.outcome, "Scan committed");
    Ok(Json(ScanResponse::from(&receipt.outcome)))
}

/// Scan routes, including the path deployed readers still post to
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/insert-rfid-data", any(insert_rfid_data))
        .route("/insert_rfid_data.php", any(insert_rfid_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_router;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;
    use tower::ServiceExt;

    /// Pool that never connects; validation failures must not touch it.
    fn lazy_app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://relayctl@127.0.0.1:1/relayctl")
            .unwrap();
        build_router(AppState::new(pool), false)
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn rejects_non_post() {
        for method in ["GET", "PUT", "DELETE", "PATCH"] {
            let (status, body) =
                send(lazy_app(), method, "/insert-rfid-data", r#"{"rfid_tag":"A1B2"}"#).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"error": "Invalid request method."}), "{method}");
        }
    }

    #[tokio::test]
    async fn method_checked_before_body() {
        let (_, body) = send(lazy_app(), "GET", "/insert-rfid-data", "not json").await;
        assert_eq!(body, json!({"error": "Invalid request method."}));
    }

    #[tokio::test]
    async fn oversized_body_still_gets_json() {
        let huge = format!(r#"{{"rfid_tag":"{}"}}"#, "A".repeat(3 * 1024 * 1024));

        let (status, body) = send(lazy_app(), "GET", "/insert-rfid-data", huge.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Invalid request method."}));

        let (status, body) = send(lazy_app(), "POST", "/insert-rfid-data", huge).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Invalid JSON format."}));
    }

    #[tokio::test]
    async fn rejects_nul_in_tag() {
        let (status, body) =
            send(lazy_app(), "POST", "/insert-rfid-data", r#"{"rfid_tag":"A1\u0000B2"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Missing or empty 'rfid_tag' in request."}));
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        for raw in ["", "{", "rfid_tag=A1B2", r#"{"rfid_tag": "A1B2""#] {
            let (status, body) = send(lazy_app(), "POST", "/insert-rfid-data", raw).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"error": "Invalid JSON format."}), "{raw:?}");
        }
    }

    #[tokio::test]
    async fn rejects_missing_or_blank_tag() {
        for raw in [r#"{}"#, r#"{"rfid_tag": ""}"#, r#"{"rfid_tag": " \t "}"#, "null"] {
            let (status, body) = send(lazy_app(), "POST", "/insert-rfid-data", raw).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({"error": "Missing or empty 'rfid_tag' in request."}),
                "{raw}"
            );
        }
    }

    #[tokio::test]
    async fn legacy_path_validates_the_same() {
        let (_, body) = send(lazy_app(), "POST", "/insert_rfid_data.php", "{}").await;
        assert_eq!(
            body,
            json!({"error": "Missing or empty 'rfid_tag' in request."})
        );
    }

    async fn seed_user(pool: &PgPool, tag: &str, relays: &[i32]) {
        let user_id: i64 =
            sqlx::query_scalar("INSERT INTO users (rfid_tag) VALUES ($1) RETURNING id")
                .bind(tag)
                .fetch_one(pool)
                .await
                .unwrap();
        for relay_id in relays {
            sqlx::query("INSERT INTO user_relays (user_id, relay_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(*relay_id)
                .execute(pool)
                .await
                .unwrap();
        }
    }

    async fn log_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM rfid_logs")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn unassociated_tag(pool: PgPool) {
        let app = build_router(AppState::new(pool.clone()), false);

        let (_, body) = send(app, "POST", "/insert-rfid-data", r#"{"rfid_tag":"A1B2"}"#).await;

        assert_eq!(
            body,
            json!({"success": "RFID Tag logged successfully. No associated user found."})
        );
        assert_eq!(log_count(&pool).await, 1);
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn user_without_relays(pool: PgPool) {
        seed_user(&pool, "E5F6", &[]).await;
        let app = build_router(AppState::new(pool.clone()), false);

        let (_, body) = send(app, "POST", "/insert-rfid-data", r#"{"rfid_tag":"E5F6"}"#).await;

        assert_eq!(
            body,
            json!({"success": "RFID Tag logged successfully. No relays assigned to the user."})
        );
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn toggles_then_restores(pool: PgPool) {
        seed_user(&pool, "C3D4", &[1, 2]).await;
        sqlx::query("INSERT INTO relay_status (relay_id, status) VALUES (1, 0), (2, 0)")
            .execute(&pool)
            .await
            .unwrap();
        let app = build_router(AppState::new(pool.clone()), false);

        let (_, body) = send(
            app.clone(),
            "POST",
            "/insert-rfid-data",
            r#"{"rfid_tag":" C3D4 "}"#,
        )
        .await;
        assert_eq!(
            body,
            json!({"success": "RFID Tag logged successfully. Relay statuses toggled."})
        );

        let (_, status) = send(app.clone(), "GET", "/relay-status", "").await;
        assert_eq!(status, json!({"status": "success", "relays": {"1": 1, "2": 1}}));

        send(app.clone(), "POST", "/insert-rfid-data", r#"{"rfid_tag":"C3D4"}"#).await;
        let (_, status) = send(app, "GET", "/relay-status", "").await;
        assert_eq!(status, json!({"status": "success", "relays": {"1": 0, "2": 0}}));
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn invalid_requests_write_nothing(pool: PgPool) {
        let app = build_router(AppState::new(pool.clone()), false);

        send(app.clone(), "POST", "/insert-rfid-data", "{oops").await;
        send(app.clone(), "POST", "/insert-rfid-data", r#"{"rfid_tag":"   "}"#).await;
        send(app, "GET", "/insert-rfid-data", r#"{"rfid_tag":"A1B2"}"#).await;

        assert_eq!(log_count(&pool).await, 0);
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn transaction_failure_is_reported(pool: PgPool) {
        seed_user(&pool, "C3D4", &[4]).await;
        sqlx::query("DROP TABLE relay_status")
            .execute(&pool)
            .await
            .unwrap();
        let app = build_router(AppState::new(pool.clone()), false);

        let (status, body) =
            send(app, "POST", "/insert-rfid-data", r#"{"rfid_tag":"C3D4"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let message = body["error"].as_str().expect("error body");
        assert!(message.starts_with("Execute failed for relay_id 4"), "{message}");
        assert_eq!(log_count(&pool).await, 0);
    }
}
