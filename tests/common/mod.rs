#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use sqlx::SqlitePool;
use std::sync::Arc;
use url_shortener::routes::app_router;
use url_shortener::state::AppState;

pub const TEST_TIMESTAMP: &str = "2024-05-01T12:30:00.123456";

pub async fn create_test_record(pool: &SqlitePool, code: &str, url: &str) {
    create_test_record_with_count(pool, code, url, 0).await;
}

pub async fn create_test_record_with_count(pool: &SqlitePool, code: &str, url: &str, count: i64) {
    sqlx::query(
        "INSERT INTO shorten_url (code, original_url, request_count, creation_timestamp) VALUES (?, ?, ?, ?)",
    )
    .bind(code)
    .bind(url)
    .bind(count)
    .bind(TEST_TIMESTAMP)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn request_count(pool: &SqlitePool, code: &str) -> Option<i64> {
    sqlx::query_scalar("SELECT request_count FROM shorten_url WHERE code = ?")
        .bind(code)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn record_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM shorten_url")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(pool), None, None)
}

pub fn create_test_state_with_base_url(pool: SqlitePool, base_url: &str) -> AppState {
    AppState::new(Arc::new(pool), None, Some(base_url.to_string()))
}

/// The service exactly as `server::run` serves it, path normalization
/// included, behind an in-process test server.
pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(Router::new().fallback_service(app_router(state))).unwrap()
}
