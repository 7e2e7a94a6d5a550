mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;
use std::collections::HashSet;

#[sqlx::test]
async fn test_shorten_redirect_stats_flow(pool: SqlitePool) {
    let server = common::make_server(common::create_test_state_with_base_url(
        pool,
        "http://localhost:5001",
    ));

    let created = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "https://www.json.org" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let shorten_url = created.json::<serde_json::Value>()["shorten_url"]
        .as_str()
        .unwrap()
        .to_string();
    let path = shorten_url.strip_prefix("http://localhost:5001").unwrap();
    let code = path.strip_prefix("/s/").unwrap();

    let redirect = server.get(path).await;
    redirect.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(redirect.header("location"), "https://www.json.org");

    let stats = server
        .get(&format!("/api/v1/stats/{code}"))
        .await
        .json::<serde_json::Value>();
    assert_eq!(stats["code"], code);
    assert_eq!(stats["original_url"], "https://www.json.org");
    assert_eq!(stats["request_count"], 1);
    assert!(stats["creation_timestamp"].is_string());
}

#[sqlx::test]
async fn test_failed_requests_leave_store_untouched(pool: SqlitePool) {
    common::create_test_record(&pool, "keep01", "https://example.com").await;
    let server = common::make_server(common::create_test_state(pool.clone()));

    server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "mailto:someone@example.com" }))
        .await
        .assert_status_bad_request();
    server.get("/s/ZZZZZZ").await.assert_status_not_found();
    server.get("/s/kee").await.assert_status_bad_request();

    assert_eq!(common::record_count(&pool).await, 1);
    assert_eq!(common::request_count(&pool, "keep01").await, Some(0));
}

#[sqlx::test]
async fn test_concurrent_shorten_gives_unique_codes(pool: SqlitePool) {
    let state = common::create_test_state(pool.clone());

    let tasks: Vec<_> = (0..25)
        .map(|i| {
            let service = state.shorten_service.clone();
            tokio::spawn(async move { service.shorten(&format!("https://example.com/{i}")).await })
        })
        .collect();

    let mut codes = HashSet::new();
    for task in tasks {
        let record = task.await.unwrap().unwrap();
        assert_eq!(record.request_count, 0);
        codes.insert(record.code);
    }

    assert_eq!(codes.len(), 25);
    assert_eq!(common::record_count(&pool).await, 25);
}

#[sqlx::test]
async fn test_concurrent_redirects_are_all_counted(pool: SqlitePool) {
    common::create_test_record(&pool, "busy01", "https://example.com").await;
    let state = common::create_test_state(pool.clone());

    let tasks: Vec<_> = (0..30)
        .map(|_| {
            let service = state.redirect_service.clone();
            tokio::spawn(async move { service.redirect("busy01").await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), "https://example.com");
    }

    assert_eq!(common::request_count(&pool, "busy01").await, Some(30));
}

#[sqlx::test]
async fn test_unknown_route(pool: SqlitePool) {
    let server = common::make_server(common::create_test_state(pool));

    server.get("/nope").await.assert_status_not_found();
}
