mod common;

use axum::Router;
use axum_test::TestServer;
use cashlens::api;
use cashlens::domain::entities::Category;
use cashlens::state::AppState;
use chrono::Utc;
use std::sync::Arc;

fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest("/api", api::routes::routes())
        .with_state(state);
    TestServer::new(app).unwrap()
}

fn category(id: i64, name: &str) -> Arc<Category> {
    let now = Utc::now();
    Arc::new(Category::new(id, None, name.to_string(), None, now, now))
}

#[tokio::test]
async fn test_cache_stats_initially_empty() {
    let server = make_server(common::create_offline_state());

    let response = server.get("/api/cache/categories").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["size"], 0);
    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["hit_rate"], 0.0);
    assert_eq!(json["enabled"], true);
}

#[tokio::test]
async fn test_cache_stats_reflect_lookups() {
    let state = common::create_offline_state();
    let cache = state.category_cache.clone();
    let server = make_server(state);

    cache.set(category(1, "Food"));
    cache.get_by_name("Food");
    cache.get_by_id("1");
    cache.get_by_name("Transport");

    let json = server
        .get("/api/cache/categories")
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["size"], 1);
    assert_eq!(json["hits"], 2);
    assert_eq!(json["misses"], 1);
    let rate = json["hit_rate"].as_f64().unwrap();
    assert!((rate - 66.666).abs() < 0.01);
}

#[tokio::test]
async fn test_disable_and_enable_cache() {
    let state = common::create_offline_state();
    let cache = state.category_cache.clone();
    let server = make_server(state);

    cache.set(category(1, "Food"));

    let disabled = server.post("/api/cache/categories/disable").await;
    disabled.assert_status_ok();
    assert_eq!(disabled.json::<serde_json::Value>()["enabled"], false);
    assert!(!cache.is_enabled());

    // Entries survive but are not served.
    assert!(cache.get_by_name("Food").is_none());
    assert_eq!(cache.stats().size, 1);

    let enabled = server.post("/api/cache/categories/enable").await;
    enabled.assert_status_ok();
    assert_eq!(enabled.json::<serde_json::Value>()["enabled"], true);
    assert!(cache.get_by_name("Food").is_some());
}

#[tokio::test]
async fn test_clear_cache_keeps_counters() {
    let state = common::create_offline_state();
    let cache = state.category_cache.clone();
    let server = make_server(state);

    cache.set(category(1, "Food"));
    cache.set(category(2, "Transport"));
    cache.get_by_name("Food");

    let response = server.post("/api/cache/categories/clear").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["size"], 0);
    assert_eq!(json["hits"], 1);
    assert!(cache.get_by_id("2").is_none());
}

#[tokio::test]
async fn test_reset_cache_stats() {
    let state = common::create_offline_state();
    let cache = state.category_cache.clone();
    let server = make_server(state);

    cache.set(category(1, "Food"));
    cache.get_by_name("Food");
    cache.get_by_name("Nothing");

    let response = server.post("/api/cache/categories/reset-stats").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["hit_rate"], 0.0);
    assert_eq!(json["size"], 1);
}

#[tokio::test]
async fn test_cache_endpoints_reject_wrong_method() {
    let server = make_server(common::create_offline_state());

    server
        .get("/api/cache/categories/clear")
        .await
        .assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
}
