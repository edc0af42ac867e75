//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use card_cache::{api::create_router, AppState, CacheConfig, LockedCache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_state() -> AppState {
    AppState::new(
        LockedCache::new(CacheConfig::default()),
        Duration::from_secs(300),
    )
}

fn create_test_app() -> Router {
    create_router(create_test_state())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_card(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/api/card")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

// == PING Endpoint Tests ==

#[tokio::test]
async fn test_ping_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/api/card/ping")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["message"], "pong");
}

// == GET Card Tests ==

#[tokio::test]
async fn test_get_card_creates_default() {
    let app = create_test_app();

    let response = app.oneshot(get("/api/card")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["email"], "");
    assert_eq!(json["title"], "");
}

#[tokio::test]
async fn test_concurrent_first_gets_populate_once() {
    let state = create_test_state();
    let app = create_router(state.clone());

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            app.oneshot(get("/api/card")).await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(state.cache.stats().populations, 1);
}

// == PUT Card Tests ==

#[tokio::test]
async fn test_update_card_roundtrip() {
    let app = create_test_app();

    let init = app.clone().oneshot(get("/api/card")).await.unwrap();
    assert_eq!(init.status(), StatusCode::OK);

    let update = app
        .clone()
        .oneshot(put_card(
            r#"{"email":"jane@example.com","password":"hunter2","title":"Primary"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::OK);
    let json = body_to_json(update.into_body()).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["message"], "updated");

    let fetched = app.oneshot(get("/api/card")).await.unwrap();
    let json = body_to_json(fetched.into_body()).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["email"], "jane@example.com");
    assert_eq!(json["password"], "hunter2");
    assert_eq!(json["title"], "Primary");
}

#[tokio::test]
async fn test_update_card_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(put_card(r#"{"email":"a@b.c","password":"pw","title":"t"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_update_card_after_invalidate_is_not_found() {
    let state = create_test_state();
    let app = create_router(state.clone());

    app.clone().oneshot(get("/api/card")).await.unwrap();
    state
        .cache
        .invalidate(card_cache::repository::CARD_CACHE_KEY)
        .await
        .unwrap();

    let response = app
        .oneshot(put_card(r#"{"title":"gone"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    app.clone().oneshot(get("/api/card")).await.unwrap(); // miss + population
    app.clone().oneshot(get("/api/card")).await.unwrap(); // hit

    let response = app.oneshot(get("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["populations"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app.oneshot(put_card(r#"{"invalid json"#)).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_oversized_field_rejected() {
    let app = create_test_app();
    app.clone().oneshot(get("/api/card")).await.unwrap();

    let body = format!(r#"{{"title":"{}"}}"#, "x".repeat(300));
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/card")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_closed_cache_returns_unavailable() {
    let state = create_test_state();
    let app = create_router(state.clone());
    state.cache.close();

    let response = app.oneshot(get("/api/card")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
