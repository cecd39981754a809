//! HTTP API Tests
//!
//! Routes are driven in-process through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use mutant_detector::http_server::{HttpServer, HttpServerConfig, STATUS_MESSAGE};
use mutant_detector::observability::MetricsRegistry;
use mutant_detector::storage::{FileStore, MemoryStore, Store};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const MUTANT: [&str; 6] = ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"];
const HUMAN: [&str; 6] = ["ATGCGA", "CAGTGC", "TTATTT", "AGACGG", "GCGTCA", "TCACTG"];

fn router_with<S: Store + 'static>(store: Arc<S>, stats_ttl: Duration) -> (Router, Arc<MetricsRegistry>) {
    let metrics = Arc::new(MetricsRegistry::new());
    let server = HttpServer::new(
        HttpServerConfig::default(),
        store,
        Arc::clone(&metrics),
        stats_ttl,
    );
    (server.router(), metrics)
}

fn router() -> (Router, Arc<MetricsRegistry>) {
    router_with(Arc::new(MemoryStore::new()), Duration::ZERO)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn post_mutant(router: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/mutant")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// POST /mutant
// =============================================================================

#[tokio::test]
async fn test_mutant_returns_200() {
    let (router, _) = router();

    let (status, body) = post_mutant(&router, json!({ "dna": MUTANT })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"is_mutant": true, "message": "Mutant detected"}));
}

#[tokio::test]
async fn test_human_returns_403() {
    let (router, _) = router();

    let (status, body) = post_mutant(&router, json!({ "dna": HUMAN })).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"is_mutant": false, "message": "Human detected"}));
}

#[tokio::test]
async fn test_invalid_dna_returns_400() {
    let (router, metrics) = router();

    let cases = [
        json!({ "dna": ["ATG", "CAG", "TTA"] }),
        json!({ "dna": ["ATGC", "CAGT", "TTAT", "AGA"] }),
        json!({ "dna": ["ATGX", "CAGT", "TTAT", "AGAA"] }),
        json!({ "dna": [] }),
        json!({}),
        json!({ "dna": "ATGC" }),
    ];

    for case in &cases {
        let (status, body) = post_mutant(&router, case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "case {}", case);
        assert_eq!(body["code"], 400);
        assert!(body["error"].is_string());
    }

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.inputs_rejected, cases.len() as u64);
    assert_eq!(snapshot.classifications, 0);
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (router, _) = router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/mutant")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"dna\": ["))
        .unwrap();

    let (status, _) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeat_submission_is_served_from_cache() {
    let store = Arc::new(MemoryStore::new());
    let (router, metrics) = router_with(Arc::clone(&store), Duration::ZERO);

    let first = post_mutant(&router, json!({ "dna": MUTANT })).await;
    let second = post_mutant(&router, json!({ "dna": MUTANT })).await;

    assert_eq!(first, second);
    assert_eq!(store.save_calls(), 1);
    assert_eq!(metrics.snapshot().scans, 1);
    assert_eq!(metrics.snapshot().cache_hits, 1);
}

#[tokio::test]
async fn test_store_failure_returns_500() {
    let store = Arc::new(MemoryStore::new());
    store.set_fail_writes(true);
    let (router, _) = router_with(store, Duration::ZERO);

    let (status, body) = post_mutant(&router, json!({ "dna": HUMAN })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
}

// =============================================================================
// GET /stats
// =============================================================================

#[tokio::test]
async fn test_stats_empty() {
    let (router, _) = router();

    let (status, body) = get_json(&router, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"count_mutant_dna": 0, "count_human_dna": 0, "ratio": 0.0})
    );
}

#[tokio::test]
async fn test_stats_after_classifications() {
    let (router, metrics) = router();

    post_mutant(&router, json!({ "dna": MUTANT })).await;
    post_mutant(&router, json!({ "dna": HUMAN })).await;
    post_mutant(&router, json!({ "dna": ["AAAA", "CAGT", "TTAT", "AGAG"] })).await;
    // Duplicate submission does not count twice.
    post_mutant(&router, json!({ "dna": MUTANT })).await;

    let (status, body) = get_json(&router, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count_mutant_dna"], 1);
    assert_eq!(body["count_human_dna"], 2);
    assert_eq!(body["ratio"], 0.5);
    assert_eq!(metrics.snapshot().stats_queries, 1);
}

#[tokio::test]
async fn test_stats_cached_within_ttl() {
    let (router, _) = router_with(Arc::new(MemoryStore::new()), Duration::from_secs(300));

    let (_, before) = get_json(&router, "/stats").await;
    post_mutant(&router, json!({ "dna": MUTANT })).await;
    let (_, after) = get_json(&router, "/stats").await;

    assert_eq!(before, after);
    assert_eq!(after["count_mutant_dna"], 0);
}

#[tokio::test]
async fn test_stats_read_failure_returns_500() {
    let store = Arc::new(MemoryStore::new());
    store.set_fail_reads(true);
    let (router, _) = router_with(store, Duration::ZERO);

    let (status, _) = get_json(&router, "/stats").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Status, health and metrics
// =============================================================================

#[tokio::test]
async fn test_root_status_line() {
    let (router, _) = router();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), STATUS_MESSAGE);
}

#[tokio::test]
async fn test_health() {
    let (router, _) = router();

    let (status, body) = get_json(&router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_metrics_reflect_requests() {
    let (router, _) = router();

    post_mutant(&router, json!({ "dna": MUTANT })).await;
    post_mutant(&router, json!({ "dna": MUTANT })).await;

    let (status, body) = get_json(&router, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classifications"], 2);
    assert_eq!(body["scans"], 1);
    assert_eq!(body["cache_hits"], 1);
    assert_eq!(body["store_writes"], 1);
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let (router, _) = router();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/mutant")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

// =============================================================================
// File-backed store
// =============================================================================

#[tokio::test]
async fn test_outcomes_survive_server_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
        let (router, _) = router_with(store, Duration::ZERO);
        post_mutant(&router, json!({ "dna": MUTANT })).await;
        post_mutant(&router, json!({ "dna": HUMAN })).await;
    }

    let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
    let (router, metrics) = router_with(store, Duration::ZERO);

    let (status, _) = post_mutant(&router, json!({ "dna": MUTANT })).await;
    let (_, stats) = get_json(&router, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics.snapshot().scans, 0);
    assert_eq!(metrics.snapshot().store_hits, 1);
    assert_eq!(stats["ratio"], 1.0);
}
