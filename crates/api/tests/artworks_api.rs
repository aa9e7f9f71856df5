//! Router-level integration tests.
//!
//! Build the real router + middleware stack against a provisioned
//! database and drive it with `tower::ServiceExt::oneshot`. Ignored by
//! default; run with `cargo test -- --ignored` against Postgres. No test
//! here touches the image provider or the content store.

use std::sync::Arc;

use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_blob::HttpBlobStore;
use atelier_core::styles::StyleRegistry;
use atelier_openai::{ImagesClient, RetryPolicy};
use atelier_pipeline::{PgCatalog, Pipeline, PipelineConfig};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::util::ServiceExt;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full app router. The pipeline points at unreachable
/// endpoints; tests here never invoke generation.
fn test_app(pool: PgPool) -> Router {
    let synthesizer = ImagesClient::with_endpoint(
        "http://localhost:9".to_string(),
        "gpt-image-1".to_string(),
        "test-key".to_string(),
        RetryPolicy::default(),
    );
    let store = HttpBlobStore::new("http://localhost:9".to_string(), "test-token".to_string());
    let pipeline = Pipeline::new(
        StyleRegistry::new(),
        Arc::new(synthesizer),
        Arc::new(store),
        Arc::new(PgCatalog::new(pool.clone())),
        PipelineConfig::default(),
    );

    let state = AppState {
        pool,
        registry: Arc::new(StyleRegistry::new()),
        pipeline: Arc::new(pipeline),
    };
    build_app_router(state, &test_config())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn health_reports_ok(pool: PgPool) {
    let (status, body) = get_json(test_app(pool), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn styles_lists_the_full_registry(pool: PgPool) {
    let (status, body) = get_json(test_app(pool), "/api/v1/styles").await;
    assert_eq!(status, StatusCode::OK);
    let styles = body["data"].as_array().unwrap();
    assert_eq!(styles.len(), 10);
    assert!(styles.iter().any(|s| s["slug"] == "van-gogh"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn empty_catalog_returns_an_empty_page(pool: PgPool) {
    let (status, body) = get_json(test_app(pool), "/api/v1/artworks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn unknown_style_filter_is_a_404(pool: PgPool) {
    let (status, body) = get_json(test_app(pool), "/api/v1/artworks?style=banksy").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STYLE_NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn unknown_sort_is_a_validation_error(pool: PgPool) {
    let (status, body) = get_json(test_app(pool), "/api/v1/artworks?sort=oldest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn missing_artwork_is_a_404(pool: PgPool) {
    let (status, body) = get_json(test_app(pool), "/api/v1/artworks/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
