//! Integration tests for the health check endpoint and general HTTP behaviour.
//!
//! These run without a database: the pool points at a closed port.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, send};

// ---------------------------------------------------------------------------
// Test: GET /health reports a degraded service when the database is down
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let app = common::build_offline_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_offline_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is generated and propagated
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_generated_request_id() {
    let app = common::build_offline_app();
    let response = get(app, "/this-route-does-not-exist").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn client_request_id_is_echoed_back() {
    let app = common::build_offline_app();
    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight from the configured origin is allowed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = common::build_offline_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/pages")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}

// ---------------------------------------------------------------------------
// Test: Stored media is served under the media base URL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stored_media_files_are_served() {
    let root = common::test_media_root();
    std::fs::create_dir_all(root.join("7")).unwrap();
    std::fs::write(root.join("7").join("served.txt"), b"hello").unwrap();

    let app = common::build_offline_app();
    let response = get(app, "/media-files/7/served.txt").await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: Stored media is served inert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stored_media_files_are_not_sniffed_or_scripted() {
    let root = common::test_media_root();
    std::fs::create_dir_all(root.join("8")).unwrap();
    std::fs::write(
        root.join("8").join("badge.svg"),
        br#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script></svg>"#,
    )
    .unwrap();

    let app = common::build_offline_app();
    let response = get(app, "/media-files/8/badge.svg").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    let csp = response.headers()["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("sandbox"));
    assert!(csp.contains("default-src 'none'"));
}
