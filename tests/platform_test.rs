//! Health, request ids, docs and routing fallbacks.

mod common;

use axum::http::{Method, StatusCode};
use common::{app_with_users, response_json, TestApp, STAFF};

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["database"], "up");
    assert!(body["version"].is_string());

    let response = app.request(Method::GET, "/health/live", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_minted_or_echoed() {
    let app = app_with_users().await;

    let response = app.request(Method::GET, "/estoque", None, Some(STAFF)).await;
    let minted = response
        .headers()
        .get("x-request-id")
        .expect("request id header")
        .to_str()
        .unwrap();
    assert!(!minted.is_empty());

    let response = app
        .request_with_headers(
            Method::GET,
            "/estoque",
            None,
            Some(STAFF),
            &[("x-request-id", "trace-me-42")],
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], "trace-me-42");
}

#[tokio::test]
async fn error_bodies_carry_the_request_id() {
    let app = app_with_users().await;

    let response = app
        .request_with_headers(
            Method::DELETE,
            "/estoque/nope",
            None,
            Some(STAFF),
            &[("x-request-id", "del-404")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["requestId"], "del-404");
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn routes_are_served_with_and_without_api_prefix() {
    let app = app_with_users().await;

    for uri in ["/estoque", "/api/estoque"] {
        let response = app.request(Method::GET, uri, None, Some(STAFF)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn unknown_routes_answer_json_404() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/nowhere", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response_json(response).await["error"].is_string());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = response_json(response).await;
    assert!(doc["paths"]["/solicitacoes/{id}/status"]["patch"].is_object());
}
