//! Signup and login.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn signup_returns_user_without_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/signup",
            Some(json!({"email": "ana@escola.br", "password": "123", "profile": "Solicitante"})),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let user = response_json(response).await;
    assert_eq!(user["email"], "ana@escola.br");
    assert_eq!(user["profile"], "Requester");
    assert!(user.get("password").is_none());
    assert!(user["createdAt"].is_string());
}

#[tokio::test]
async fn duplicate_signup_is_a_bad_request() {
    let app = TestApp::new().await;
    let body = json!({"email": "ana@escola.br", "password": "123", "profile": "Requester"});

    let first = app.request(Method::POST, "/api/auth/signup", Some(body.clone()), None).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.request(Method::POST, "/api/auth/signup", Some(body), None).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert!(response_json(second).await["error"].is_string());
}

#[tokio::test]
async fn signup_validates_input() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/signup",
            Some(json!({"email": "not-an-email", "password": "123", "profile": "Requester"})),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::POST,
            "/auth/signup",
            Some(json!({"email": "ana@escola.br", "password": "123", "profile": "Janitor"})),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_requires_matching_password_and_profile() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/auth/signup",
        Some(json!({"email": "almox@escola.br", "password": "s3nha", "profile": "WarehouseStaff"})),
        None,
    )
    .await;

    let ok = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({"email": "almox@escola.br", "password": "s3nha", "profile": "Funcionário Almoxarifado"})),
            None,
        )
        .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(response_json(ok).await["profile"], "WarehouseStaff");

    let mut messages = Vec::new();
    for body in [
        json!({"email": "almox@escola.br", "password": "wrong", "profile": "WarehouseStaff"}),
        json!({"email": "almox@escola.br", "password": "s3nha", "profile": "Supervisor"}),
        json!({"email": "nobody@escola.br", "password": "s3nha", "profile": "WarehouseStaff"}),
    ] {
        let response = app.request(Method::POST, "/auth/login", Some(body), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        messages.push(response_json(response).await["error"].clone());
    }
    // The message never tells which field was wrong
    assert!(messages.windows(2).all(|pair| pair[0] == pair[1]));
}
