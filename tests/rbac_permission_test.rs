//! Acting-user resolution and profile permissions on every gated route.

mod common;

use axum::http::{Method, StatusCode};
use common::{app_with_users, response_json, REQUESTER, STAFF, SUPERVISOR};
use serde_json::json;

#[tokio::test]
async fn missing_or_unknown_actor_is_unauthorized() {
    let app = app_with_users().await;

    let response = app.request(Method::GET, "/estoque", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response_json(response).await["error"].is_string());

    let response = app
        .request(Method::GET, "/estoque", None, Some("intruso@escola.br"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn requester_cannot_manage_stock_or_requests() {
    let app = app_with_users().await;
    app.seed_stock("1", "Papel A4", 50, 10).await;

    let forbidden = [
        (
            Method::POST,
            "/estoque",
            Some(json!({"id": "2", "description": "Lápis", "currentQuantity": 1, "minimumQuantity": 1})),
        ),
        (Method::DELETE, "/estoque/1", None),
        (
            Method::PATCH,
            "/solicitacoes/1/status",
            Some(json!({"status": "Approved"})),
        ),
    ];
    for (method, uri, body) in forbidden {
        let response = app.request(method.clone(), uri, body, Some(REQUESTER)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{} {}", method, uri);
    }

    for uri in ["/estoque", "/solicitacoes", "/dashboard"] {
        let response = app.request(Method::GET, uri, None, Some(REQUESTER)).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    }
}

#[tokio::test]
async fn warehouse_staff_cannot_create_requests() {
    let app = app_with_users().await;
    app.seed_stock("1", "Papel A4", 50, 10).await;

    let response = app
        .request(
            Method::POST,
            "/solicitacoes",
            Some(json!({"items": [{"itemId": "1", "requestedQuantity": 1}]})),
            Some(STAFF),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn supervisor_can_do_everything() {
    let app = app_with_users().await;

    let response = app
        .request(
            Method::POST,
            "/estoque",
            Some(json!({"id": "1", "description": "Papel A4", "currentQuantity": 5, "minimumQuantity": 1})),
            Some(SUPERVISOR),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::POST,
            "/solicitacoes",
            Some(json!({"items": [{"itemId": "1", "requestedQuantity": 1}]})),
            Some(SUPERVISOR),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = response_json(response).await["id"].clone();

    let response = app
        .request(
            Method::PATCH,
            &format!("/solicitacoes/{}/status", id),
            Some(json!({"status": "Approved"})),
            Some(SUPERVISOR),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::DELETE, "/estoque/1", None, Some(SUPERVISOR)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
