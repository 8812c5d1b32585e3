//! Stock routes: listing, upsert, delete and validation.

mod common;

use axum::http::{Method, StatusCode};
use common::{app_with_users, response_json, STAFF};
use serde_json::json;

#[tokio::test]
async fn stock_is_listed_by_description_with_critical_flag() {
    let app = app_with_users().await;
    app.seed_stock("2", "Caneta Azul", 15, 5).await;
    app.seed_stock("1", "Borracha Branca", 2, 10).await;
    app.seed_stock("3", "Clips", 20, 20).await;

    let response = app.request(Method::GET, "/estoque", None, Some(STAFF)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let items = body.as_array().expect("array of items");
    let descriptions: Vec<&str> = items
        .iter()
        .map(|i| i["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["Borracha Branca", "Caneta Azul", "Clips"]);

    let critical: Vec<bool> = items.iter().map(|i| i["critical"].as_bool().unwrap()).collect();
    // at or below the minimum counts as critical
    assert_eq!(critical, vec![true, false, true]);
}

#[tokio::test]
async fn upsert_accepts_portuguese_fields_and_overwrites() {
    let app = app_with_users().await;

    let response = app
        .request(
            Method::POST,
            "/estoque",
            Some(json!({
                "id": "7",
                "descricao": "Papel A4",
                "unidadeMedida": "Resma",
                "quantidadeAtual": 50,
                "quantidadeMinima": 10,
                "localizacao": "Armário A1"
            })),
            Some(STAFF),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = response_json(response).await;
    assert_eq!(created["id"], "7");
    assert_eq!(created["unitOfMeasure"], "Resma");
    assert_eq!(created["critical"], false);

    let response = app
        .request(
            Method::POST,
            "/estoque",
            Some(json!({
                "id": "7",
                "description": "Papel A4 Branco",
                "unitOfMeasure": "Resma",
                "currentQuantity": 4,
                "minimumQuantity": 10,
                "location": "Armário A2"
            })),
            Some(STAFF),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = response_json(app.request(Method::GET, "/estoque", None, Some(STAFF)).await).await;
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["description"], "Papel A4 Branco");
    assert_eq!(items[0]["currentQuantity"], 4);
    assert_eq!(items[0]["critical"], true);
}

#[tokio::test]
async fn missing_id_is_generated() {
    let app = app_with_users().await;

    let response = app
        .request(
            Method::POST,
            "/estoque",
            Some(json!({
                "description": "Cola Branca",
                "currentQuantity": 12,
                "minimumQuantity": 3
            })),
            Some(STAFF),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = response_json(response).await;
    assert!(!created["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_items_are_rejected_with_error_body() {
    let app = app_with_users().await;

    for body in [
        json!({"id": "1", "description": "", "currentQuantity": 1, "minimumQuantity": 1}),
        json!({"id": "1", "description": "   ", "currentQuantity": 1, "minimumQuantity": 1}),
        json!({"id": "1", "description": "Lápis", "currentQuantity": -1, "minimumQuantity": 1}),
        json!({"id": "1", "currentQuantity": 1, "minimumQuantity": 1}),
    ] {
        let response = app.request(Method::POST, "/estoque", Some(body), Some(STAFF)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = response_json(response).await;
        assert!(error["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn saved_fields_are_read_back_unchanged() {
    let app = app_with_users().await;

    let response = app
        .request(
            Method::POST,
            "/estoque",
            Some(json!({
                "id": "7",
                "description": " Clips ",
                "unitOfMeasure": "Caixa",
                "currentQuantity": 4,
                "minimumQuantity": 2,
                "location": " Gaveta C1 "
            })),
            Some(STAFF),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/estoque", None, Some(STAFF)).await;
    let items = response_json(response).await;
    assert_eq!(items[0]["id"], "7");
    assert_eq!(items[0]["description"], " Clips ");
    assert_eq!(items[0]["location"], " Gaveta C1 ");
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app_with_users().await;
    app.seed_stock("9", "Grampeador", 3, 1).await;

    let response = app.request(Method::DELETE, "/estoque/9", None, Some(STAFF)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"id": "9", "deleted": true}));

    let response = app.request(Method::DELETE, "/estoque/9", None, Some(STAFF)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
