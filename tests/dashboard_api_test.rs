mod common;

use axum::http::{Method, StatusCode};
use common::{app_with_users, response_json, REQUESTER, STAFF};
use serde_json::json;

#[tokio::test]
async fn dashboard_counts_and_chart() {
    let app = app_with_users().await;
    app.seed_stock("2", "Caneta Esferográfica Azul", 15, 5).await;
    app.seed_stock("5", "Borracha Branca", 2, 10).await;
    app.seed_stock("4", "Clips N. 2/0", 100, 20).await;

    for qty in [1, 2] {
        let response = app
            .request(
                Method::POST,
                "/solicitacoes",
                Some(json!({"items": [{"itemId": "4", "requestedQuantity": qty}]})),
                Some(REQUESTER),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    app.request(
        Method::PATCH,
        "/solicitacoes/1/status",
        Some(json!({"status": "Approved"})),
        Some(STAFF),
    )
    .await;

    let response = app.request(Method::GET, "/dashboard", None, Some(REQUESTER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = response_json(response).await;

    assert_eq!(summary["totalItems"], 3);
    assert_eq!(summary["criticalItems"], 1);
    assert_eq!(summary["totalRequests"], 2);
    assert_eq!(summary["pendingRequests"], 1);
    assert_eq!(summary["criticalStock"][0]["id"], "5");

    let names: Vec<&str> = summary["stockLevels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|level| level["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Borracha Branca", "Caneta Esfer...", "Clips N. 2/0"]);
}

#[tokio::test]
async fn empty_dashboard() {
    let app = app_with_users().await;

    let summary = response_json(app.request(Method::GET, "/api/dashboard", None, Some(STAFF)).await).await;
    assert_eq!(
        summary,
        json!({
            "totalItems": 0,
            "criticalItems": 0,
            "pendingRequests": 0,
            "totalRequests": 0,
            "criticalStock": [],
            "stockLevels": []
        })
    );
}
