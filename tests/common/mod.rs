#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use stockroom_api::{
    config::AppConfig,
    db,
    entities::user::Profile,
    models::{Credentials, StockItemInput},
    AppState,
};
use tower::ServiceExt;

/// Helper harness for spinning up the application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Same as [`TestApp::new`], letting the caller adjust configuration first.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // Every sqlite memory connection is its own database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        adjust(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = stockroom_api::build_router(state.clone());

        Self { router, state }
    }

    /// Send a request, acting as `actor` when given.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        actor: Option<&str>,
    ) -> Response {
        self.request_with_headers(method, uri, body, actor, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        actor: Option<&str>,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(email) = actor {
            builder = builder.header("x-actor-email", email);
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Registers a user directly through the auth service.
    pub async fn create_user(&self, email: &str, profile: Profile) {
        self.state
            .auth
            .signup(Credentials {
                email: email.to_string(),
                password: "secret".to_string(),
                profile,
            })
            .await
            .expect("seed user for tests");
    }

    pub async fn seed_stock(&self, id: &str, description: &str, current: i32, minimum: i32) {
        self.state
            .stock
            .save_item(StockItemInput {
                id: Some(id.to_string()),
                description: description.to_string(),
                unit_of_measure: "Unidade".to_string(),
                current_quantity: current,
                minimum_quantity: minimum,
                location: "Armário A1".to_string(),
            })
            .await
            .expect("seed stock item for tests");
    }
}

pub const REQUESTER: &str = "prof.ana@escola.br";
pub const STAFF: &str = "almox@escola.br";
pub const SUPERVISOR: &str = "direcao@escola.br";

/// TestApp with one user per profile.
pub async fn app_with_users() -> TestApp {
    let app = TestApp::new().await;
    app.create_user(REQUESTER, Profile::Requester).await;
    app.create_user(STAFF, Profile::WarehouseStaff).await;
    app.create_user(SUPERVISOR, Profile::Supervisor).await;
    app
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
