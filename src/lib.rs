//! Stockroom API Library
//!
//! Inventory and supply-request tracking for a school supply room
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod tracing;

use axum::{
    routing::{delete, get, patch, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::consts as perm;
use crate::auth::{AuthRouterExt, AuthService};
use crate::repositories::{RequestRepository, StockRepository, UserRepository};
use crate::services::{DashboardService, RequestService, StockService};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub auth: Arc<AuthService>,
    pub stock: StockService,
    pub requests: RequestService,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let stock_repo = StockRepository::new(db.clone());
        let request_repo = RequestRepository::new(db.clone());

        Self {
            auth: Arc::new(AuthService::new(UserRepository::new(db.clone()))),
            stock: StockService::new(stock_repo.clone()),
            requests: RequestService::new(db.clone(), config.decrement_stock_on_completion),
            dashboard: DashboardService::new(stock_repo, request_repo),
            db,
            config,
        }
    }
}

/// Stock, request and dashboard routes, each gated by the permission it needs.
pub fn api_routes() -> Router<AppState> {
    let stock_read = Router::new()
        .route("/estoque", get(handlers::stock::list_stock))
        .with_permission(perm::STOCK_READ);

    let stock_write = Router::new()
        .route("/estoque", post(handlers::stock::save_stock_item))
        .route("/estoque/{id}", delete(handlers::stock::delete_stock_item))
        .with_permission(perm::STOCK_WRITE);

    let requests_read = Router::new()
        .route("/solicitacoes", get(handlers::requests::list_requests))
        .with_permission(perm::REQUESTS_READ);

    let requests_create = Router::new()
        .route("/solicitacoes", post(handlers::requests::create_request))
        .with_permission(perm::REQUESTS_CREATE);

    let requests_manage = Router::new()
        .route(
            "/solicitacoes/{id}/status",
            patch(handlers::requests::update_request_status),
        )
        .with_permission(perm::REQUESTS_MANAGE);

    let dashboard = Router::new()
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .with_permission(perm::DASHBOARD_READ);

    Router::new()
        .merge(stock_read)
        .merge(stock_write)
        .merge(requests_read)
        .merge(requests_create)
        .merge(requests_manage)
        .merge(dashboard)
}

/// Full application router: API at the root and under `/api`, plus auth, health and docs.
///
/// CORS and compression are left to the binary so tests drive the bare stack.
pub fn build_router(state: AppState) -> Router {
    let auth_service = state.auth.clone();
    let db = state.db.clone();

    let api: Router = api_routes()
        .with_state(state)
        .nest("/auth", auth::auth_routes().with_state(auth_service.clone()));

    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .nest("/health", health::health_routes(db))
        .merge(openapi::swagger_ui())
        .fallback(handlers::route_not_found)
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        // Auth middleware looks the service up in request extensions
        .layer(Extension(auth_service))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}
