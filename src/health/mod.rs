/*!
 * # Health Check Module
 *
 * - `/health` reports overall status together with a database ping
 * - `/health/live` answers without touching the database
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub database: HealthStatus,
}

pub fn health_routes(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(simple_health_check))
        .with_state(db)
}

/// Service and database status
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthInfo),
        (status = 503, description = "Database unreachable", body = HealthInfo)
    ),
    tag = "health"
)]
pub async fn health_check(State(db): State<Arc<DatabaseConnection>>) -> impl IntoResponse {
    let database = match crate::db::check_connection(&db).await {
        Ok(()) => HealthStatus::Up,
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            HealthStatus::Down
        }
    };

    let info = HealthInfo {
        status: database,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        database,
    };
    let code = match database {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(info))
}

/// Simple health check response that doesn't require state
pub async fn simple_health_check() -> impl IntoResponse {
    info!("Liveness endpoint called");

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "up",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}
