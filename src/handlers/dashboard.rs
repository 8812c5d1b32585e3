use axum::{extract::State, Json};

use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::models::DashboardSummary;

/// Stock and request counters plus the stock-level chart
#[utoipa::path(
    get,
    path = "/dashboard",
    params(("x-actor-email" = String, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Summary returned", body = DashboardSummary),
        (status = 401, description = "Unknown or missing acting user", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, ServiceError> {
    Ok(Json(state.dashboard.summary().await?))
}
