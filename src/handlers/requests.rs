use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::Actor;
use crate::errors::ServiceError;
use crate::handlers::{AppState, JsonBody};
use crate::models::{NewRequest, Request, StatusUpdate};

/// Request ids are integers; anything else cannot name an existing request.
fn parse_request_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ServiceError::not_found(format!("Request {}", raw)))
}

/// List every request, newest first, with its lines
#[utoipa::path(
    get,
    path = "/solicitacoes",
    params(("x-actor-email" = String, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Requests returned", body = [Request],
            headers(("X-Request-Id" = String, description = "Unique request id for tracing"))
        ),
        (status = 401, description = "Unknown or missing acting user", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<Request>>, ServiceError> {
    Ok(Json(state.requests.list_requests().await?))
}

/// Submit a new request; it starts Pending
#[utoipa::path(
    post,
    path = "/solicitacoes",
    params(("x-actor-email" = String, Header, description = "Acting user")),
    request_body = NewRequest,
    responses(
        (status = 201, description = "Request created", body = Request),
        (status = 400, description = "No lines, bad quantity or unknown item", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unknown or missing acting user", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "requests"
)]
pub async fn create_request(
    State(state): State<AppState>,
    actor: Actor,
    JsonBody(payload): JsonBody<NewRequest>,
) -> Result<(StatusCode, Json<Request>), ServiceError> {
    let created = state.requests.create_request(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve, reject or complete a request
#[utoipa::path(
    patch,
    path = "/solicitacoes/{id}/status",
    params(
        ("id" = i32, Path, description = "Request id"),
        ("x-actor-email" = String, Header, description = "Acting user")
    ),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status applied", body = Request),
        (status = 401, description = "Unknown or missing acting user", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 404, description = "Request not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Transition not allowed", body = crate::errors::ErrorResponse),
        (status = 422, description = "Not enough stock to complete", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "requests"
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StatusUpdate>,
) -> Result<Json<Request>, ServiceError> {
    let id = parse_request_id(&id)?;
    Ok(Json(state.requests.update_status(id, payload.status).await?))
}
