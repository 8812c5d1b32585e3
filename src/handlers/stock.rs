use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::Actor;
use crate::errors::ServiceError;
use crate::handlers::{AppState, JsonBody};
use crate::models::{DeletedStockItem, StockItem, StockItemInput};

/// List every stock item, description ascending
#[utoipa::path(
    get,
    path = "/estoque",
    params(("x-actor-email" = String, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Stock list returned", body = [StockItem],
            headers(("X-Request-Id" = String, description = "Unique request id for tracing"))
        ),
        (status = 401, description = "Unknown or missing acting user", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn list_stock(State(state): State<AppState>) -> Result<Json<Vec<StockItem>>, ServiceError> {
    Ok(Json(state.stock.list_items().await?))
}

/// Insert or overwrite a stock item keyed by id
#[utoipa::path(
    post,
    path = "/estoque",
    params(("x-actor-email" = String, Header, description = "Acting user")),
    request_body = StockItemInput,
    responses(
        (status = 200, description = "Item stored", body = StockItem),
        (status = 400, description = "Invalid item", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unknown or missing acting user", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn save_stock_item(
    State(state): State<AppState>,
    actor: Actor,
    JsonBody(payload): JsonBody<StockItemInput>,
) -> Result<Json<StockItem>, ServiceError> {
    tracing::debug!(actor = %actor.email, "Saving stock item");
    Ok(Json(state.stock.save_item(payload).await?))
}

/// Remove a stock item
#[utoipa::path(
    delete,
    path = "/estoque/{id}",
    params(
        ("id" = String, Path, description = "Stock item id"),
        ("x-actor-email" = String, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Item removed", body = DeletedStockItem),
        (status = 401, description = "Unknown or missing acting user", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn delete_stock_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedStockItem>, ServiceError> {
    state.stock.delete_item(&id).await?;
    Ok(Json(DeletedStockItem { id, deleted: true }))
}
