use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "1.0.0",
        description = r#"
# Stockroom API

Inventory and supply-request tracking for a school supply room.

## Features

- **Stock**: list, create, overwrite and delete stock items; items at or below their minimum are flagged critical
- **Requests**: staff submit requests for stock items; warehouse staff approve, reject or complete them
- **Dashboard**: item and request counters plus a stock-level chart

## Acting user

Every endpoint except `/auth/*`, `/health` and the docs identifies the acting user with the
`x-actor-email` header. The user's profile decides which operations are allowed:

- `Requester`: read stock and the dashboard, create and read requests
- `WarehouseStaff`: read everything, edit stock and change request status
- `Supervisor`: everything

## Errors

Failures share one body shape:

```json
{ "error": "Stock item 7 not found", "requestId": "4b0b..." }
```
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development"),
        (url = "http://localhost:8080/api", description = "Local development, prefixed")
    ),
    tags(
        (name = "stock", description = "Stock items"),
        (name = "requests", description = "Supply requests and their lifecycle"),
        (name = "dashboard", description = "Summary counters"),
        (name = "auth", description = "Signup and login"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::stock::list_stock,
        crate::handlers::stock::save_stock_item,
        crate::handlers::stock::delete_stock_item,
        crate::handlers::requests::list_requests,
        crate::handlers::requests::create_request,
        crate::handlers::requests::update_request_status,
        crate::handlers::dashboard::get_dashboard,
        crate::auth::signup_handler,
        crate::auth::login_handler,
        crate::health::health_check,
    ),
    components(
        schemas(
            crate::models::StockItem,
            crate::models::StockItemInput,
            crate::models::DeletedStockItem,
            crate::models::Request,
            crate::models::RequestedLine,
            crate::models::NewRequest,
            crate::models::NewRequestLine,
            crate::models::StatusUpdate,
            crate::models::DashboardSummary,
            crate::models::StockLevel,
            crate::models::User,
            crate::models::Credentials,
            crate::entities::request::RequestStatus,
            crate::entities::user::Profile,
            crate::health::HealthInfo,
            crate::health::HealthStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
