//! JSON shapes exchanged over HTTP. Shared by the handlers, the OpenAPI document
//! and the client library.

pub mod dashboard;
pub mod request;
pub mod stock;
pub mod user;

pub use dashboard::{DashboardSummary, StockLevel};
pub use request::{NewRequest, NewRequestLine, Request, RequestedLine, StatusUpdate};
pub use stock::{DeletedStockItem, StockItem, StockItemInput};
pub use user::{Credentials, User};
