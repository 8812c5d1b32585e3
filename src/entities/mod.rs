pub mod request;
pub mod request_item;
pub mod stock_item;
pub mod user;
