// Catalog maintenance
pub mod stock;

// Request lifecycle controller
pub mod requests;

// Read-only summaries
pub mod dashboard;

pub use dashboard::DashboardService;
pub use requests::RequestService;
pub use stock::StockService;
