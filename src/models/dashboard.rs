use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StockItem;

/// Response of `GET /dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_items: u64,
    pub critical_items: u64,
    pub pending_requests: u64,
    pub total_requests: u64,
    pub critical_stock: Vec<StockItem>,
    pub stock_levels: Vec<StockLevel>,
}

/// One bar of the stock-level chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub name: String,
    pub quantity: i32,
    pub minimum: i32,
    pub critical: bool,
}
