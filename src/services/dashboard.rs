use tracing::instrument;

use crate::entities::request::RequestStatus;
use crate::errors::ServiceError;
use crate::models::{DashboardSummary, StockItem, StockLevel};
use crate::repositories::{RequestRepository, StockRepository};

/// Bars shown in the stock-level chart.
const CHART_ITEMS: usize = 8;
const CHART_NAME_MAX: usize = 15;
const CHART_NAME_KEEP: usize = 12;

#[derive(Debug, Clone)]
pub struct DashboardService {
    stock: StockRepository,
    requests: RequestRepository,
}

impl DashboardService {
    pub fn new(stock: StockRepository, requests: RequestRepository) -> Self {
        Self { stock, requests }
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
        let items: Vec<StockItem> = self
            .stock
            .list()
            .await?
            .into_iter()
            .map(StockItem::from)
            .collect();
        let counts = self.requests.count_by_status().await?;

        Ok(summarize(
            items,
            counts.get(&RequestStatus::Pending).copied().unwrap_or(0),
            counts.values().sum(),
        ))
    }
}

/// Builds the summary from the (already sorted) stock list and request counts.
pub fn summarize(items: Vec<StockItem>, pending_requests: u64, total_requests: u64) -> DashboardSummary {
    let stock_levels = items
        .iter()
        .take(CHART_ITEMS)
        .map(|item| StockLevel {
            name: chart_name(&item.description),
            quantity: item.current_quantity,
            minimum: item.minimum_quantity,
            critical: item.critical,
        })
        .collect();

    let critical_stock: Vec<StockItem> = items.iter().filter(|i| i.critical).cloned().collect();

    DashboardSummary {
        total_items: items.len() as u64,
        critical_items: critical_stock.len() as u64,
        pending_requests,
        total_requests,
        critical_stock,
        stock_levels,
    }
}

fn chart_name(description: &str) -> String {
    if description.chars().count() > CHART_NAME_MAX {
        let kept: String = description.chars().take(CHART_NAME_KEEP).collect();
        format!("{}...", kept)
    } else {
        description.to_string()
    }
}
