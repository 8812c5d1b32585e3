use chrono::{DateTime, Utc};
use metrics::counter;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::auth::Actor;
use crate::entities::request::RequestStatus;
use crate::errors::ServiceError;
use crate::models::{NewRequest, Request};
use crate::repositories::{NewRequestLine, RequestRepository, RequestWithItems, StockRepository};

/// What a status change does to the stored request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same status re-applied; nothing is written.
    Unchanged,
    Apply {
        completed_at: Option<DateTime<Utc>>,
    },
}

/// Guard for the request state machine. Terminal states get a completion timestamp.
pub fn plan_transition(
    current: RequestStatus,
    next: RequestStatus,
    now: DateTime<Utc>,
) -> Result<Transition, ServiceError> {
    if current == next {
        return Ok(Transition::Unchanged);
    }
    if !current.can_transition_to(next) {
        return Err(ServiceError::InvalidTransition {
            from: current,
            to: next,
        });
    }
    Ok(Transition::Apply {
        completed_at: next.is_terminal().then_some(now),
    })
}

/// Request lifecycle controller: creation, listing and status changes.
#[derive(Debug, Clone)]
pub struct RequestService {
    db: Arc<DatabaseConnection>,
    repo: RequestRepository,
    decrement_stock_on_completion: bool,
}

impl RequestService {
    pub fn new(db: Arc<DatabaseConnection>, decrement_stock_on_completion: bool) -> Self {
        Self {
            repo: RequestRepository::new(db.clone()),
            db,
            decrement_stock_on_completion,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_requests(&self) -> Result<Vec<Request>, ServiceError> {
        Ok(self
            .repo
            .list()
            .await?
            .into_iter()
            .map(Request::from)
            .collect())
    }

    /// Creates a Pending request on behalf of `actor`. Every line must name an existing
    /// stock item at most once; blank descriptions are filled from the stock item.
    #[instrument(skip(self, input), fields(actor = %actor.email, lines = input.items.len()))]
    pub async fn create_request(
        &self,
        actor: &Actor,
        input: NewRequest,
    ) -> Result<Request, ServiceError> {
        if input.items.is_empty() {
            return Err(ServiceError::ValidationError(
                "A request needs at least one item".to_string(),
            ));
        }
        input.validate()?;

        let mut seen = HashSet::new();
        for line in &input.items {
            if !seen.insert(line.item_id.as_str()) {
                return Err(ServiceError::ValidationError(format!(
                    "Item {} appears more than once",
                    line.item_id
                )));
            }
        }

        let requester_name = input
            .requester_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(actor.email.as_str())
            .to_owned();

        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        let ids: Vec<String> = input.items.iter().map(|l| l.item_id.clone()).collect();
        let stock: HashMap<String, String> = StockRepository::find_many_with(&txn, &ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item.description))
            .collect();

        let mut lines = Vec::with_capacity(input.items.len());
        for line in input.items {
            let Some(stock_description) = stock.get(&line.item_id) else {
                return Err(ServiceError::ValidationError(format!(
                    "Stock item {} does not exist",
                    line.item_id
                )));
            };
            let description = line
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| stock_description.clone());
            lines.push(NewRequestLine {
                item_id: line.item_id,
                description,
                requested_quantity: line.requested_quantity,
            });
        }

        let created = RequestRepository::create_with(&txn, &requester_name, lines, Utc::now()).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit new request: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        counter!("stockroom.requests.created", 1);
        info!(request_id = created.request.id, requester = %requester_name, "Request created");
        Ok(created.into())
    }

    /// Moves a request along the lifecycle. Re-applying the current status is a no-op.
    #[instrument(skip(self), fields(request_id = id, next = %next))]
    pub async fn update_status(&self, id: i32, next: RequestStatus) -> Result<Request, ServiceError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        let RequestWithItems { request, items } = RequestRepository::find_with(&txn, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Request {}", id)))?;
        let current = request.status;

        let completed_at = match plan_transition(current, next, Utc::now()) {
            Ok(Transition::Unchanged) => {
                info!("Status already {}; nothing to do", current);
                return Ok(RequestWithItems { request, items }.into());
            }
            Ok(Transition::Apply { completed_at }) => completed_at,
            Err(e) => {
                warn!(from = %current, "Rejected status change");
                counter!("stockroom.requests.rejected_transitions", 1);
                return Err(e);
            }
        };

        if next == RequestStatus::Completed && self.decrement_stock_on_completion {
            let now = completed_at.unwrap_or_else(Utc::now);
            for line in &items {
                let decremented =
                    StockRepository::decrement_with(&txn, &line.item_id, line.requested_quantity, now)
                        .await?;
                if !decremented {
                    let available = StockRepository::find_with(&txn, &line.item_id)
                        .await?
                        .map(|item| item.current_quantity);
                    let message = match available {
                        Some(available) => format!(
                            "{} has {} on hand, request {} needs {}",
                            line.item_id, available, id, line.requested_quantity
                        ),
                        None => format!("{} is no longer in stock", line.item_id),
                    };
                    return Err(ServiceError::InsufficientStock(message));
                }
            }
        }

        let updated = RequestRepository::update_status_with(&txn, request, next, completed_at).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit status change for request {}: {}", id, e);
            ServiceError::DatabaseError(e)
        })?;

        counter!(
            "stockroom.requests.transitions",
            1,
            "from" => current.to_string(),
            "to" => next.to_string()
        );
        info!("Request {} moved from {} to {}", id, current, next);

        Ok(RequestWithItems {
            request: updated,
            items,
        }
        .into())
    }
}
