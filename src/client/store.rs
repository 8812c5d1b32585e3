use tracing::{info, warn};

use super::{ApiClient, ClientError, Screen};
use crate::entities::request::RequestStatus;
use crate::models::{
    Credentials, DashboardSummary, DeletedStockItem, NewRequest, Request, StockItem,
    StockItemInput, User,
};

/// What the client currently knows about the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub identity: Option<User>,
    pub stock: Vec<StockItem>,
    pub requests: Vec<Request>,
}

/// Local store over [`ApiClient`].
///
/// Every mutation refreshes the collections it can affect. A failed refresh is logged and
/// the previous data is kept.
#[derive(Debug)]
pub struct InventoryStore {
    api: ApiClient,
    snapshot: Snapshot,
}

impl InventoryStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: Snapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn identity(&self) -> Option<&User> {
        self.snapshot.identity.as_ref()
    }

    pub fn stock(&self) -> &[StockItem] {
        &self.snapshot.stock
    }

    pub fn requests(&self) -> &[Request] {
        &self.snapshot.requests
    }

    pub async fn login(&mut self, credentials: Credentials) -> Result<User, ClientError> {
        let user = self.api.login(&credentials).await?;
        self.enter(user.clone()).await;
        Ok(user)
    }

    pub async fn signup(&mut self, credentials: Credentials) -> Result<User, ClientError> {
        let user = self.api.signup(&credentials).await?;
        self.enter(user.clone()).await;
        Ok(user)
    }

    async fn enter(&mut self, user: User) {
        info!(email = %user.email, profile = %user.profile, "Signed in");
        self.api.set_actor(Some(user.email.clone()));
        self.snapshot.identity = Some(user);
        self.refresh_all().await;
    }

    pub fn logout(&mut self) {
        self.api.set_actor(None);
        self.snapshot = Snapshot::default();
    }

    fn require_identity(&self) -> Result<&User, ClientError> {
        self.snapshot.identity.as_ref().ok_or(ClientError::NotLoggedIn)
    }

    pub async fn refresh_all(&mut self) {
        self.refresh_stock().await;
        self.refresh_requests().await;
    }

    pub async fn refresh_stock(&mut self) {
        match self.api.list_stock().await {
            Ok(items) => self.snapshot.stock = items,
            Err(e) => warn!(error = %e, "Stock refresh failed; keeping previous data"),
        }
    }

    pub async fn refresh_requests(&mut self) {
        match self.api.list_requests().await {
            Ok(requests) => self.snapshot.requests = requests,
            Err(e) => warn!(error = %e, "Request refresh failed; keeping previous data"),
        }
    }

    pub async fn save_stock_item(&mut self, item: StockItemInput) -> Result<StockItem, ClientError> {
        self.require_identity()?;
        let saved = self.api.save_stock_item(&item).await?;
        self.refresh_stock().await;
        Ok(saved)
    }

    pub async fn delete_stock_item(&mut self, id: &str) -> Result<DeletedStockItem, ClientError> {
        self.require_identity()?;
        let deleted = self.api.delete_stock_item(id).await?;
        self.refresh_stock().await;
        Ok(deleted)
    }

    /// Requests without lines are rejected here, before any network call.
    pub async fn create_request(&mut self, request: NewRequest) -> Result<Request, ClientError> {
        self.require_identity()?;
        if request.items.is_empty() {
            return Err(ClientError::Validation(
                "A request needs at least one item".to_string(),
            ));
        }
        let created = self.api.create_request(&request).await?;
        self.refresh_requests().await;
        Ok(created)
    }

    /// Completion may change stock quantities, so both collections are refreshed.
    pub async fn update_status(
        &mut self,
        id: i32,
        status: RequestStatus,
    ) -> Result<Request, ClientError> {
        self.require_identity()?;
        let updated = self.api.update_status(id, status).await?;
        self.refresh_requests().await;
        self.refresh_stock().await;
        Ok(updated)
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, ClientError> {
        self.require_identity()?;
        self.api.dashboard().await
    }

    /// Requests whose requester is the signed-in user.
    pub fn my_requests(&self) -> Vec<&Request> {
        match &self.snapshot.identity {
            Some(user) => self
                .snapshot
                .requests
                .iter()
                .filter(|r| r.requester_name == user.email)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn critical_items(&self) -> Vec<&StockItem> {
        self.snapshot.stock.iter().filter(|i| i.critical).collect()
    }

    /// Case-insensitive description match. An empty term matches everything.
    pub fn search_stock(&self, term: &str) -> Vec<&StockItem> {
        let needle = term.trim().to_lowercase();
        self.snapshot
            .stock
            .iter()
            .filter(|i| i.description.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn visible_screens(&self) -> Vec<Screen> {
        self.snapshot
            .identity
            .as_ref()
            .map(|user| Screen::visible_for(user.profile))
            .unwrap_or_default()
    }
}
