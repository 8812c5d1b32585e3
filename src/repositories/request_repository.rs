use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::request::{
    ActiveModel as RequestActiveModel, Column, Entity as Request, Model as RequestModel,
    RequestStatus,
};
use crate::entities::request_item::{
    self, ActiveModel as RequestItemActiveModel, Entity as RequestItem, Model as RequestItemModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// A request joined with its lines in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestWithItems {
    pub request: RequestModel,
    pub items: Vec<RequestItemModel>,
}

/// A line ready to be persisted. The description is already the stock snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequestLine {
    pub item_id: String,
    pub description: String,
    pub requested_quantity: i32,
}

/// Repository for requests and their lines
#[derive(Debug, Clone)]
pub struct RequestRepository {
    base: BaseRepository,
}

impl RequestRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Inserts a Pending request and its lines. Callers own the surrounding transaction.
    pub async fn create_with<C: ConnectionTrait>(
        conn: &C,
        requester_name: &str,
        lines: Vec<NewRequestLine>,
        now: DateTime<Utc>,
    ) -> Result<RequestWithItems, ServiceError> {
        let request = RequestActiveModel {
            requester_name: Set(requester_name.to_owned()),
            status: Set(RequestStatus::Pending),
            created_at: Set(now),
            completed_at: Set(None),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (position, line) in lines.into_iter().enumerate() {
            let item = RequestItemActiveModel {
                request_id: Set(request.id),
                position: Set(position as i32),
                item_id: Set(line.item_id),
                description: Set(line.description),
                requested_quantity: Set(line.requested_quantity),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            items.push(item);
        }

        Ok(RequestWithItems { request, items })
    }

    /// Newest first (ties broken by id, newest first) with lines eagerly loaded.
    pub async fn list(&self) -> Result<Vec<RequestWithItems>, ServiceError> {
        let db = self.base.get_db();
        let requests = Request::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await?;

        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = requests.iter().map(|r| r.id).collect();
        let mut lines_by_request: HashMap<i32, Vec<RequestItemModel>> = HashMap::new();
        for line in RequestItem::find()
            .filter(request_item::Column::RequestId.is_in(ids))
            .order_by_asc(request_item::Column::RequestId)
            .order_by_asc(request_item::Column::Position)
            .all(db)
            .await?
        {
            lines_by_request.entry(line.request_id).or_default().push(line);
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = lines_by_request.remove(&request.id).unwrap_or_default();
                RequestWithItems { request, items }
            })
            .collect())
    }

    pub async fn find(&self, id: i32) -> Result<Option<RequestWithItems>, ServiceError> {
        Self::find_with(self.base.get_db(), id).await
    }

    pub async fn find_with<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Option<RequestWithItems>, ServiceError> {
        let Some(request) = Request::find_by_id(id).one(conn).await? else {
            return Ok(None);
        };
        let items = Self::lines_with(conn, id).await?;
        Ok(Some(RequestWithItems { request, items }))
    }

    async fn lines_with<C: ConnectionTrait>(
        conn: &C,
        request_id: i32,
    ) -> Result<Vec<RequestItemModel>, ServiceError> {
        Ok(RequestItem::find()
            .filter(request_item::Column::RequestId.eq(request_id))
            .order_by_asc(request_item::Column::Position)
            .all(conn)
            .await?)
    }

    /// Writes status and completion timestamp. The lifecycle guard lives in the service.
    pub async fn update_status_with<C: ConnectionTrait>(
        conn: &C,
        request: RequestModel,
        status: RequestStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<RequestModel, ServiceError> {
        let mut active: RequestActiveModel = request.into();
        active.status = Set(status);
        active.completed_at = Set(completed_at);
        Ok(active.update(conn).await?)
    }

    /// Count of requests per status, used by the dashboard.
    pub async fn count_by_status(&self) -> Result<HashMap<RequestStatus, u64>, ServiceError> {
        let rows = Request::find()
            .select_only()
            .column(Column::Status)
            .column_as(Expr::col(Column::Id).count(), "count")
            .group_by(Column::Status)
            .into_tuple::<(RequestStatus, i64)>()
            .all(self.base.get_db())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| (status, count.max(0) as u64))
            .collect())
    }
}

impl Repository for RequestRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
