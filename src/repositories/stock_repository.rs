use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::stock_item::{
    ActiveModel as StockItemActiveModel, Column, Entity as StockItem, Model as StockItemModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for stock items keyed by their caller-supplied id
#[derive(Debug, Clone)]
pub struct StockRepository {
    base: BaseRepository,
}

impl StockRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All items, description ascending, tie-broken by id.
    pub async fn list(&self) -> Result<Vec<StockItemModel>, ServiceError> {
        Ok(StockItem::find()
            .order_by_asc(Column::Description)
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await?)
    }

    pub async fn find(&self, id: &str) -> Result<Option<StockItemModel>, ServiceError> {
        Self::find_with(self.base.get_db(), id).await
    }

    pub async fn find_with<C: ConnectionTrait>(
        conn: &C,
        id: &str,
    ) -> Result<Option<StockItemModel>, ServiceError> {
        Ok(StockItem::find_by_id(id.to_owned()).one(conn).await?)
    }

    /// Loads every item whose id is in `ids`. Missing ids are simply absent from the result.
    pub async fn find_many_with<C: ConnectionTrait>(
        conn: &C,
        ids: &[String],
    ) -> Result<Vec<StockItemModel>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(StockItem::find()
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .all(conn)
            .await?)
    }

    /// Inserts the item or overwrites every field of the row with the same id.
    pub async fn upsert(&self, item: StockItemModel) -> Result<StockItemModel, ServiceError> {
        let db = self.base.get_db();
        let id = item.id.clone();

        let active = StockItemActiveModel {
            id: Set(item.id),
            description: Set(item.description),
            unit_of_measure: Set(item.unit_of_measure),
            current_quantity: Set(item.current_quantity),
            minimum_quantity: Set(item.minimum_quantity),
            location: Set(item.location),
            updated_at: Set(item.updated_at),
        };

        StockItem::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Description,
                        Column::UnitOfMeasure,
                        Column::CurrentQuantity,
                        Column::MinimumQuantity,
                        Column::Location,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Self::find_with(db, &id)
            .await?
            .ok_or_else(|| ServiceError::InternalError(format!("Stock item {} vanished after upsert", id)))
    }

    /// Removes the row. A missing id is `NotFound`, including a repeated delete.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let result = StockItem::delete_by_id(id.to_owned())
            .exec(self.base.get_db())
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(format!("Stock item {}", id)));
        }
        Ok(())
    }

    /// Subtracts `quantity` only when enough is on hand. Returns whether a row was updated.
    pub async fn decrement_with<C: ConnectionTrait>(
        conn: &C,
        id: &str,
        quantity: i32,
        now: DateTime<Utc>,
    ) -> Result<bool, ServiceError> {
        let result = StockItem::update_many()
            .col_expr(
                Column::CurrentQuantity,
                Expr::col(Column::CurrentQuantity).sub(quantity),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::CurrentQuantity.gte(quantity))
            .exec(conn)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

impl Repository for StockRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use assert_matches::assert_matches;

    fn item(id: &str, description: &str, current: i32, minimum: i32) -> StockItemModel {
        StockItemModel {
            id: id.into(),
            description: description.into(),
            unit_of_measure: "Unidade".into(),
            current_quantity: current,
            minimum_quantity: minimum,
            location: "Armário A1".into(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn list_is_sorted_by_description() {
        let repo = StockRepository::new(test_pool().await);
        repo.upsert(item("1", "Papel A4", 50, 10)).await.unwrap();
        repo.upsert(item("2", "Borracha", 2, 10)).await.unwrap();
        repo.upsert(item("3", "Caneta", 15, 5)).await.unwrap();

        let descriptions: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.description)
            .collect();
        assert_eq!(descriptions, vec!["Borracha", "Caneta", "Papel A4"]);
    }

    #[tokio::test]
    async fn upsert_overwrites_every_field() {
        let repo = StockRepository::new(test_pool().await);
        repo.upsert(item("5", "Borracha Branca", 2, 10)).await.unwrap();

        let mut changed = item("5", "Borracha Verde", 40, 4);
        changed.unit_of_measure = "Caixa".into();
        changed.location = "Gaveta B3".into();
        let stored = repo.upsert(changed).await.unwrap();

        assert_eq!(stored.description, "Borracha Verde");
        assert_eq!(stored.unit_of_measure, "Caixa");
        assert_eq!(stored.current_quantity, 40);
        assert_eq!(stored.minimum_quantity, 4);
        assert_eq!(stored.location, "Gaveta B3");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let repo = StockRepository::new(test_pool().await);
        repo.upsert(item("9", "Clips", 100, 20)).await.unwrap();

        repo.delete("9").await.unwrap();
        assert_matches!(repo.delete("9").await, Err(ServiceError::NotFound(_)));
        assert!(repo.find("9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn decrement_refuses_to_go_negative() {
        let pool = test_pool().await;
        let repo = StockRepository::new(pool.clone());
        repo.upsert(item("3", "Toner", 3, 2)).await.unwrap();

        assert!(!StockRepository::decrement_with(pool.as_ref(), "3", 4, Utc::now())
            .await
            .unwrap());
        assert!(StockRepository::decrement_with(pool.as_ref(), "3", 3, Utc::now())
            .await
            .unwrap());
        assert_eq!(repo.find("3").await.unwrap().unwrap().current_quantity, 0);
    }
}
