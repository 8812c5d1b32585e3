use chrono::Utc;
use metrics::counter;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::stock_item::Model as StockItemModel;
use crate::errors::ServiceError;
use crate::models::{StockItem, StockItemInput};
use crate::repositories::StockRepository;

/// Catalog maintenance: list, upsert and delete stock items.
#[derive(Debug, Clone)]
pub struct StockService {
    repo: StockRepository,
}

impl StockService {
    pub fn new(repo: StockRepository) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<StockItem>, ServiceError> {
        Ok(self
            .repo
            .list()
            .await?
            .into_iter()
            .map(StockItem::from)
            .collect())
    }

    /// Inserts or fully overwrites the item with the given id. Fields are stored as sent.
    #[instrument(skip(self, input), fields(item_id = ?input.id))]
    pub async fn save_item(&self, input: StockItemInput) -> Result<StockItem, ServiceError> {
        input.validate()?;

        let id = match input.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => Uuid::new_v4().simple().to_string(),
        };

        let saved = self
            .repo
            .upsert(StockItemModel {
                id,
                description: input.description,
                unit_of_measure: input.unit_of_measure,
                current_quantity: input.current_quantity,
                minimum_quantity: input.minimum_quantity,
                location: input.location,
                updated_at: Utc::now(),
            })
            .await?;

        counter!("stockroom.stock.writes", 1, "op" => "upsert");
        info!(item_id = %saved.id, critical = saved.is_critical(), "Stock item saved");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        counter!("stockroom.stock.writes", 1, "op" => "delete");
        info!(item_id = %id, "Stock item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use assert_matches::assert_matches;

    fn input(id: Option<&str>, description: &str, current: i32, minimum: i32) -> StockItemInput {
        StockItemInput {
            id: id.map(str::to_owned),
            description: description.into(),
            unit_of_measure: "Unidade".into(),
            current_quantity: current,
            minimum_quantity: minimum,
            location: "Gaveta B3".into(),
        }
    }

    #[tokio::test]
    async fn saved_item_reports_critical_flag() {
        let service = StockService::new(StockRepository::new(test_pool().await));

        let low = service
            .save_item(input(Some("5"), "Borracha Branca", 2, 10))
            .await
            .unwrap();
        assert!(low.critical);

        let ok = service
            .save_item(input(Some("1"), "Papel A4 Branco", 50, 10))
            .await
            .unwrap();
        assert!(!ok.critical);
    }

    #[tokio::test]
    async fn blank_id_gets_generated() {
        let service = StockService::new(StockRepository::new(test_pool().await));
        let saved = service
            .save_item(input(Some("  "), "Cola Branca", 5, 1))
            .await
            .unwrap();
        assert!(!saved.id.trim().is_empty());
        assert_eq!(service.list_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fields_are_stored_as_sent() {
        let service = StockService::new(StockRepository::new(test_pool().await));
        let mut sent = input(Some("7"), " Clips ", 4, 2);
        sent.location = " Gaveta C1 ".into();
        let saved = service.save_item(sent).await.unwrap();
        assert_eq!(saved.description, " Clips ");
        assert_eq!(saved.location, " Gaveta C1 ");

        let listed = service.list_items().await.unwrap();
        assert_eq!(listed[0].description, " Clips ");
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let service = StockService::new(StockRepository::new(test_pool().await));
        assert_matches!(
            service.save_item(input(Some("7"), "   ", 4, 2)).await,
            Err(ServiceError::ValidationError(_))
        );
        assert!(service.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_quantities_are_rejected() {
        let service = StockService::new(StockRepository::new(test_pool().await));
        assert_matches!(
            service.save_item(input(Some("1"), "Papel", -1, 0)).await,
            Err(ServiceError::ValidationError(_))
        );
        assert!(service.list_items().await.unwrap().is_empty());
    }
}
