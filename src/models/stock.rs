use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::entities::stock_item;

/// A stock item as returned by the API, with the derived `critical` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    pub description: String,
    pub unit_of_measure: String,
    pub current_quantity: i32,
    pub minimum_quantity: i32,
    pub location: String,
    /// `currentQuantity <= minimumQuantity`
    pub critical: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<stock_item::Model> for StockItem {
    fn from(model: stock_item::Model) -> Self {
        Self {
            critical: model.is_critical(),
            id: model.id,
            description: model.description,
            unit_of_measure: model.unit_of_measure,
            current_quantity: model.current_quantity,
            minimum_quantity: model.minimum_quantity,
            location: model.location,
            updated_at: model.updated_at,
        }
    }
}

impl StockItem {
    /// Body to send back to `POST /estoque` to overwrite this item.
    pub fn to_input(&self) -> StockItemInput {
        StockItemInput {
            id: Some(self.id.clone()),
            description: self.description.clone(),
            unit_of_measure: self.unit_of_measure.clone(),
            current_quantity: self.current_quantity,
            minimum_quantity: self.minimum_quantity,
            location: self.location.clone(),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Description must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Upsert body for `POST /estoque`. Accepts the Portuguese field names as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItemInput {
    /// Generated by the server when absent or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64))]
    pub id: Option<String>,
    #[serde(alias = "descricao")]
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub description: String,
    #[serde(default, alias = "unidadeMedida")]
    #[validate(length(max = 64))]
    pub unit_of_measure: String,
    #[serde(alias = "quantidadeAtual")]
    #[validate(range(min = 0))]
    pub current_quantity: i32,
    #[serde(alias = "quantidadeMinima")]
    #[validate(range(min = 0))]
    pub minimum_quantity: i32,
    #[serde(default, alias = "localizacao")]
    #[validate(length(max = 128))]
    pub location: String,
}

/// Response to `DELETE /estoque/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedStockItem {
    pub id: String,
    pub deleted: bool,
}
