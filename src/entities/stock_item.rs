use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `stock_items` table. Rows are written by upsert keyed on the caller-supplied id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    pub unit_of_measure: String,
    pub current_quantity: i32,
    pub minimum_quantity: i32,
    pub location: String,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// At or below the minimum. Derived on every read, never stored.
    pub fn is_critical(&self) -> bool {
        self.current_quantity <= self.minimum_quantity
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
