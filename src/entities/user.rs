use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role a user operates under. Gates which routes and screens are available.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Profile {
    #[sea_orm(string_value = "Requester")]
    #[serde(alias = "Solicitante")]
    Requester,
    #[sea_orm(string_value = "WarehouseStaff")]
    #[serde(alias = "Funcionário Almoxarifado")]
    WarehouseStaff,
    #[sea_orm(string_value = "Supervisor")]
    Supervisor,
}

/// The `users` table. Passwords are stored as given.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub password: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
