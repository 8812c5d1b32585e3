use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::{request::RequestStatus, request_item};
use crate::repositories::RequestWithItems;

/// A material request with its lines in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: i32,
    pub requester_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub status: RequestStatus,
    pub items: Vec<RequestedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestedLine {
    pub item_id: String,
    pub description: String,
    pub requested_quantity: i32,
}

impl From<request_item::Model> for RequestedLine {
    fn from(model: request_item::Model) -> Self {
        Self {
            item_id: model.item_id,
            description: model.description,
            requested_quantity: model.requested_quantity,
        }
    }
}

impl From<RequestWithItems> for Request {
    fn from(value: RequestWithItems) -> Self {
        let RequestWithItems { request, items } = value;
        Self {
            id: request.id,
            requester_name: request.requester_name,
            created_at: request.created_at,
            completed_at: request.completed_at,
            status: request.status,
            items: items.into_iter().map(RequestedLine::from).collect(),
        }
    }
}

/// Body of `POST /solicitacoes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    /// Defaults to the acting user's email.
    #[serde(default, alias = "solicitanteNome", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub requester_name: Option<String>,
    #[serde(default, alias = "itens")]
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<NewRequestLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRequestLine {
    #[validate(length(min = 1))]
    pub item_id: String,
    /// Filled from the stock item when blank.
    #[serde(default, alias = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "quantidadeSolicitada")]
    #[validate(range(min = 1))]
    pub requested_quantity: i32,
}

/// Body of `PATCH /solicitacoes/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: RequestStatus,
}
