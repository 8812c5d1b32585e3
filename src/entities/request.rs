use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a material request.
///
/// `Pending -> Approved -> Completed` and `Pending -> Rejected`. `Completed` and
/// `Rejected` are terminal.
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
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RequestStatus {
    #[sea_orm(string_value = "Pending")]
    #[serde(alias = "Pendente")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    #[serde(alias = "Aprovada")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    #[serde(alias = "Rejeitada")]
    Rejected,
    #[sea_orm(string_value = "Completed")]
    #[serde(alias = "Concluída")]
    Completed,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Completed)
    }

    /// Whether `self -> next` is one of the lifecycle edges. Staying put is not an edge.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Approved, RequestStatus::Completed)
        )
    }
}

/// The `requests` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub requester_name: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::request_item::Entity")]
    Items,
}

impl Related<super::request_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sea_orm::Iterable;

    #[rstest]
    #[case(RequestStatus::Pending, RequestStatus::Approved, true)]
    #[case(RequestStatus::Pending, RequestStatus::Rejected, true)]
    #[case(RequestStatus::Approved, RequestStatus::Completed, true)]
    #[case(RequestStatus::Pending, RequestStatus::Completed, false)]
    #[case(RequestStatus::Approved, RequestStatus::Rejected, false)]
    #[case(RequestStatus::Approved, RequestStatus::Pending, false)]
    #[case(RequestStatus::Rejected, RequestStatus::Approved, false)]
    #[case(RequestStatus::Completed, RequestStatus::Pending, false)]
    #[case(RequestStatus::Pending, RequestStatus::Pending, false)]
    fn transition_table(
        #[case] from: RequestStatus,
        #[case] to: RequestStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn no_edge_leads_back_to_pending() {
        for from in RequestStatus::iter() {
            assert!(!from.can_transition_to(RequestStatus::Pending));
        }
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for from in RequestStatus::iter().filter(|s| s.is_terminal()) {
            for to in RequestStatus::iter() {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn accepts_portuguese_labels() {
        let status: RequestStatus = serde_json::from_str("\"Concluída\"").unwrap();
        assert_eq!(status, RequestStatus::Completed);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Completed\"");
    }
}
