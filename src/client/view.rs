use serde::Serialize;

use crate::entities::{request::RequestStatus, user::Profile};

/// Screens a front end can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Screen {
    Dashboard,
    Stock,
    NewRequest,
    MyRequests,
    ManageRequests,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Dashboard,
        Screen::Stock,
        Screen::NewRequest,
        Screen::MyRequests,
        Screen::ManageRequests,
    ];

    pub fn is_visible_for(self, profile: Profile) -> bool {
        match self {
            Screen::Dashboard => true,
            Screen::Stock | Screen::ManageRequests => {
                matches!(profile, Profile::WarehouseStaff | Profile::Supervisor)
            }
            Screen::NewRequest | Screen::MyRequests => {
                matches!(profile, Profile::Requester | Profile::Supervisor)
            }
        }
    }

    /// Screens offered to `profile`, in menu order.
    pub fn visible_for(profile: Profile) -> Vec<Screen> {
        Self::ALL
            .into_iter()
            .filter(|screen| screen.is_visible_for(profile))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeTone {
    Warning,
    Info,
    Danger,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

impl From<RequestStatus> for StatusBadge {
    fn from(status: RequestStatus) -> Self {
        let (label, tone) = match status {
            RequestStatus::Pending => ("Pending", BadgeTone::Warning),
            RequestStatus::Approved => ("Approved", BadgeTone::Info),
            RequestStatus::Rejected => ("Rejected", BadgeTone::Danger),
            RequestStatus::Completed => ("Completed", BadgeTone::Success),
        };
        Self { label, tone }
    }
}
