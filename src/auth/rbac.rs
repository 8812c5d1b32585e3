use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

use super::permissions::consts;
use crate::entities::user::Profile;

lazy_static! {
    /// Permissions granted to each profile.
    pub static ref PROFILE_PERMISSIONS: HashMap<Profile, HashSet<&'static str>> = {
        let mut grants = HashMap::new();

        grants.insert(
            Profile::Requester,
            HashSet::from([
                consts::STOCK_READ,
                consts::REQUESTS_READ,
                consts::REQUESTS_CREATE,
                consts::DASHBOARD_READ,
            ]),
        );

        grants.insert(
            Profile::WarehouseStaff,
            HashSet::from([
                consts::STOCK_READ,
                consts::STOCK_WRITE,
                consts::REQUESTS_READ,
                consts::REQUESTS_MANAGE,
                consts::DASHBOARD_READ,
            ]),
        );

        // Supervisors may do everything
        grants.insert(Profile::Supervisor, consts::ALL.into_iter().collect());

        grants
    };
}

pub fn profile_has_permission(profile: Profile, permission: &str) -> bool {
    PROFILE_PERMISSIONS
        .get(&profile)
        .map_or(false, |granted| granted.contains(permission))
}

/// Sorted permission list for a profile.
pub fn permissions_for(profile: Profile) -> Vec<&'static str> {
    let mut permissions: Vec<_> = PROFILE_PERMISSIONS
        .get(&profile)
        .map(|granted| granted.iter().copied().collect())
        .unwrap_or_default();
    permissions.sort_unstable();
    permissions
}
