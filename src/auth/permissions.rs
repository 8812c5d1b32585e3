/*!
 * # Permissions Module
 *
 * Permission strings are `resource:action`. Routes name the permission they need;
 * profiles are granted sets of them in [`super::rbac`].
 */

/// Permission string constants for compile-time safety
pub mod consts {
    // Stock
    pub const STOCK_READ: &str = "stock:read";
    pub const STOCK_WRITE: &str = "stock:write";

    // Requests
    pub const REQUESTS_READ: &str = "requests:read";
    pub const REQUESTS_CREATE: &str = "requests:create";
    pub const REQUESTS_MANAGE: &str = "requests:manage";

    // Dashboard
    pub const DASHBOARD_READ: &str = "dashboard:read";

    pub const ALL: [&str; 6] = [
        STOCK_READ,
        STOCK_WRITE,
        REQUESTS_READ,
        REQUESTS_CREATE,
        REQUESTS_MANAGE,
        DASHBOARD_READ,
    ];
}
