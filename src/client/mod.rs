/*!
 * # Client
 *
 * Typed access to a running Stockroom API:
 *
 * - [`ApiClient`] wraps every route and sends the acting user header once logged in
 * - [`InventoryStore`] keeps a local snapshot and refreshes it after each mutation
 * - [`Screen`] and [`StatusBadge`] hold the presentation rules front ends share
 */

mod api;
mod store;
mod view;

pub use api::ApiClient;
pub use store::{InventoryStore, Snapshot};
pub use view::{BadgeTone, Screen, StatusBadge};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status for errors the server answered, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
