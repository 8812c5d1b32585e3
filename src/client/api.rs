use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ClientError;
use crate::auth::ACTOR_HEADER;
use crate::entities::request::RequestStatus;
use crate::errors::ErrorResponse;
use crate::models::{
    Credentials, DashboardSummary, DeletedStockItem, NewRequest, Request, StatusUpdate, StockItem,
    StockItemInput, User,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin reqwest wrapper over the HTTP routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    actor: Option<String>,
}

impl ApiClient {
    /// `base_url` may carry a prefix such as `http://host:8080/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url,
            actor: None,
        })
    }

    pub fn with_actor(mut self, email: impl Into<String>) -> Self {
        self.actor = Some(email.into());
        self
    }

    pub fn set_actor(&mut self, email: Option<String>) {
        self.actor = email;
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Calling stockroom API");
        let builder = self.http.request(method, url);
        Ok(match &self.actor {
            Some(email) => builder.header(ACTOR_HEADER, email),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn signup(&self, credentials: &Credentials) -> Result<User, ClientError> {
        Self::send(self.request(Method::POST, &["auth", "signup"])?.json(credentials)).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, ClientError> {
        Self::send(self.request(Method::POST, &["auth", "login"])?.json(credentials)).await
    }

    pub async fn list_stock(&self) -> Result<Vec<StockItem>, ClientError> {
        Self::send(self.request(Method::GET, &["estoque"])?).await
    }

    pub async fn save_stock_item(&self, item: &StockItemInput) -> Result<StockItem, ClientError> {
        Self::send(self.request(Method::POST, &["estoque"])?.json(item)).await
    }

    pub async fn delete_stock_item(&self, id: &str) -> Result<DeletedStockItem, ClientError> {
        Self::send(self.request(Method::DELETE, &["estoque", id])?).await
    }

    pub async fn list_requests(&self) -> Result<Vec<Request>, ClientError> {
        Self::send(self.request(Method::GET, &["solicitacoes"])?).await
    }

    pub async fn create_request(&self, request: &NewRequest) -> Result<Request, ClientError> {
        Self::send(self.request(Method::POST, &["solicitacoes"])?.json(request)).await
    }

    pub async fn update_status(
        &self,
        id: i32,
        status: RequestStatus,
    ) -> Result<Request, ClientError> {
        let id = id.to_string();
        Self::send(
            self.request(Method::PATCH, &["solicitacoes", &id, "status"])?
                .json(&StatusUpdate { status }),
        )
        .await
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, ClientError> {
        Self::send(self.request(Method::GET, &["dashboard"])?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn endpoints_keep_the_base_prefix() {
        let client = ApiClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            client.endpoint(&["estoque", "a b"]).unwrap().as_str(),
            "http://localhost:8080/api/estoque/a%20b"
        );

        let bare = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            bare.endpoint(&["dashboard"]).unwrap().as_str(),
            "http://localhost:8080/dashboard"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert_matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        );
        assert_matches!(
            ApiClient::new("mailto:someone@escola.br"),
            Err(ClientError::InvalidBaseUrl(_))
        );
    }
}
