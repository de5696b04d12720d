//! Access to the CRM backend REST API.
//!
//! The backend is the source of truth for every record; the traits below are
//! the only way the rest of the crate reaches it, so services can be tested
//! against in-memory fakes.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::dashboard::DashboardData;
use crate::domain::lead::{Lead, NewLead};
use crate::domain::order::{NewOrder, Order};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod dashboard;
pub mod errors;
pub mod lead;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod order;

#[async_trait]
pub trait LeadReader: Send + Sync {
    async fn list_leads(&self) -> RepositoryResult<Vec<Lead>>;
}

#[async_trait]
pub trait LeadWriter: Send + Sync {
    async fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    /// Replaces the full record stored under `lead.id`.
    async fn update_lead(&self, lead: &Lead) -> RepositoryResult<Lead>;
}

#[async_trait]
pub trait OrderReader: Send + Sync {
    async fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
}

#[async_trait]
pub trait OrderWriter: Send + Sync {
    async fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    /// Replaces the full record stored under `order.id`.
    async fn update_order(&self, order: &Order) -> RepositoryResult<Order>;
}

#[async_trait]
pub trait DashboardReader: Send + Sync {
    async fn get_dashboard(&self) -> RepositoryResult<DashboardData>;
}

/// Everything the UI needs from the backend.
pub trait CrmRepository:
    LeadReader + LeadWriter + OrderReader + OrderWriter + DashboardReader
{
}

impl<T> CrmRepository for T where
    T: LeadReader + LeadWriter + OrderReader + OrderWriter + DashboardReader
{
}

/// [`CrmRepository`] backed by the JSON REST API at `base_url`.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

impl HttpRepository {
    /// Builds a repository for the API served under `base_url`.
    ///
    /// No client-side timeout is configured; requests rely on reqwest's
    /// defaults.
    pub fn new(base_url: impl Into<String>) -> RepositoryResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| RepositoryError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<T> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn put_json<B, T>(&self, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("PUT {url}");
        let response = self.client.put(&url).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}
