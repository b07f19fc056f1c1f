//! HTTP client for the host API

use crate::api::{DashboardApi, OrderRequest, TableRequest, paths};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{OrderId, TableId};

/// HTTP client for the host
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("host URL is empty".into()));
        }
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request and decode a JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::HostStatus {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// POST a JSON action body; only the status code matters
    pub async fn post_action<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(path, status = status.as_u16(), %message, "Host rejected action");
            return Err(ClientError::ActionRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl DashboardApi for HttpClient {
    async fn fetch_tables(&self) -> ClientResult<Vec<serde_json::Value>> {
        self.get(paths::TABLES).await
    }

    async fn accept_order(&self, order_id: OrderId) -> ClientResult<()> {
        self.post_action(paths::ACCEPT, &OrderRequest { order_id }).await
    }

    async fn decline_order(&self, order_id: OrderId) -> ClientResult<()> {
        self.post_action(paths::DECLINE, &OrderRequest { order_id }).await
    }

    async fn mark_food_prepared(&self, order_id: OrderId) -> ClientResult<()> {
        self.post_action(paths::FOOD_PREPARED, &OrderRequest { order_id })
            .await
    }

    async fn generate_bill(&self, table_id: TableId) -> ClientResult<()> {
        self.post_action(paths::REQUEST_BILL, &TableRequest { table_id })
            .await
    }

    async fn verify_payment(&self, table_id: TableId) -> ClientResult<()> {
        self.post_action(paths::VERIFY_PAYMENT, &TableRequest { table_id })
            .await
    }
}
