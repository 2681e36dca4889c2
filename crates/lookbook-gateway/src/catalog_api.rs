//! HTTP implementation of the catalog gateway.

use crate::config::ApiConfig;
use crate::http::{check_status, transport_error};
use async_trait::async_trait;
use lookbook_core::catalog::{CatalogGateway, Item, RecommendedItem};
use lookbook_core::error::{LookbookError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Catalog gateway that talks to the remote wizard service.
#[derive(Clone)]
pub struct HttpCatalogGateway {
    client: Client,
    config: ApiConfig,
}

impl HttpCatalogGateway {
    /// Creates a new gateway with explicit configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a gateway from `config.toml` / environment configuration.
    pub fn from_default_config() -> Self {
        Self::new(ApiConfig::load())
    }

    /// Decodes a successful response body into a typed record.
    async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response.json().await.map_err(|e| LookbookError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn item_metadata(&self, article_id: i64) -> Result<Item> {
        let url = format!("{}/item/{}", self.config.base_url, article_id);
        tracing::debug!("[HttpCatalogGateway] GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(transport_error)?;

        let id = article_id.to_string();
        let response = check_status(response, Some(("item", &id))).await?;
        Self::read_body(response).await
    }

    async fn set_query_item(&self, session_id: &str, article_id: i64) -> Result<()> {
        let url = format!(
            "{}/session/{}/query-item/{}",
            self.config.base_url, session_id, article_id
        );
        tracing::debug!("[HttpCatalogGateway] POST {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response, Some(("session", session_id))).await?;
        Ok(())
    }

    async fn query_item(&self, session_id: &str) -> Result<Item> {
        let url = format!("{}/session/{}/query-item", self.config.base_url, session_id);
        tracing::debug!("[HttpCatalogGateway] GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, Some(("query_item", session_id))).await?;
        Self::read_body(response).await
    }

    async fn recommendations(&self, session_id: &str) -> Result<Vec<RecommendedItem>> {
        let url = format!(
            "{}/session/{}/recommendations",
            self.config.base_url, session_id
        );
        tracing::debug!("[HttpCatalogGateway] GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, Some(("session", session_id))).await?;
        Self::read_body(response).await
    }
}
