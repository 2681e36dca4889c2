//! HTTP implementation of the remote session gateway.

use crate::config::ApiConfig;
use crate::http::{check_status, transport_error};
use async_trait::async_trait;
use lookbook_core::error::{LookbookError, Result};
use lookbook_core::session::{Session, SessionGateway, SessionPatch};
use reqwest::Client;

/// Session gateway that talks to the remote wizard service.
///
/// Consumes the HTTP surface `POST /session`, `PUT /session/{id}`,
/// `GET /session/{id}`. Requests carry the configured per-request timeout;
/// nothing is retried here.
#[derive(Clone)]
pub struct HttpSessionGateway {
    client: Client,
    config: ApiConfig,
}

impl HttpSessionGateway {
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

    /// Decodes a successful response body into a session.
    async fn read_session(response: reqwest::Response) -> Result<Session> {
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LookbookError::malformed_session(format!("invalid JSON body: {}", e)))?;
        Session::from_transport(&body)
    }
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
    async fn create(&self) -> Result<Session> {
        let url = format!("{}/session", self.config.base_url);
        tracing::debug!("[HttpSessionGateway] POST {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, None).await?;
        let session = Self::read_session(response).await?;
        tracing::debug!("[HttpSessionGateway] Created session {}", session.session_id);
        Ok(session)
    }

    async fn update(&self, session_id: &str, patch: &SessionPatch) -> Result<Session> {
        let url = format!("{}/session/{}", self.config.base_url, session_id);
        tracing::debug!("[HttpSessionGateway] PUT {}", url);

        let response = self
            .client
            .put(&url)
            .json(patch)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, Some(("session", session_id))).await?;
        Self::read_session(response).await
    }

    async fn get(&self, session_id: &str) -> Result<Session> {
        let url = format!("{}/session/{}", self.config.base_url, session_id);
        tracing::debug!("[HttpSessionGateway] GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, Some(("session", session_id))).await?;
        Self::read_session(response).await
    }
}
