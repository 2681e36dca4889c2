//! Recommendation board service.
//!
//! Bridges the session synchronizer and the catalog gateway: once the wizard
//! has an active session, this service binds the query item and fetches the
//! recommendation board for it.

use crate::session::SessionSynchronizer;
use lookbook_core::catalog::{CatalogGateway, Item, RecommendedItem};
use lookbook_core::error::{LookbookError, Result};
use lookbook_gateway::HttpCatalogGateway;
use std::sync::Arc;

/// Catalog operations scoped to the current session.
pub struct RecommendationService {
    /// Remote catalog client
    catalog: Arc<dyn CatalogGateway>,
    /// Source of the current-session reference
    sessions: Arc<SessionSynchronizer>,
}

impl RecommendationService {
    /// Creates a new `RecommendationService`.
    pub fn new(catalog: Arc<dyn CatalogGateway>, sessions: Arc<SessionSynchronizer>) -> Self {
        Self { catalog, sessions }
    }

    /// Creates a service wired to the HTTP catalog gateway at its default
    /// configuration.
    pub fn with_default_gateway(sessions: Arc<SessionSynchronizer>) -> Self {
        Self::new(Arc::new(HttpCatalogGateway::from_default_config()), sessions)
    }

    /// Fetches metadata for one article. Requires no session.
    pub async fn item_metadata(&self, article_id: i64) -> Result<Item> {
        self.catalog.item_metadata(article_id).await
    }

    /// Binds the query item the board is computed from to the current
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`LookbookError::NoActiveSession`] if no identified session
    /// is bound; gateway errors propagate unchanged.
    pub async fn choose_query_item(&self, article_id: i64) -> Result<()> {
        let session_id = self.active_session_id()?;
        self.catalog.set_query_item(&session_id, article_id).await
    }

    /// Fetches the query item bound to the current session.
    pub async fn query_item(&self) -> Result<Item> {
        let session_id = self.active_session_id()?;
        self.catalog.query_item(&session_id).await
    }

    /// Fetches the recommendation board for the current session.
    pub async fn board(&self) -> Result<Vec<RecommendedItem>> {
        let session_id = self.active_session_id()?;
        self.catalog.recommendations(&session_id).await
    }

    fn active_session_id(&self) -> Result<String> {
        self.sessions
            .current()
            .filter(|s| s.has_identity())
            .map(|s| s.session_id)
            .ok_or(LookbookError::NoActiveSession)
    }
}
