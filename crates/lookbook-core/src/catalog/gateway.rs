//! Catalog gateway trait.
//!
//! Defines the interface for article metadata lookup and per-session
//! recommendation retrieval against the remote service.

use super::model::{Item, RecommendedItem};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the catalog side of the remote service.
///
/// Failure taxonomy matches [`SessionGateway`]: transport failures surface
/// as `RemoteUnavailable`, unknown ids as `NotFound`, other non-success
/// responses as `RemoteRejected`.
///
/// [`SessionGateway`]: crate::session::SessionGateway
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetches metadata for one article.
    async fn item_metadata(&self, article_id: i64) -> Result<Item>;

    /// Binds the query item the recommendation board is computed from to a
    /// session. The server prepares recommendations as a side effect.
    async fn set_query_item(&self, session_id: &str, article_id: i64) -> Result<()>;

    /// Fetches the query item previously bound to a session.
    async fn query_item(&self, session_id: &str) -> Result<Item>;

    /// Fetches the recommendation board for a session.
    async fn recommendations(&self, session_id: &str) -> Result<Vec<RecommendedItem>>;
}
