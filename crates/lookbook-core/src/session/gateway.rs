//! Remote session gateway trait.
//!
//! Defines the interface for session create/read/update against the remote
//! session service.

use super::model::{Session, SessionPatch};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the remote session service.
///
/// This trait defines the contract for the three network round trips the
/// synchronization layer performs, decoupling it from the concrete HTTP
/// transport. Every operation may fail; none is retried automatically at
/// this layer.
///
/// # Implementation Notes
///
/// Implementations should map failures onto the shared error taxonomy:
/// - network/timeout failures → [`LookbookError::RemoteUnavailable`]
/// - 4xx/5xx responses → [`LookbookError::RemoteRejected`]
/// - unknown session ids → [`LookbookError::NotFound`]
///
/// [`LookbookError::RemoteUnavailable`]: crate::error::LookbookError::RemoteUnavailable
/// [`LookbookError::RemoteRejected`]: crate::error::LookbookError::RemoteRejected
/// [`LookbookError::NotFound`]: crate::error::LookbookError::NotFound
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Allocates a new session server-side.
    ///
    /// # Returns
    ///
    /// The freshly created session, with server-assigned `session_id` and
    /// `created_at` and `is_active` set.
    async fn create(&self) -> Result<Session>;

    /// Merges `patch` into the server's record for `session_id`.
    ///
    /// Keys absent from the patch are left untouched server-side; the
    /// gateway, not the caller, owns the merge semantics. The caller only
    /// decides which fields to send.
    ///
    /// # Returns
    ///
    /// The canonical session reflecting the merge.
    async fn update(&self, session_id: &str, patch: &SessionPatch) -> Result<Session>;

    /// Fetches the current canonical session for `session_id`.
    async fn get(&self, session_id: &str) -> Result<Session>;
}
