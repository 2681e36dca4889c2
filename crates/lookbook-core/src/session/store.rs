//! Local session store trait.
//!
//! Defines the interface for the persistent key-value mirror of the last
//! known-good session, used as the fallback source of truth when the remote
//! service is unreachable.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// Storage key holding the bare session id, used as the lookup key for a
/// refresh attempt.
pub const SESSION_ID_KEY: &str = "sessionId";

/// Storage key holding the full serialized session record, used as the
/// last-resort source of truth.
pub const SESSION_DATA_KEY: &str = "sessionData";

/// An abstract persistent mirror of the last known-good session.
///
/// The store keeps exactly two keys, [`SESSION_ID_KEY`] and
/// [`SESSION_DATA_KEY`], and implementations must keep them paired: after
/// [`save`](SessionStore::save) both are present, after
/// [`clear`](SessionStore::clear) both are absent.
///
/// The record is handed out raw; deserialization is the caller's concern so
/// that a corrupt record can be detected and purged rather than surfaced as
/// a hard error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the stored session id, if any.
    async fn session_id(&self) -> Option<String>;

    /// Reads the raw serialized session record, if any.
    async fn record(&self) -> Option<String>;

    /// Mirrors a session into the store, writing both keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes both keys. Idempotent.
    async fn clear(&self) -> Result<()>;
}
