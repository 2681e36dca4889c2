//! In-memory SessionStore implementation.
//!
//! Backs the application-layer tests: behaves like the file store but keeps
//! the two storage keys in a map, supports seeding raw (including corrupt)
//! records, and can simulate write failures.

use async_trait::async_trait;
use lookbook_core::error::{LookbookError, Result};
use lookbook_core::session::{SESSION_DATA_KEY, SESSION_ID_KEY, Session, SessionStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// A session store holding the key pair in memory.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
    fail_saves: AtomicBool,
}

impl InMemorySessionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw key pair, bypassing serialization.
    pub async fn seed(&self, session_id: &str, record: &str) {
        let mut entries = self.entries.lock().await;
        entries.insert(SESSION_ID_KEY.to_string(), session_id.to_string());
        entries.insert(SESSION_DATA_KEY.to_string(), record.to_string());
    }

    /// Removes a single key, breaking the pairing on purpose.
    pub async fn drop_key(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }

    /// Makes subsequent [`SessionStore::save`] calls fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true if no key is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn session_id(&self) -> Option<String> {
        self.entries.lock().await.get(SESSION_ID_KEY).cloned()
    }

    async fn record(&self) -> Option<String> {
        self.entries.lock().await.get(SESSION_DATA_KEY).cloned()
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(LookbookError::storage("simulated save failure"));
        }
        let mut entries = self.entries.lock().await;
        entries.insert(
            SESSION_DATA_KEY.to_string(),
            session.to_transport().to_string(),
        );
        entries.insert(SESSION_ID_KEY.to_string(), session.session_id.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(SESSION_ID_KEY);
        entries.remove(SESSION_DATA_KEY);
        Ok(())
    }
}
