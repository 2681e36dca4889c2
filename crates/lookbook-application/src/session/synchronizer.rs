//! Session synchronizer.
//!
//! The single owner of the "current session" reference. All wizard steps go
//! through the operations here; the synchronizer merges each change into the
//! current session, persists it through the remote gateway, and mirrors the
//! canonical result into the local store so a later visit can survive a
//! remote outage.

use lookbook_core::error::{LookbookError, Result};
use lookbook_core::session::{SelectionField, Session, SessionGateway, SessionStore};
use lookbook_gateway::HttpSessionGateway;
use lookbook_infrastructure::FileSessionStore;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Coordinates one logical session across memory, the remote session
/// service, and the local mirror.
///
/// The current session is exposed as observable state: every successful
/// mutation notifies subscribers of the [`watch`] channel returned by
/// [`SessionSynchronizer::subscribe`]. The synchronizer is the channel's
/// only writer.
///
/// Update operations are serialized through an internal async mutex held
/// across the network round trip, so a second `update_field` issued before
/// an earlier one resolves cannot overwrite newer local state with a stale
/// server response.
pub struct SessionSynchronizer {
    /// Remote persistence tier (canonical)
    gateway: Arc<dyn SessionGateway>,
    /// Local persistence tier (fallback mirror)
    store: Arc<dyn SessionStore>,
    /// Observable current-session state; `None` while unbound
    current: watch::Sender<Option<Session>>,
    /// Serializes the update path
    update_lock: Mutex<()>,
}

impl SessionSynchronizer {
    /// Creates a new synchronizer over the given persistence tiers.
    pub fn new(gateway: Arc<dyn SessionGateway>, store: Arc<dyn SessionStore>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            gateway,
            store,
            current,
            update_lock: Mutex::new(()),
        }
    }

    /// Creates a synchronizer wired to the HTTP gateway and the file-backed
    /// store at their default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be resolved or created.
    pub fn from_default_environment() -> Result<Self> {
        Ok(Self::new(
            Arc::new(HttpSessionGateway::from_default_config()),
            Arc::new(FileSessionStore::default_location()?),
        ))
    }

    /// Returns a snapshot of the current session, if one is bound.
    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// Subscribes to current-session changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    /// Creates a new session on the remote service and installs it as the
    /// current session.
    ///
    /// # Errors
    ///
    /// Returns [`LookbookError::CreationFailed`] wrapping the gateway error.
    /// The current session is left untouched on failure.
    pub async fn create_session(&self) -> Result<Session> {
        let session = self.gateway.create().await.map_err(|e| {
            tracing::warn!("[SessionSynchronizer] Failed to create session: {}", e);
            LookbookError::creation_failed(e)
        })?;

        tracing::debug!(
            "[SessionSynchronizer] Created session {}",
            session.session_id
        );
        self.current.send_replace(Some(session));

        self.activate_and_persist()
            .await
            .ok_or_else(|| LookbookError::internal("session unbound during activation"))
    }

    /// Marks the current session active and mirrors it into the local store.
    ///
    /// Returns the activated session, or `None` if no session is bound. A
    /// session without a non-empty `session_id` is never mirrored.
    pub async fn activate_and_persist(&self) -> Option<Session> {
        let mut session = self.current()?;
        session.is_active = true;
        self.current.send_replace(Some(session.clone()));
        self.mirror(&session).await;
        Some(session)
    }

    /// Merges one selection-field change into the session.
    ///
    /// The update payload is cumulative: it carries every currently-known
    /// selection field plus the new value, so a later step never erases an
    /// earlier answer server-side. On success the canonical server result
    /// becomes the current session and is mirrored locally.
    ///
    /// # Errors
    ///
    /// - [`LookbookError::NoActiveSession`] if no identified session is bound
    /// - [`LookbookError::UpdateFailed`] wrapping the gateway error; the
    ///   current session keeps its pre-call value
    pub async fn update_field(
        &self,
        field: SelectionField,
        value: impl Into<String>,
    ) -> Result<Session> {
        let _guard = self.update_lock.lock().await;

        let current = self
            .current()
            .filter(Session::has_identity)
            .ok_or(LookbookError::NoActiveSession)?;
        let patch = current.selection_patch().with(field, value);

        tracing::debug!(
            "[SessionSynchronizer] Updating {} for session {}",
            field,
            current.session_id
        );

        match self.gateway.update(&current.session_id, &patch).await {
            Ok(session) => {
                self.current.send_replace(Some(session.clone()));
                self.mirror(&session).await;
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(
                    "[SessionSynchronizer] Failed to update {} for session {}: {}",
                    field,
                    current.session_id,
                    e
                );
                Err(LookbookError::update_failed(e))
            }
        }
    }

    /// Restores the session a previous visit left behind, if any.
    ///
    /// Tries the remote service first and falls back to the local mirror
    /// when the remote is unreachable. A missing or unreadable mirror record
    /// is purged and degrades to "no session"; this operation never fails.
    pub async fn load_stored_session(&self) {
        let Some(session_id) = self.store.session_id().await else {
            tracing::debug!("[SessionSynchronizer] No stored session to load");
            return;
        };

        match self.gateway.get(&session_id).await {
            Ok(session) => {
                tracing::debug!(
                    "[SessionSynchronizer] Loaded session {} from remote",
                    session_id
                );
                self.mirror(&session).await;
                self.current.send_replace(Some(session));
            }
            Err(e) => {
                tracing::warn!(
                    "[SessionSynchronizer] Remote load for session {} failed, trying local mirror: {}",
                    session_id,
                    e
                );
                self.restore_from_mirror().await;
            }
        }
    }

    /// Unbinds the current session and removes the local mirror. Idempotent.
    pub async fn clear_session(&self) {
        self.current.send_replace(None);
        self.purge_mirror().await;
        tracing::debug!("[SessionSynchronizer] Session cleared");
    }

    /// Writes a session into the local mirror, unless it lacks identity.
    /// Mirror failures are logged, never propagated: the remote copy is
    /// canonical and the mirror only serves degraded-mode loads.
    async fn mirror(&self, session: &Session) {
        if !session.has_identity() {
            tracing::warn!("[SessionSynchronizer] Session has no identity, not mirroring");
            return;
        }
        if let Err(e) = self.store.save(session).await {
            tracing::warn!(
                "[SessionSynchronizer] Failed to mirror session {}: {}",
                session.session_id,
                e
            );
        }
    }

    /// Installs the mirrored session record, purging the mirror if the
    /// record is missing or unreadable.
    async fn restore_from_mirror(&self) {
        let Some(raw) = self.store.record().await else {
            tracing::warn!("[SessionSynchronizer] Stored record missing, purging mirror");
            self.purge_mirror().await;
            return;
        };

        let parsed = serde_json::from_str::<serde_json::Value>(&raw)
            .map_err(LookbookError::from)
            .and_then(|value| Session::from_transport(&value));

        match parsed {
            Ok(session) => {
                tracing::debug!(
                    "[SessionSynchronizer] Restored session {} from local mirror",
                    session.session_id
                );
                self.current.send_replace(Some(session));
            }
            Err(e) => {
                tracing::warn!(
                    "[SessionSynchronizer] Stored record unreadable, purging mirror: {}",
                    e
                );
                self.purge_mirror().await;
            }
        }
    }

    async fn purge_mirror(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::warn!("[SessionSynchronizer] Failed to purge mirror: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use lookbook_core::session::SessionPatch;
    use lookbook_infrastructure::InMemorySessionStore;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    // Scripted session service double. Keeps a server-side session map,
    // records every update payload, and can be told to fail per operation.
    #[derive(Default)]
    struct MockSessionGateway {
        sessions: Mutex<HashMap<String, Session>>,
        patches: Mutex<Vec<(String, SessionPatch)>>,
        fail_create: AtomicBool,
        fail_update: AtomicBool,
        fail_get: AtomicBool,
        create_without_identity: AtomicBool,
        get_calls: AtomicUsize,
        gate_next_update: AtomicBool,
        update_gate: Notify,
    }

    impl MockSessionGateway {
        fn new() -> Self {
            Self::default()
        }

        async fn seed_server(&self, session: Session) {
            self.sessions
                .lock()
                .await
                .insert(session.session_id.clone(), session);
        }

        async fn recorded_patches(&self) -> Vec<(String, SessionPatch)> {
            self.patches.lock().await.clone()
        }
    }

    #[async_trait]
    impl SessionGateway for MockSessionGateway {
        async fn create(&self) -> lookbook_core::error::Result<Session> {
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(LookbookError::remote_unavailable("connection refused"));
            }
            let session_id = if self.create_without_identity.load(Ordering::SeqCst) {
                String::new()
            } else {
                uuid::Uuid::new_v4().to_string()
            };
            let mut session = Session::new(session_id, Utc::now());
            session.is_active = true;
            self.seed_server(session.clone()).await;
            Ok(session)
        }

        async fn update(
            &self,
            session_id: &str,
            patch: &SessionPatch,
        ) -> lookbook_core::error::Result<Session> {
            if self.gate_next_update.swap(false, Ordering::SeqCst) {
                self.update_gate.notified().await;
            }
            self.patches
                .lock()
                .await
                .push((session_id.to_string(), patch.clone()));
            if self.fail_update.load(Ordering::SeqCst) {
                return Err(LookbookError::remote_rejected(500, "boom"));
            }
            let mut sessions = self.sessions.lock().await;
            let session = sessions
                .get_mut(session_id)
                .ok_or_else(|| LookbookError::not_found("session", session_id))?;
            for field in SelectionField::ALL {
                if let Some(value) = patch.get(field) {
                    session.set_selection(field, value);
                }
            }
            Ok(session.clone())
        }

        async fn get(&self, session_id: &str) -> lookbook_core::error::Result<Session> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(LookbookError::remote_unavailable("connection refused"));
            }
            self.sessions
                .lock()
                .await
                .get(session_id)
                .cloned()
                .ok_or_else(|| LookbookError::not_found("session", session_id))
        }
    }

    struct Harness {
        gateway: Arc<MockSessionGateway>,
        store: Arc<InMemorySessionStore>,
        synchronizer: SessionSynchronizer,
    }

    fn harness() -> Harness {
        let gateway = Arc::new(MockSessionGateway::new());
        let store = Arc::new(InMemorySessionStore::new());
        let synchronizer = SessionSynchronizer::new(gateway.clone(), store.clone());
        Harness {
            gateway,
            store,
            synchronizer,
        }
    }

    #[tokio::test]
    async fn test_create_installs_active_session_and_mirrors_it() {
        let h = harness();
        let session = h.synchronizer.create_session().await.unwrap();

        assert!(session.is_active);
        assert!(session.has_identity());
        assert_eq!(h.synchronizer.current().unwrap(), session);
        assert_eq!(h.store.session_id().await, Some(session.session_id.clone()));
        assert!(h.store.record().await.is_some());
    }

    #[tokio::test]
    async fn test_create_failure_leaves_state_untouched() {
        let h = harness();
        h.gateway.fail_create.store(true, Ordering::SeqCst);

        let err = h.synchronizer.create_session().await.unwrap_err();
        assert!(matches!(err, LookbookError::CreationFailed { .. }));
        assert_eq!(h.synchronizer.current(), None);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_session_without_identity_is_never_mirrored() {
        let h = harness();
        h.gateway.create_without_identity.store(true, Ordering::SeqCst);

        let session = h.synchronizer.create_session().await.unwrap();
        assert!(!session.has_identity());
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_requires_active_session() {
        let h = harness();
        let err = h
            .synchronizer
            .update_field(SelectionField::Name, "Alex")
            .await
            .unwrap_err();
        assert!(err.is_no_active_session());
    }

    #[tokio::test]
    async fn test_updates_are_cumulative() {
        let h = harness();
        h.synchronizer.create_session().await.unwrap();

        h.synchronizer
            .update_field(SelectionField::Color, "Black")
            .await
            .unwrap();
        h.synchronizer
            .update_field(SelectionField::GraphicAppearance, "Solid")
            .await
            .unwrap();

        let patches = h.gateway.recorded_patches().await;
        assert_eq!(patches.len(), 2);
        // The second payload still carries the earlier answer
        let (_, second) = &patches[1];
        assert_eq!(second.get(SelectionField::Color), Some("Black"));
        assert_eq!(second.get(SelectionField::GraphicAppearance), Some("Solid"));

        let current = h.synchronizer.current().unwrap();
        assert_eq!(current.color.as_deref(), Some("Black"));
        assert_eq!(current.graphic_appearance.as_deref(), Some("Solid"));
    }

    #[tokio::test]
    async fn test_update_failure_preserves_previous_state() {
        let h = harness();
        h.synchronizer.create_session().await.unwrap();
        h.synchronizer
            .update_field(SelectionField::Name, "Alex")
            .await
            .unwrap();

        let before = h.synchronizer.current().unwrap();
        let record_before = h.store.record().await;

        h.gateway.fail_update.store(true, Ordering::SeqCst);
        let err = h
            .synchronizer
            .update_field(SelectionField::Color, "Black")
            .await
            .unwrap_err();

        assert!(matches!(err, LookbookError::UpdateFailed { .. }));
        assert_eq!(h.synchronizer.current().unwrap(), before);
        assert_eq!(h.store.record().await, record_before);
    }

    #[tokio::test]
    async fn test_update_succeeds_even_if_mirror_write_fails() {
        let h = harness();
        h.synchronizer.create_session().await.unwrap();

        h.store.set_fail_saves(true);
        let session = h
            .synchronizer
            .update_field(SelectionField::Name, "Alex")
            .await
            .unwrap();
        assert_eq!(session.name.as_deref(), Some("Alex"));
        assert_eq!(h.synchronizer.current().unwrap(), session);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_serialized() {
        let h = harness();
        let synchronizer = Arc::new(h.synchronizer);
        synchronizer.create_session().await.unwrap();

        // First update parks inside the gateway while holding the update lock
        h.gateway.gate_next_update.store(true, Ordering::SeqCst);
        let first = {
            let synchronizer = synchronizer.clone();
            tokio::spawn(async move {
                synchronizer
                    .update_field(SelectionField::Color, "Black")
                    .await
            })
        };
        tokio::task::yield_now().await;

        let second = {
            let synchronizer = synchronizer.clone();
            tokio::spawn(async move {
                synchronizer
                    .update_field(SelectionField::GraphicAppearance, "Solid")
                    .await
            })
        };
        tokio::task::yield_now().await;

        h.gateway.update_gate.notify_one();
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // The second payload was built after the first completed
        let patches = h.gateway.recorded_patches().await;
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].1.get(SelectionField::GraphicAppearance), None);
        assert_eq!(patches[1].1.get(SelectionField::Color), Some("Black"));
    }

    #[tokio::test]
    async fn test_load_without_stored_id_is_a_no_op() {
        let h = harness();
        h.synchronizer.load_stored_session().await;

        assert_eq!(h.synchronizer.current(), None);
        assert_eq!(h.gateway.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load_prefers_remote_and_refreshes_mirror() {
        let h = harness();
        // Server has a newer record than the mirror
        let mut server_session = Session::new("abc123", Utc::now());
        server_session.is_active = true;
        server_session.set_selection(SelectionField::Name, "Alex");
        h.gateway.seed_server(server_session.clone()).await;

        let mut stale = server_session.clone();
        stale.name = None;
        h.store
            .seed("abc123", &stale.to_transport().to_string())
            .await;

        h.synchronizer.load_stored_session().await;

        assert_eq!(h.synchronizer.current().unwrap(), server_session);
        let record = h.store.record().await.unwrap();
        assert!(record.contains("Alex"));
    }

    #[tokio::test]
    async fn test_load_falls_back_to_mirror_when_remote_unreachable() {
        let h = harness();
        let mut cached = Session::new("abc123", Utc::now());
        cached.is_active = true;
        cached.set_selection(SelectionField::Color, "Black");
        h.store
            .seed("abc123", &cached.to_transport().to_string())
            .await;
        h.gateway.fail_get.store(true, Ordering::SeqCst);

        h.synchronizer.load_stored_session().await;

        assert_eq!(h.synchronizer.current().unwrap(), cached);
    }

    #[tokio::test]
    async fn test_load_purges_corrupt_mirror() {
        let h = harness();
        h.store.seed("abc123", "{not valid json").await;
        h.gateway.fail_get.store(true, Ordering::SeqCst);

        h.synchronizer.load_stored_session().await;

        assert_eq!(h.synchronizer.current(), None);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_purges_mirror_with_missing_record() {
        let h = harness();
        h.store.seed("abc123", "{}").await;
        h.store
            .drop_key(lookbook_core::session::SESSION_DATA_KEY)
            .await;
        h.gateway.fail_get.store(true, Ordering::SeqCst);

        h.synchronizer.load_stored_session().await;

        assert_eq!(h.synchronizer.current(), None);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_session_is_idempotent() {
        let h = harness();
        h.synchronizer.create_session().await.unwrap();

        h.synchronizer.clear_session().await;
        assert_eq!(h.synchronizer.current(), None);
        assert!(h.store.is_empty().await);

        h.synchronizer.clear_session().await;
        assert_eq!(h.synchronizer.current(), None);
    }

    #[tokio::test]
    async fn test_wizard_walkthrough() {
        let h = harness();

        let created = h.synchronizer.create_session().await.unwrap();
        assert!(created.is_active);

        let updated = h
            .synchronizer
            .update_field(SelectionField::Name, "Alex")
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Alex"));

        let patches = h.gateway.recorded_patches().await;
        assert_eq!(patches[0].0, created.session_id);
        assert_eq!(
            serde_json::to_value(&patches[0].1).unwrap(),
            serde_json::json!({ "name": "Alex" })
        );

        h.synchronizer.clear_session().await;
        assert_eq!(h.synchronizer.current(), None);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_observers_are_notified_on_mutations() {
        let h = harness();
        let mut rx = h.synchronizer.subscribe();

        h.synchronizer.create_session().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        h.synchronizer
            .update_field(SelectionField::Name, "Alex")
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().unwrap().name.as_deref(),
            Some("Alex")
        );

        h.synchronizer.clear_session().await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }
}
