//! File-backed SessionStore implementation.

use crate::paths::LookbookPaths;
use crate::storage::AtomicTextFile;
use async_trait::async_trait;
use lookbook_core::error::{LookbookError, Result};
use lookbook_core::session::{SESSION_DATA_KEY, SESSION_ID_KEY, Session, SessionStore};
use std::fs;
use std::path::Path;

/// A session store implementation keeping one file per storage key.
///
/// The cache directory mirrors the browser-local storage of the original
/// wizard: a `sessionId` file holding the bare id and a `sessionData` file
/// holding the JSON session record.
///
/// ```text
/// base_dir/
/// ├── sessionId
/// └── sessionData
/// ```
///
/// The id file is written last and removed first, so a present id implies a
/// readable record file on any cleanly-written state.
pub struct FileSessionStore {
    id_file: AtomicTextFile,
    data_file: AtomicTextFile,
}

impl FileSessionStore {
    /// Creates a new `FileSessionStore` under the specified directory.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;

        Ok(Self {
            id_file: AtomicTextFile::new(base_dir.join(SESSION_ID_KEY)),
            data_file: AtomicTextFile::new(base_dir.join(SESSION_DATA_KEY)),
        })
    }

    /// Creates a `FileSessionStore` at the platform default cache location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// cache directory cannot be created.
    pub fn default_location() -> Result<Self> {
        let base_dir =
            LookbookPaths::cache_dir().map_err(|e| LookbookError::config(e.to_string()))?;
        Self::new(base_dir)
    }

    async fn read(file: &AtomicTextFile, key: &'static str) -> Option<String> {
        let file = file.clone();
        match tokio::task::spawn_blocking(move || file.load()).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::warn!("[FileSessionStore] Failed to read '{}': {}", key, e);
                None
            }
            Err(e) => {
                tracing::warn!("[FileSessionStore] Read task for '{}' failed: {}", key, e);
                None
            }
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn session_id(&self) -> Option<String> {
        Self::read(&self.id_file, SESSION_ID_KEY).await
    }

    async fn record(&self) -> Option<String> {
        Self::read(&self.data_file, SESSION_DATA_KEY).await
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let record = session.to_transport().to_string();
        let session_id = session.session_id.clone();
        let id_file = self.id_file.clone();
        let data_file = self.data_file.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            // Record first, id last: the id key marks the pair as complete
            data_file.save(&record)?;
            id_file.save(&session_id)?;
            Ok(())
        })
        .await
        .map_err(|e| LookbookError::internal(format!("Failed to join save task: {}", e)))??;

        tracing::debug!("[FileSessionStore] Mirrored session {}", session.session_id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let id_file = self.id_file.clone();
        let data_file = self.data_file.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            id_file.remove()?;
            data_file.remove()?;
            Ok(())
        })
        .await
        .map_err(|e| LookbookError::internal(format!("Failed to join clear task: {}", e)))??;

        tracing::debug!("[FileSessionStore] Cleared session mirror");
        Ok(())
    }
}
