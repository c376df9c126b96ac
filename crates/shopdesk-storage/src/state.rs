//! File-backed state storage
//!
//! The whole map is loaded on open and rewritten atomically on every mutation.
//! The CLI process may exit right after a login, so there is no deferred
//! persistence.

use crate::atomic_writer::AtomicWriter;
use crate::traits::{StateStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// JSON file holding string keys and values
pub struct FileStateStore {
    path: PathBuf,
    state: RwLock<HashMap<String, String>>,
}

impl FileStateStore {
    /// Open the store, loading existing state if the file is present
    ///
    /// A file that isn't a JSON object of strings is treated as empty; the
    /// next mutation overwrites it.
    ///
    /// # Errors
    /// - `StorageError::Io` if the file exists but can't be read
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        let state = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                match serde_json::from_str(&content) {
                    Ok(state) => state,
                    Err(e) => {
                        warn!(
                            "Ignoring unreadable state file {}: {}",
                            path.display(),
                            e
                        );
                        HashMap::new()
                    }
                }
            }
        } else {
            HashMap::new()
        };

        debug!("Opened state store at {} ({} keys)", path.display(), state.len());

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &HashMap<String, String>) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(state).map_err(|e| {
            StorageError::Serialization(format!("Failed to serialize state: {}", e))
        })?;

        let mut writer = AtomicWriter::new(&self.path)?;
        writer.write(content.as_bytes())?;
        writer.commit()?;

        debug!("Persisted {} keys to {}", state.len(), self.path.display());
        Ok(())
    }
}

#[async_trait::async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.state.read().await.get(key).cloned()
    }

    async fn set_many(&self, items: Vec<(String, String)>) -> StorageResult<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        next.extend(items);
        // Only take the new values once they are on disk
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    async fn delete_many(&self, keys: &[&str]) -> StorageResult<()> {
        let mut state = self.state.write().await;
        let mut changed = false;
        for key in keys {
            changed |= state.remove(*key).is_some();
        }
        if !changed && !self.path.exists() {
            return Ok(());
        }
        self.persist(&state)
    }
}
