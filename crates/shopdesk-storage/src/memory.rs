//! In-memory state store for tests and throwaway sessions

use crate::traits::{StateStore, StorageResult};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: RwLock<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.state.read().await.get(key).cloned()
    }

    async fn set_many(&self, items: Vec<(String, String)>) -> StorageResult<()> {
        let mut state = self.state.write().await;
        state.extend(items);
        Ok(())
    }

    async fn delete_many(&self, keys: &[&str]) -> StorageResult<()> {
        let mut state = self.state.write().await;
        for key in keys {
            state.remove(*key);
        }
        Ok(())
    }
}
