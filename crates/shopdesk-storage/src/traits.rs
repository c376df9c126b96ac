//! Storage trait definitions

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for shopdesk_core::Error {
    fn from(err: StorageError) -> Self {
        shopdesk_core::Error::Storage(err.to_string())
    }
}

/// Persistent string key-value store
///
/// Mutations are durable once they return `Ok`. A failed set leaves the
/// in-memory view unchanged; a failed delete still removes the keys from it.
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    /// Get a value from the store
    async fn get(&self, key: &str) -> Option<String>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    /// Set a single value
    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.set_many(vec![(key.to_string(), value)]).await
    }

    /// Set several values in one write
    async fn set_many(&self, items: Vec<(String, String)>) -> StorageResult<()>;

    /// Delete a single value; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.delete_many(&[key]).await
    }

    /// Delete several values in one write
    async fn delete_many(&self, keys: &[&str]) -> StorageResult<()>;
}
