//! `TokenStore` over a key-value `StateStore`

use async_trait::async_trait;
use shopdesk_core::{Result, Session, TokenStore};
use tracing::debug;

use crate::traits::StateStore;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_EMAIL_KEY: &str = "user_email";

/// Stores the session as two keys, written and removed together
///
/// The token is authoritative: a store holding only a token still counts as an
/// active session, and one holding only an email does not.
pub struct KeyValueTokenStore<S> {
    state: S,
}

impl<S: StateStore> KeyValueTokenStore<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    pub fn inner(&self) -> &S {
        &self.state
    }
}

#[async_trait]
impl<S: StateStore> TokenStore for KeyValueTokenStore<S> {
    async fn set_session(&self, session: &Session) -> Result<()> {
        self.state
            .set_many(vec![
                (AUTH_TOKEN_KEY.to_string(), session.token.clone()),
                (USER_EMAIL_KEY.to_string(), session.user_email.clone()),
            ])
            .await?;
        debug!("Stored session for {}", session.user_email);
        Ok(())
    }

    async fn clear_session(&self) -> Result<()> {
        self.state
            .delete_many(&[AUTH_TOKEN_KEY, USER_EMAIL_KEY])
            .await?;
        debug!("Cleared session");
        Ok(())
    }

    async fn get_token(&self) -> Option<String> {
        self.state.get(AUTH_TOKEN_KEY).await
    }

    async fn get_email(&self) -> Option<String> {
        self.state.get(USER_EMAIL_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStateStore, MemoryStateStore};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_session_stores_both_values() {
        let store = KeyValueTokenStore::new(MemoryStateStore::new());
        assert!(!store.has_session().await);

        store
            .set_session(&Session::new("abc123", "user@test.com"))
            .await
            .unwrap();

        assert!(store.has_session().await);
        assert_eq!(store.get_token().await, Some("abc123".to_string()));
        assert_eq!(store.get_email().await, Some("user@test.com".to_string()));
    }

    #[tokio::test]
    async fn test_set_session_overwrites_prior_session() {
        let store = KeyValueTokenStore::new(MemoryStateStore::new());
        store
            .set_session(&Session::new("old", "old@test.com"))
            .await
            .unwrap();
        store
            .set_session(&Session::new("new", "new@test.com"))
            .await
            .unwrap();

        assert_eq!(store.get_token().await, Some("new".to_string()));
        assert_eq!(store.get_email().await, Some("new@test.com".to_string()));
    }

    #[tokio::test]
    async fn test_clear_session_is_idempotent() {
        let store = KeyValueTokenStore::new(MemoryStateStore::new());
        store.clear_session().await.unwrap();

        store
            .set_session(&Session::new("abc123", "user@test.com"))
            .await
            .unwrap();
        store.clear_session().await.unwrap();
        store.clear_session().await.unwrap();

        assert!(!store.has_session().await);
        assert_eq!(store.get_email().await, None);
        assert!(store.inner().is_empty().await);
    }

    #[tokio::test]
    async fn test_token_is_authoritative() {
        let state = MemoryStateStore::new();
        state
            .set(USER_EMAIL_KEY, "user@test.com".to_string())
            .await
            .unwrap();
        let store = KeyValueTokenStore::new(state);
        assert!(!store.has_session().await);

        store
            .inner()
            .set(AUTH_TOKEN_KEY, "abc123".to_string())
            .await
            .unwrap();
        assert!(store.has_session().await);
    }

    #[tokio::test]
    async fn test_session_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        {
            let store = KeyValueTokenStore::new(FileStateStore::open(&path).unwrap());
            store
                .set_session(&Session::new("abc123", "user@test.com"))
                .await
                .unwrap();
        }

        let store = KeyValueTokenStore::new(FileStateStore::open(&path).unwrap());
        assert_eq!(store.get_token().await, Some("abc123".to_string()));

        store.clear_session().await.unwrap();
        let store = KeyValueTokenStore::new(FileStateStore::open(&path).unwrap());
        assert!(!store.has_session().await);
    }
}
