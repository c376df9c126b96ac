//! Token store trait
//!
//! The `TokenStore` holds the persisted session (bearer token and operator
//! email). It is injected into the HTTP client and the authenticator instead
//! of being reached through ambient global state, so tests can swap in an
//! in-memory or mocked store.
//!
//! Implementations:
//! - `KeyValueTokenStore` (shopdesk-storage): two keys in a `StateStore`

use async_trait::async_trait;

use crate::{Result, Session};

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Store token and email together, replacing any prior session
    ///
    /// # Errors
    /// - `Error::Storage` if the session could not be persisted
    async fn set_session(&self, session: &Session) -> Result<()>;

    /// Remove token and email
    ///
    /// Idempotent: clearing an empty store succeeds. The session is gone from
    /// memory even when persisting the removal fails.
    ///
    /// # Errors
    /// - `Error::Storage` if the removal could not be persisted
    async fn clear_session(&self) -> Result<()>;

    /// The stored bearer token, if any
    async fn get_token(&self) -> Option<String>;

    /// Email of the operator who logged in, if any
    async fn get_email(&self) -> Option<String>;

    /// True iff a token is present
    async fn has_session(&self) -> bool {
        self.get_token().await.is_some()
    }
}
