//! Credential exchange and session lifecycle

use crate::api::ApiClient;
use serde::Deserialize;
use serde_json::json;
use shopdesk_core::{ApiRequest, AuthError, Session, TokenStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Logs operators in and out
///
/// All side effects go to the client's token store. Checking the session
/// never touches the network.
pub struct Authenticator {
    client: Arc<ApiClient>,
}

impl Authenticator {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.client.token_store()
    }

    /// Exchange credentials for a bearer token and store the session
    ///
    /// The store is only written after a usable token came back; every failure
    /// leaves the prior session untouched.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` for any non-2xx response
    /// - `AuthError::Network` if the API could not be reached
    /// - `AuthError::MalformedResponse` if the body has no non-empty `access_token`
    /// - `AuthError::Storage` if the session could not be persisted
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let request = ApiRequest::post(
            LOGIN_PATH,
            json!({
                "email": email,
                "password": password,
            }),
        )
        .anonymous();

        let body = match self.client.request(request).await {
            Ok(body) => body,
            Err(e) => {
                let err = AuthError::from(e);
                warn!("Login failed for {}: {}", email, err);
                return Err(err);
            }
        };

        let response: LoginResponse = serde_json::from_value(body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        if response.access_token.is_empty() {
            return Err(AuthError::MalformedResponse(
                "access_token is empty".to_string(),
            ));
        }

        let session = Session::new(response.access_token, email);
        self.tokens()
            .set_session(&session)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        info!("Logged in as {}", email);
        Ok(session)
    }

    /// Forget the stored session
    ///
    /// Always succeeds. The session is gone from memory even if persisting the
    /// removal fails; that failure is only logged.
    pub async fn logout(&self) {
        match self.tokens().clear_session().await {
            Ok(()) => info!("Logged out"),
            Err(e) => warn!("Logged out, but the stored session could not be removed: {}", e),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens().has_session().await
    }

    /// Token and email, if both are stored
    pub async fn current_session(&self) -> Option<Session> {
        let token = self.tokens().get_token().await?;
        let email = self.tokens().get_email().await?;
        Some(Session::new(token, email))
    }
}
