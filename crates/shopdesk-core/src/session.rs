//! Authenticated session and login credentials

use serde::{Deserialize, Serialize};
use std::fmt;

/// Local record of an authenticated operator
///
/// Token and email always travel together: a session is written whole on
/// login and removed whole on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_email: String,
}

impl Session {
    pub fn new(token: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_email: user_email.into(),
        }
    }
}

/// Login credentials, only held for the duration of a login call
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("user@test.com", "secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("user@test.com"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_credentials_serialize_as_login_body() {
        let creds = Credentials::new("user@test.com", "secret");
        let body = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "user@test.com", "password": "secret"})
        );
    }
}
