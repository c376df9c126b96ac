//! Form input validation
//!
//! Only trivial checks: non-blank fields and an email shape. Anything deeper is
//! left to the remote API.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::session::Credentials;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check login input before it is sent
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    FieldCheck::new()
        .require("email", is_valid_email(&credentials.email))
        .non_blank("password", &credentials.password)
        .finish()
}

/// Accumulates failing field names so a form reports every problem at once
#[derive(Debug, Default)]
pub struct FieldCheck {
    failed: Vec<String>,
}

impl FieldCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, field: &str, ok: bool) -> Self {
        if !ok && !self.failed.iter().any(|f| f == field) {
            self.failed.push(field.to_string());
        }
        self
    }

    pub fn non_blank(self, field: &str, value: &str) -> Self {
        self.require(field, !value.trim().is_empty())
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.failed))
        }
    }
}
