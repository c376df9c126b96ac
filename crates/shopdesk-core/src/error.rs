//! Error types for Shopdesk Core

use thiserror::Error;

/// Failure of a single call against the remote API
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (DNS, connection refused, reset, body read failure)
    #[error("network error: {0}")]
    Network(String),

    /// A response was received with a status outside 200..=299
    #[error("HTTP error: status {status_code}")]
    Http { status_code: u16 },

    /// A 2xx response whose body is not the JSON we expected
    #[error("malformed response (status {status_code}): {detail}")]
    Parse { status_code: u16, detail: String },

    /// The request could not be built (bad header, unencodable query); nothing was sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status carried by this error, 0 when no response was received
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Http { status_code } | ApiError::Parse { status_code, .. } => *status_code,
            ApiError::Network(_) | ApiError::InvalidRequest(_) => 0,
        }
    }

    /// Short classification message
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Http { .. } => "HTTP error",
            ApiError::Parse { .. } => "malformed response",
            ApiError::InvalidRequest(_) => "invalid request",
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Login failure
///
/// Kept apart from [`ApiError`] because the caller shows different messages for
/// rejected credentials and an unreachable API.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("network error during login: {0}")]
    Network(String),

    #[error("login response was malformed: {0}")]
    MalformedResponse(String),

    #[error("failed to store session: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid credentials",
            AuthError::Network(_) => "network",
            AuthError::MalformedResponse(_) => "malformed response",
            AuthError::Storage(_) => "storage",
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { .. } => AuthError::InvalidCredentials,
            ApiError::Network(msg) => AuthError::Network(msg),
            ApiError::Parse { detail, .. } => AuthError::MalformedResponse(detail),
            ApiError::InvalidRequest(msg) => AuthError::MalformedResponse(msg),
        }
    }
}

/// Input rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", fields.join(", "))]
pub struct ValidationError {
    /// Names of the offending fields, in form order
    pub fields: Vec<String>,
}

impl ValidationError {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Session store error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(ApiError::Network("refused".to_string()).status_code(), 0);
        assert_eq!(ApiError::Http { status_code: 500 }.status_code(), 500);
        assert_eq!(
            ApiError::Parse {
                status_code: 200,
                detail: "eof".to_string()
            }
            .status_code(),
            200
        );
    }

    #[test]
    fn test_api_error_messages() {
        assert_eq!(ApiError::Network("x".to_string()).message(), "network");
        assert_eq!(ApiError::Http { status_code: 404 }.message(), "HTTP error");
        assert_eq!(
            ApiError::Parse {
                status_code: 200,
                detail: String::new()
            }
            .message(),
            "malformed response"
        );
    }

    #[test]
    fn test_auth_error_from_api_error() {
        let err: AuthError = ApiError::Http { status_code: 401 }.into();
        assert_eq!(err.reason(), "invalid credentials");

        let err: AuthError = ApiError::Network("dns".to_string()).into();
        assert_eq!(err.reason(), "network");

        let err: AuthError = ApiError::Parse {
            status_code: 201,
            detail: "expected value".to_string(),
        }
        .into();
        assert_eq!(err.reason(), "malformed response");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(vec!["title".to_string(), "price".to_string()]);
        assert_eq!(err.to_string(), "invalid input: title, price");
        assert!(err.has_field("price"));
        assert!(!err.has_field("images"));
    }

    #[test]
    fn test_error_display_formatting() {
        let err = Error::from(ApiError::Http { status_code: 500 });
        assert!(err.to_string().contains("500"));

        let err = Error::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Session store error: disk full");
    }
}
