//! Authorized JSON client for the store API

use crate::client::{HttpClientConfig, create_client};
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use shopdesk_core::{ApiError, ApiRequest, Method, Result, TokenStore};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl ApiConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_config: HttpClientConfig::default(),
        }
    }

    /// Set the base URL (for mock servers or self-hosted copies of the API)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.client_config.user_agent = user_agent.into();
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client that injects the stored bearer token
///
/// Every call is a fresh round trip: no retries, no caching.
pub struct ApiClient {
    base_url: String,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new client reading tokens from `tokens`
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let client = create_client(&config.client_config)?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// `GET path`
    pub async fn get(&self, path: &str) -> std::result::Result<Value, ApiError> {
        self.request(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body
    pub async fn post(&self, path: &str, body: Value) -> std::result::Result<Value, ApiError> {
        self.request(ApiRequest::post(path, body)).await
    }

    /// Send a request and return the parsed JSON body
    ///
    /// # Errors
    /// - `ApiError::InvalidRequest` if the URL or a header can't be encoded (nothing is sent)
    /// - `ApiError::Network` if no response was received
    /// - `ApiError::Http` for a non-2xx status; the body is not read
    /// - `ApiError::Parse` for a 2xx response whose body isn't JSON
    pub async fn request(&self, request: ApiRequest) -> std::result::Result<Value, ApiError> {
        self.request_with_status(request)
            .await
            .map(|(_, body)| body)
    }

    /// Like [`ApiClient::request`], also returning the 2xx status code
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request_with_status(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<(u16, Value), ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let headers = self.build_headers(&request).await?;

        debug!("→ {} {}", request.method, url);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                ApiError::InvalidRequest(format!("failed to build request for {}: {}", url, e))
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        debug!("← {} {}", status.as_u16(), url);

        if !status.is_success() {
            return Err(ApiError::Http {
                status_code: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;

        let body = serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse {
            status_code: status.as_u16(),
            detail: e.to_string(),
        })?;
        Ok((status.as_u16(), body))
    }

    /// Defaults first, then the bearer token, then caller overrides
    async fn build_headers(&self, request: &ApiRequest) -> std::result::Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if request.authorize {
            if let Some(token) = self.tokens.get_token().await {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                    ApiError::InvalidRequest("stored token is not a valid header value".to_string())
                })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        for (name, value) in &request.extra_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidRequest(format!("invalid header name '{}'", name)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::InvalidRequest(format!("invalid value for header '{}'", name)))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
    }
}
