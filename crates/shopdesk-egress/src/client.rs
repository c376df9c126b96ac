//! Shared HTTP client construction

use reqwest::{Client, ClientBuilder};
use shopdesk_core::{Error, Result};
use std::time::Duration;

/// HTTP client configuration
///
/// No request timeout is set; a call waits as long as the transport allows.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 8,
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("Shopdesk/{}", env!("CARGO_PKG_VERSION"))
}

/// Create a configured HTTP client with connection pooling
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        // Expire idle connections before the API side closes them
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}
