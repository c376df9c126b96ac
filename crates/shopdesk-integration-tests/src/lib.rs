//! End-to-end integration tests for Shopdesk
//!
//! `MockStoreApi` stands in for the remote store API: it only accepts one
//! operator account and rejects collection requests without that account's
//! bearer token. The tests under `tests/` drive the real session store,
//! authenticator and controllers against it.

use serde_json::{Value, json};
use shopdesk_egress::{ApiClient, ApiConfig};
use shopdesk_storage::{FileStateStore, KeyValueTokenStore};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, Request, Respond, ResponseTemplate,
    matchers::{method, path},
};

pub const OPERATOR_EMAIL: &str = "ops@example.com";
pub const OPERATOR_PASSWORD: &str = "changeme";
pub const OPERATOR_TOKEN: &str = "e2e-access-token";

/// Answers `POST /auth/login` for the operator account only
struct LoginResponder;

impl Respond for LoginResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let credentials: Value = match request.body_json() {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };

        if credentials["email"] == OPERATOR_EMAIL && credentials["password"] == OPERATOR_PASSWORD {
            ResponseTemplate::new(201).set_body_json(json!({
                "access_token": OPERATOR_TOKEN,
                "refresh_token": "e2e-refresh-token"
            }))
        } else {
            ResponseTemplate::new(401).set_body_json(json!({
                "message": "Unauthorized",
                "statusCode": 401
            }))
        }
    }
}

/// Serves `body` to requests carrying the operator's bearer token, 401 otherwise
struct Authorized {
    status: u16,
    body: Value,
    delay: Duration,
}

impl Respond for Authorized {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let expected = format!("Bearer {}", OPERATOR_TOKEN);
        let authorized = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str());

        if authorized {
            ResponseTemplate::new(self.status)
                .set_body_json(self.body.clone())
                .set_delay(self.delay)
        } else {
            ResponseTemplate::new(401)
        }
    }
}

pub struct MockStoreApi {
    pub server: MockServer,
}

impl MockStoreApi {
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(LoginResponder)
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve a fixed collection at `GET /{name}`
    pub async fn collection(&self, name: &str, items: Value) {
        self.collection_with_delay(name, items, Duration::ZERO).await;
    }

    pub async fn collection_with_delay(&self, name: &str, items: Value, delay: Duration) {
        self.authorized("GET", &format!("/{}", name), 200, items, delay)
            .await;
    }

    /// Accept `POST /{name}` and answer with `created`
    pub async fn accepts_create(&self, name: &str, created: Value) {
        self.authorized("POST", &format!("/{}", name), 201, created, Duration::ZERO)
            .await;
    }

    pub async fn failing(&self, name: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", name)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    async fn authorized(&self, verb: &str, route: &str, status: u16, body: Value, delay: Duration) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(Authorized {
                status,
                body,
                delay,
            })
            .mount(&self.server)
            .await;
    }
}

/// API client backed by the session file at `session_path`, as the CLI builds it
pub fn file_backed_client(base_url: &str, session_path: &Path) -> Arc<ApiClient> {
    let state = FileStateStore::open(session_path).expect("session file opens");
    let tokens = Arc::new(KeyValueTokenStore::new(state));
    let client = ApiClient::new(ApiConfig::new().with_base_url(base_url), tokens).expect("client builds");
    Arc::new(client)
}
