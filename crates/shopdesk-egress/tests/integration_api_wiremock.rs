//! Integration tests for the API client using wiremock
//!
//! These tests mock the store API to verify header injection and response
//! classification.

use serde_json::json;
use shopdesk_core::{ApiError, ApiRequest, Session, TokenStore};
use shopdesk_egress::{ApiClient, ApiConfig};
use shopdesk_storage::{KeyValueTokenStore, MemoryStateStore};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn new_store() -> Arc<KeyValueTokenStore<MemoryStateStore>> {
    Arc::new(KeyValueTokenStore::new(MemoryStateStore::new()))
}

fn client_for(server: &MockServer, store: Arc<KeyValueTokenStore<MemoryStateStore>>) -> ApiClient {
    ApiClient::new(ApiConfig::new().with_base_url(server.uri()), store).unwrap()
}

#[tokio::test]
async fn test_get_success_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Classic Tee", "price": 19}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, new_store());
    let body = client.get("/products").await.unwrap();

    assert_eq!(body, json!([{"id": 1, "title": "Classic Tee", "price": 19}]));
}

#[tokio::test]
async fn test_bearer_token_attached_when_session_present() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = new_store();
    store
        .set_session(&Session::new("abc123", "user@test.com"))
        .await
        .unwrap();

    let client = client_for(&mock_server, store);
    client.get("/users").await.unwrap();
}

#[tokio::test]
async fn test_no_authorization_header_without_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, new_store());
    client.get("/categories").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_post_echo_round_trip() {
    let mock_server = MockServer::start().await;
    let payload = json!({
        "name": "Shoes",
        "image": "https://img.example/shoes.png",
        "tags": ["a", "b"],
        "nested": {"n": 1.5, "flag": true, "none": null}
    });

    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(payload.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, new_store());
    let echoed = client.post("/categories", payload.clone()).await.unwrap();

    assert_eq!(echoed, payload);
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("definitely not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, new_store());
    let err = client.get("/products").await.unwrap_err();

    assert!(matches!(err, ApiError::Http { status_code: 500 }));
    assert_eq!(err.message(), "HTTP error");
}

#[tokio::test]
async fn test_non_2xx_statuses_carry_actual_status() {
    let mock_server = MockServer::start().await;

    for status in [400u16, 401, 404, 418, 503] {
        mock_server.reset().await;
        Mock::given(method("GET"))
            .and(path("/users/1"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"id": 1})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, new_store());
        let err = client.get("/users/1").await.unwrap_err();
        assert_eq!(err.status_code(), status, "status {} must be reported", status);
        assert!(matches!(err, ApiError::Http { .. }));
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, new_store());
    let err = client.get("/products/9").await.unwrap_err();

    assert!(matches!(err, ApiError::Parse { status_code: 200, .. }));
    assert_eq!(err.message(), "malformed response");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Bind to get a free port, then release it so nothing is listening
    let mock_server = MockServer::builder().start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = ApiClient::new(ApiConfig::new().with_base_url(uri), new_store()).unwrap();
    let err = client.get("/products").await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.status_code(), 0);
    assert_eq!(err.message(), "network");
}

#[tokio::test]
async fn test_extra_headers_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("content-type", "application/vnd.shop+json"))
        .and(header("x-request-source", "shopdesk-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, new_store());
    let request = ApiRequest::get("/products")
        .with_header("Content-Type", "application/vnd.shop+json")
        .with_header("X-Request-Source", "shopdesk-tests");

    client.request(request).await.unwrap();
}
