//! Integration tests for the REST API client functionality.
//!
//! These tests verify the REST client construction, path normalization,
//! error handling, and API method behavior.

use gitea_api::clients::rest::{RestClient, RestError};
use gitea_api::{AccessToken, BaseUrl, GiteaConfig};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: &str) -> RestClient {
    let config = GiteaConfig::builder()
        .base_url(BaseUrl::new(uri).unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

// ============================================================================
// RestClient Construction Tests
// ============================================================================

#[test]
fn test_rest_client_uses_configured_api_path() {
    let config = GiteaConfig::builder()
        .base_url(BaseUrl::new("https://gitea.example.com").unwrap())
        .api_path("/gitea/api/v1/")
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();

    assert_eq!(client.http_client().base_path(), "/gitea/api/v1");
}

#[test]
fn test_rest_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
}

// ============================================================================
// Error Type Tests
// ============================================================================

#[test]
fn test_rest_error_invalid_path_message() {
    let error = RestError::InvalidPath {
        path: String::new(),
    };
    let message = error.to_string();

    assert!(message.contains("Invalid REST API path"));
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_empty_path_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let result = client.get("/", None).await;

    assert!(matches!(result, Err(RestError::InvalidPath { .. })));
}

// ============================================================================
// API Method Tests
// ============================================================================

#[tokio::test]
async fn test_get_normalizes_leading_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/octo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let response = assert_ok!(client.get("/users/octo", None).await);
    assert_eq!(response.body["id"], json!(3));
}

#[tokio::test]
async fn test_patch_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/repos/octo/hello/issues/7"))
        .and(body_json(json!({"state": "closed"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 900})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/repos/octo/hello/issues/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let response = assert_ok!(
        client
            .patch("repos/octo/hello/issues/7", json!({"state": "closed"}))
            .await
    );
    assert_eq!(response.code, 201);

    let response = assert_ok!(client.delete("repos/octo/hello/issues/7").await);
    assert_eq!(response.code, 204);
}

#[tokio::test]
async fn test_http_errors_keep_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/octo/private"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "forbidden"})))
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let error = client.get("repos/octo/private", None).await.unwrap_err();

    assert!(matches!(error, RestError::Http(_)));
    assert_eq!(error.status(), Some(403));
}
