//! Integration tests for the HTTP client functionality.
//!
//! These tests verify the client configuration, request building,
//! response parsing, and error handling behavior against a mock server.

use gitea_api::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest};
use gitea_api::{AccessToken, BaseUrl, GiteaConfig};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(uri: &str, token: Option<&str>) -> GiteaConfig {
    let mut builder = GiteaConfig::builder().base_url(BaseUrl::new(uri).unwrap());
    if let Some(token) = token {
        builder = builder.access_token(AccessToken::new(token).unwrap());
    }
    builder.build().unwrap()
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_client_configuration_from_config() {
    let config = GiteaConfig::builder()
        .base_url(BaseUrl::new("https://gitea.example.com/").unwrap())
        .access_token(AccessToken::new("abc").unwrap())
        .user_agent_prefix("MyApp/1.0")
        .build()
        .unwrap();

    let client = HttpClient::new(&config).unwrap();

    assert_eq!(client.base_uri(), "https://gitea.example.com");
    assert_eq!(client.base_path(), "/api/v1");
    assert_eq!(
        client.default_headers().get("Authorization"),
        Some(&"token abc".to_string())
    );
    assert!(client.default_headers()["User-Agent"].starts_with("MyApp/1.0 | Gitea API Library v"));
}

#[test]
fn test_client_without_token_sends_no_authorization() {
    let client = HttpClient::new(&config_for("https://gitea.example.com", None)).unwrap();
    assert!(!client.default_headers().contains_key("Authorization"));
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_get_request_with_query_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/search"))
        .and(query_param("q", "hello"))
        .and(header("Authorization", "token abc"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri(), Some("abc"))).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "repos/search")
        .query_param("q", "hello")
        .build()
        .unwrap();

    let response = assert_ok!(client.request(request).await);
    assert_eq!(response.code, 200);
    assert_eq!(response.body["ok"], json!(true));
}

#[tokio::test]
async fn test_patch_request_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/repos/octo/hello"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"description": "Updated"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri(), None)).unwrap();
    let request = HttpRequest::builder(HttpMethod::Patch, "repos/octo/hello")
        .body(json!({"description": "Updated"}))
        .body_type(DataType::Json)
        .build()
        .unwrap();

    let response = assert_ok!(client.request(request).await);
    assert_eq!(response.body, json!({"id": 42}));
}

#[tokio::test]
async fn test_empty_body_parses_as_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/repos/octo/hello"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri(), None)).unwrap();
    let request = HttpRequest::builder(HttpMethod::Delete, "repos/octo/hello")
        .build()
        .unwrap();

    let response = assert_ok!(client.request(request).await);
    assert_eq!(response.code, 204);
    assert_eq!(response.body, json!({}));
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_error_response_uses_gitea_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "user does not exist"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri(), None)).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "users/ghost")
        .build()
        .unwrap();

    let error = assert_err!(client.request(request).await);
    assert_eq!(error.status(), Some(404));
    match error {
        HttpError::Response(e) => {
            assert_eq!(e.message, "user does not exist");
            assert!(e.url.unwrap().ends_with("/api/v1/users/ghost"));
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/version"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri(), None)).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "version").build().unwrap();

    let error = assert_err!(client.request(request).await);
    assert_eq!(error.status(), Some(503));
}

#[test]
fn test_request_with_body_requires_body_type() {
    let result = HttpRequest::builder(HttpMethod::Post, "user/repos")
        .body(json!({"name": "hello"}))
        .build();

    assert!(result.is_err());
}
