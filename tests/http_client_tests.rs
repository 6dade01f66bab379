//! Integration tests for the HTTP client functionality.
//!
//! These tests verify client configuration, request building,
//! response parsing, and error handling against a mock CDF server.

use cognite_sdk::clients::{HttpClient, HttpError, HttpRequest};
use cognite_sdk::{ApiToken, ApiVersion, BaseUrl, ClientConfig, ClientName, ProjectName};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(base_url: &str) -> ClientConfig {
    ClientConfig::builder()
        .project(ProjectName::new("test-project").unwrap())
        .token(ApiToken::new("test-token").unwrap())
        .client_name(ClientName::new("integration-tests").unwrap())
        .base_url(BaseUrl::new(base_url).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Client Configuration Tests
// ============================================================================

#[test]
fn test_client_uses_configured_api_version() {
    let config = ClientConfig::builder()
        .project(ProjectName::new("test-project").unwrap())
        .token(ApiToken::new("test-token").unwrap())
        .client_name(ClientName::new("integration-tests").unwrap())
        .api_version(ApiVersion::Playground)
        .build()
        .unwrap();

    let client = HttpClient::new(&config).unwrap();
    assert_eq!(client.base_uri(), "https://api.cognitedata.com");
    assert_eq!(client.base_path(), "/api/playground/projects/test-project");
}

#[test]
fn test_invalid_request_is_rejected_before_sending() {
    let result = HttpRequest::post("", json!({"items": []})).build();
    assert!(matches!(
        result,
        Err(cognite_sdk::InvalidHttpRequestError::EmptyPath)
    ));
}

// ============================================================================
// Request / Response Tests
// ============================================================================

#[tokio::test]
async fn test_post_items_with_field_and_app_header() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/test-project/assets/byids"))
        .and(header("x-cdp-app", "integration-tests"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "items": [{"id": 1}, {"id": 2}],
            "ignoreUnknownIds": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req-1")
                .set_body_json(json!({
                    "items": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]
                })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let request = HttpRequest::post_items("/assets/byids", &[json!({"id": 1}), json!({"id": 2})])
        .field("ignoreUnknownIds", true)
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.request_id(), Some("req-1"));
    let items: Vec<serde_json::Value> = response.items().unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_rate_limit_is_retried_until_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/test-project/assets/byids"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/test-project/assets/byids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let request = HttpRequest::post_items("assets/byids", &[json!({"externalId": "a"})])
        .tries(2)
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_error_body_is_parsed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/test-project/assets/byids"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("x-request-id", "req-404")
                .set_body_json(json!({
                    "error": {
                        "code": 400,
                        "message": "Ids not found",
                        "missing": [{"externalId": "ghost"}]
                    }
                })),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let request = HttpRequest::post_items("assets/byids", &[json!({"externalId": "ghost"})])
        .build()
        .unwrap();

    let error = client.request(request).await.unwrap_err();
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.request_id(), Some("req-404"));
    let HttpError::Response(response_error) = error else {
        panic!("expected a response error");
    };
    assert_eq!(response_error.message, "Ids not found");
    assert_eq!(response_error.missing, vec![json!({"externalId": "ghost"})]);
}

#[tokio::test]
async fn test_non_json_error_body_is_kept() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/test-project/assets"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server.uri())).unwrap();
    let request = HttpRequest::post("assets", json!({"items": []}))
        .build()
        .unwrap();

    let Err(HttpError::Response(error)) = client.request(request).await else {
        panic!("expected a response error");
    };
    assert_eq!(error.code, 502);
    assert_eq!(error.message, "Bad Gateway");
}
