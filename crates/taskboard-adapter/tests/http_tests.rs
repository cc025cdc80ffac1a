/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use common::{client_for, mock_token, setup_mock_server};
use rstest::rstest;
use taskboard_adapter::{ClientConfig, Credentials, TaskApiError, TaskClient, TaskSource};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(TaskClient::new());
    assert!(client.credentials().is_none());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(TaskClient::with_config(config));
}

#[test]
fn test_client_credentials_roundtrip() {
    let mut client = assert_ok!(TaskClient::new());
    let credentials = Credentials { token: mock_token() };

    client.set_credentials(credentials.clone());
    let stored = client.credentials().expect("credentials should be set");

    assert_eq!(stored.token, credentials.token);
}

#[tokio::test]
async fn test_fetch_through_trait_object() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("user_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 10, "title": "Plan sprint", "status": "created" },
            { "id": 11, "title": "Demo", "status": 5 },
        ])))
        .mount(&server)
        .await;

    let source: Box<dyn TaskSource> = Box::new(client_for(&server));
    let tasks = assert_ok!(source.fetch_tasks("3").await);

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].status.as_deref(), Some("created"));
    assert_eq!(tasks[1].status, None);
}

#[rstest]
#[case(401)]
#[case(403)]
#[tokio::test]
async fn test_auth_failures_map_to_authentication(#[case] status: u16) {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_tasks("")
        .await
        .expect_err("should fail");

    assert!(err.is_auth_error(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_tasks("")
        .await
        .expect_err("should fail");

    assert!(matches!(err, TaskApiError::RateLimit { retry_after: 12 }));
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_tasks("")
        .await
        .expect_err("should fail");

    assert!(matches!(err, TaskApiError::Serialization(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let client = assert_ok!(TaskClient::with_config_and_base_url(
        ClientConfig::default(),
        "http://127.0.0.1:1/"
    ));

    let err = client.fetch_tasks("").await.expect_err("should fail");

    assert!(matches!(err, TaskApiError::Http(_)));
}
