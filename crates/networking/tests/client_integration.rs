//! Integration tests for the HTTP client
//!
//! These tests use wiremock to stand up a local server and exercise the
//! full request/response cycle, error mapping, timeouts, and retries.

use networking::{HttpClient, HttpClientConfig, NetworkError, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct Query {
    keyword: String,
    page: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct Answer {
    total: u32,
}

fn client(retry: RetryPolicy) -> HttpClient {
    let retry = retry.with_initial_delay(Duration::from_millis(10));
    HttpClient::new(HttpClientConfig::default().with_retry(retry)).unwrap()
}

fn query() -> Query {
    Query {
        keyword: "agriculture".to_string(),
        page: 1,
    }
}

#[tokio::test]
async fn test_post_json_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("content-type", "application/json"))
        .and(body_json(query()))
        .respond_with(ResponseTemplate::new(200).set_body_json(Answer { total: 7 }))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/search", mock_server.uri());
    let response = client(RetryPolicy::none())
        .post_json::<_, Answer>(&url, &query())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.data, Answer { total: 7 });
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-client", "plant-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Answer { total: 0 }))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::default()
        .with_header("X-Client", "plant-app")
        .with_retry(RetryPolicy::none());
    let client = HttpClient::new(config).unwrap();

    let result = client
        .post_json::<_, Answer>(&mock_server.uri(), &query())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(RetryPolicy::new(3))
        .post_json::<_, Answer>(&mock_server.uri(), &query())
        .await
        .unwrap_err();

    match err {
        NetworkError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client(RetryPolicy::none())
        .post_json::<_, Answer>(&mock_server.uri(), &query())
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::Decode(_)));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Answer { total: 3 }))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(RetryPolicy::new(1))
        .post_json::<_, Answer>(&mock_server.uri(), &query())
        .await
        .unwrap();

    assert_eq!(response.data.total, 3);
}

#[tokio::test]
async fn test_retry_budget_is_respected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&mock_server)
        .await;

    let err = client(RetryPolicy::new(1))
        .post_json::<_, Answer>(&mock_server.uri(), &query())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(Answer { total: 1 })
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::default()
        .with_timeout(Duration::from_millis(100))
        .with_retry(RetryPolicy::none());
    let client = HttpClient::new(config).unwrap();

    let err = client
        .post_json::<_, Answer>(&mock_server.uri(), &query())
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::Timeout));
}
