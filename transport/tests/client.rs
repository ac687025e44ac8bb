//! Integration tests for the transport client against a local mock server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]

use futures::StreamExt;
use roster_transport::{
    ApiEnvironment, ApiError, ClientConfig, ContentType, Endpoint, HttpClient, RetryPolicy,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Account {
    id: u64,
    name: String,
}

fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(ApiEnvironment::Mock(server.uri()))
        .with_retry(RetryPolicy::new().with_delay(Duration::from_millis(5)))
}

fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(test_config(server))
}

#[tokio::test]
async fn execute_decodes_a_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Ann",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts/1");
    let account: Account = client.execute(&endpoint).await.unwrap();

    assert_eq!(
        account,
        Account {
            id: 1,
            name: "Ann".to_string(),
        }
    );
}

#[tokio::test]
async fn query_parameters_reach_the_server_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(query_param("q", "ann smith"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts").with_query("q", "ann smith");
    let accounts: Vec<Account> = client.execute(&endpoint).await.unwrap();

    assert!(accounts.is_empty());
}

#[tokio::test]
async fn unauthorized_is_classified_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts");
    let err = client.execute::<Vec<Account>>(&endpoint).await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
}

#[tokio::test]
async fn server_errors_are_retried_up_to_the_attempt_bound() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts");
    let err = client.execute::<Vec<Account>>(&endpoint).await.unwrap_err();

    assert_eq!(err, ApiError::ServerError);
}

#[tokio::test]
async fn transient_server_error_recovers_within_the_bound() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/1"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Ann",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts/1");
    let account: Account = client.execute(&endpoint).await.unwrap();

    assert_eq!(account.id, 1);
}

#[tokio::test]
async fn other_statuses_carry_their_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such account"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts/7");
    let err = client.execute::<Account>(&endpoint).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 404,
            body: Some("no such account".to_string()),
        }
    );
}

#[tokio::test]
async fn decode_failures_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts");
    let err = client.execute::<Vec<Account>>(&endpoint).await.unwrap_err();

    assert!(matches!(err, ApiError::Decoding(_)));
}

#[tokio::test]
async fn repeated_timeouts_exhaust_the_attempt_bound() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .expect(3)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts")
        .with_timeout(Duration::from_millis(100));
    let err = client.execute::<Vec<Account>>(&endpoint).await.unwrap_err();

    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn connection_refused_is_no_connectivity() {
    // Bind then drop a listener so the port is free but unserved.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::new(ApiEnvironment::Mock(format!("http://127.0.0.1:{port}")))
        .with_retry(
            RetryPolicy::new()
                .with_max_attempts(1)
                .with_delay(Duration::from_millis(5)),
        );
    let client = HttpClient::new(config);
    let endpoint = Endpoint::get(client.config().base_url(), "accounts");
    let err = client.execute::<Vec<Account>>(&endpoint).await.unwrap_err();

    assert_eq!(err, ApiError::NoConnectivity);
}

#[tokio::test]
async fn build_failures_surface_without_a_network_attempt() {
    let client = HttpClient::new(ClientConfig::new(ApiEnvironment::Mock(
        "not a base url".to_string(),
    )));
    let endpoint = Endpoint::get(client.config().base_url(), "accounts");
    let err = client.execute::<Vec<Account>>(&endpoint).await.unwrap_err();

    assert_eq!(err, ApiError::InvalidUrl);
}

#[tokio::test]
async fn unit_execution_accepts_an_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/accounts/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::delete(server.uri(), "accounts/1");
    client.execute_unit(&endpoint).await.unwrap();
}

#[tokio::test]
async fn upload_forces_post_and_the_explicit_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/import"))
        .and(header("content-type", "text/plain"))
        .and(body_string("raw payload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "name": "Imported",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    // Descriptor starts as GET; upload must force POST.
    let endpoint = Endpoint::get(server.uri(), "import");
    let account: Account = client
        .upload(endpoint, b"raw payload".to_vec(), ContentType::Text)
        .await
        .unwrap();

    assert_eq!(account.id, 2);
}

#[tokio::test]
async fn download_atomically_replaces_the_destination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh content"))
        .expect(1)
        .mount(&server)
        .await;

    let dest = std::env::temp_dir().join(format!("roster-download-ok-{}", std::process::id()));
    std::fs::write(&dest, "stale content").unwrap();

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "export");
    client.download(&endpoint, &dest).await.unwrap();

    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "fresh content");
    assert!(!dest.with_extension("part").exists());
    std::fs::remove_file(&dest).unwrap();
}

#[tokio::test]
async fn failed_download_leaves_the_destination_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let dest = std::env::temp_dir().join(format!("roster-download-err-{}", std::process::id()));
    std::fs::write(&dest, "precious content").unwrap();

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "export");
    let err = client.download(&endpoint, &dest).await.unwrap_err();

    assert_eq!(err, ApiError::ServerError);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "precious content");
    std::fs::remove_file(&dest).unwrap();
}

#[tokio::test]
async fn diagnostics_flow_through_the_logger() {
    use roster_core::logger::{LogCategory, LogLevel};
    use roster_testing::RecordingLogger;
    use std::sync::Arc;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let logger = RecordingLogger::new();
    let config = test_config(&server)
        .with_retry(RetryPolicy::new().with_max_attempts(2).with_delay(Duration::from_millis(5)));
    let client = HttpClient::new(config).with_logger(Arc::new(logger.clone()));

    let endpoint = Endpoint::get(server.uri(), "accounts");
    let _ = client.execute::<Vec<Account>>(&endpoint).await;

    // One line per attempt, one terminal failure line.
    assert_eq!(logger.count_at(LogLevel::Debug), 2);
    assert_eq!(logger.count_at(LogLevel::Error), 1);
    assert!(
        logger
            .lines()
            .iter()
            .all(|line| line.category == LogCategory::Network)
    );
    assert!(logger.contains("failed: server error"));
}

#[tokio::test]
async fn progress_reports_dispatch_and_settlement_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Ann",
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts/1");
    let reports: Vec<_> = client
        .execute_with_progress::<Account>(endpoint)
        .collect()
        .await;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].fraction, 0.0);
    assert!(!reports[0].is_settled());
    assert_eq!(reports[1].fraction, 1.0);
    assert_eq!(
        reports[1].outcome.as_ref().unwrap().as_ref().unwrap().id,
        1
    );
}

#[tokio::test]
async fn progress_carries_terminal_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server);
    let endpoint = Endpoint::get(server.uri(), "accounts/1");
    let reports: Vec<_> = client
        .execute_with_progress::<Account>(endpoint)
        .collect()
        .await;

    assert_eq!(reports.len(), 2);
    assert!(matches!(
        reports[1].outcome.as_ref().unwrap(),
        Err(ApiError::HttpStatus { status: 404, .. })
    ));
}
