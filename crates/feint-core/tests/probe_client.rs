//! Integration tests for ProbeClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover the fixed header set, token
//! extraction from the leaking response header, anti-forgery header
//! override on send, and the replay fan-out count.

use feint_core::probe::{ProbeClient, ProbeConfig, INVALID_TOKEN, TOKEN_HEADER, XSRF_HEADER};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> ProbeConfig {
    ProbeConfig {
        url: format!("{}/account/send-otp", server.uri()),
        origin: server.uri(),
        referer: format!("{}/login", server.uri()),
        email: "test@example.com".to_string(),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn acquire_presents_fixed_headers_and_reads_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/send-otp"))
        .and(header("platformtypeid", "1"))
        .and(header("user-agent", "Mozilla/5.0"))
        .and(header("accept", "application/json"))
        .and(header(XSRF_HEADER, INVALID_TOKEN))
        .and(body_json(serde_json::json!({
            "email": "test@example.com",
            "isemail": true,
        })))
        .respond_with(ResponseTemplate::new(200).insert_header(TOKEN_HEADER, "dG9rZW4"))
        .expect(1)
        .mount(&server)
        .await;

    let probe = ProbeClient::new(test_config(&server)).expect("client");
    let acquisition = probe.acquire().await.expect("acquire");

    assert_eq!(acquisition.status, 200);
    assert_eq!(acquisition.token.as_deref(), Some("dG9rZW4"));
}

#[tokio::test]
async fn acquire_reports_missing_token_as_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let probe = ProbeClient::new(test_config(&server)).expect("client");
    let acquisition = probe.acquire().await.expect("acquire");

    assert!(acquisition.token.is_none());
}

#[tokio::test]
async fn send_overrides_the_anti_forgery_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header(XSRF_HEADER, "mutated-token"))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .expect(1)
        .mount(&server)
        .await;

    let probe = ProbeClient::new(test_config(&server)).expect("client");
    let outcome = probe.send("mutated-token").await.expect("send");

    assert_eq!(outcome.status, 403);
    assert_eq!(outcome.body, "denied");
}

#[tokio::test]
async fn replay_issues_exactly_n_requests_and_joins() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header(XSRF_HEADER, "replayed"))
        .respond_with(ResponseTemplate::new(200))
        .expect(7)
        .mount(&server)
        .await;

    let probe = ProbeClient::new(test_config(&server)).expect("client");
    probe.replay("replayed", 7).await;

    // replay() joined every task, so all 7 requests have been received.
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 7);
}

#[tokio::test]
async fn network_failure_is_reported_not_panicked() {
    // Nothing listens on this port.
    let probe = ProbeClient::new(ProbeConfig {
        url: "http://127.0.0.1:9/unreachable".to_string(),
        origin: "http://127.0.0.1:9".to_string(),
        referer: "http://127.0.0.1:9".to_string(),
        email: "test@example.com".to_string(),
        timeout_secs: 1,
    })
    .expect("client");

    let err = probe.acquire().await.unwrap_err();
    assert!(err.to_string().contains("network error"));
}
