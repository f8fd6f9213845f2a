use std::time::Duration;

use serde_json::json;
use tracxn_core::{ApiEnvironment, EndpointConfig, ErrorKind, TracxnAdapter};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "wiremock-token-abcdef";

fn adapter_for(base_url: &str) -> TracxnAdapter {
    let config = EndpointConfig::new(TOKEN, ApiEnvironment::Production)
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    TracxnAdapter::new(config).expect("http client builds")
}

#[tokio::test]
async fn sends_token_header_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/companies"))
        .and(header("accesstoken", TOKEN))
        .and(header("cache-control", "no-cache"))
        .and(body_json(json!({ "filter": { "domain": ["acme.com"] }, "size": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "name": "Acme", "domain": "acme.com" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = adapter_for(&server.uri())
        .invoke("company_lookup", json!({ "domain": "www.acme.com" }))
        .await
        .expect("lookup succeeds");

    assert_eq!(value["result"][0]["name"], "Acme");
}

#[tokio::test]
async fn forbidden_status_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string(r#"{"message":"credit limit exceeded"}"#),
        )
        .mount(&server)
        .await;

    let err = adapter_for(&server.uri())
        .invoke("search_transactions", json!({ "round_type": "Seed" }))
        .await
        .expect_err("403 is an error");

    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(err.http_status, Some(403));
    assert!(err.message.contains("credit limit exceeded"));
    assert_eq!(
        err.raw_body.as_deref(),
        Some(r#"{"message":"credit limit exceeded"}"#)
    );
}

#[tokio::test]
async fn server_error_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = adapter_for(&server.uri())
        .invoke("search_feeds", json!({}))
        .await
        .expect_err("502 is an error");

    assert_eq!(err.kind, ErrorKind::UpstreamFailure);
    assert_eq!(err.raw_body, None);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = EndpointConfig::new(TOKEN, ApiEnvironment::Production)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(100));
    let err = TracxnAdapter::new(config)
        .expect("http client builds")
        .invoke("search_feeds", json!({}))
        .await
        .expect_err("times out");

    assert_eq!(err.kind, ErrorKind::Transport);
}

#[tokio::test]
async fn unreachable_host_is_transport() {
    let err = adapter_for("http://127.0.0.1:1")
        .invoke("search_feeds", json!({}))
        .await
        .expect_err("nothing listens on port 1");

    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(err.http_status, None);
}
