use std::sync::Arc;

use tracxn_core::{ApiEnvironment, EndpointConfig, TracxnAdapter};
use tracxn_mcp::server::{McpHttpServerConfig, router};

#[tokio::test]
async fn health_route_answers_ok() {
    let config = EndpointConfig::new("token-for-tests", ApiEnvironment::Playground);
    let adapter = Arc::new(TracxnAdapter::new(config).expect("http client builds"));
    let app = router(adapter, &McpHttpServerConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    let body = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("health request")
        .text()
        .await
        .expect("health body");
    assert_eq!(body, "ok");

    server.abort();
}
