//! MCP server runners for tracxn-mcp.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tracing::info;
use tracxn_core::{TracxnAdapter, Transport};

use crate::TracxnMcp;

pub const DEFAULT_HTTP_PORT: u16 = 4020;

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_HTTP_PORT)))
    }
}

/// Serves the MCP server over stdio until the peer disconnects.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio<T: Transport>(
    adapter: Arc<TracxnAdapter<T>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = TracxnMcp::with_adapter(adapter);
    let (stdin, stdout) = stdio();
    info!("serving MCP on stdio");
    let running = serve_server(service, (stdin, stdout)).await?;
    let reason = running.waiting().await?;
    info!(?reason, "stdio session ended");
    Ok(())
}

/// Builds the HTTP router: MCP at `/mcp`, liveness at `/health`.
pub fn router<T: Transport>(adapter: Arc<TracxnAdapter<T>>, config: &McpHttpServerConfig) -> Router {
    let service: StreamableHttpService<TracxnMcp<T>, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(TracxnMcp::with_adapter(Arc::clone(&adapter))),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                sse_retry: config.sse_retry,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service)
}

/// Serves the MCP server using streamable HTTP transport.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http<T: Transport>(
    adapter: Arc<TracxnAdapter<T>>,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(adapter, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "serving MCP over streamable HTTP");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_loopback() {
        let config = McpHttpServerConfig::default();
        assert_eq!(config.addr.to_string(), "127.0.0.1:4020");
        assert!(config.stateful_mode);
    }
}
