//! Daemon entry point for the Tracxn MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! shared adapter, and serves the MCP protocol over stdio, streamable HTTP, or
//! both.

mod config;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracxn_core::TracxnAdapter;
use tracxn_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};

use crate::config::TracxnConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = TracxnConfig::from_args()?;

    // stdout belongs to the stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let endpoint = config.endpoint_config();
    info!(
        environment = endpoint.environment().as_str(),
        base_url = endpoint.base_url(),
        token = %endpoint.masked_token(),
        timeout_secs = endpoint.timeout().as_secs(),
        "starting tracxn-mcpd"
    );
    let adapter = Arc::new(TracxnAdapter::new(endpoint)?);

    let stdio = {
        let adapter = Arc::clone(&adapter);
        let enabled = config.enable_stdio;
        async move {
            if enabled {
                serve_stdio(adapter).await
            } else {
                Ok(())
            }
        }
    };
    let http = {
        let enabled = config.mcp_serve;
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        async move {
            if enabled {
                serve_streamable_http(adapter, http_config).await
            } else {
                Ok(())
            }
        }
    };

    tokio::try_join!(stdio, http)?;
    Ok(())
}
