//! MCP server implementation for tracxn-mcp.
//!
//! This crate wires the Tracxn adapter into rmcp tool and prompt handlers and
//! exposes the MCP-facing API surface over stdio or streamable HTTP.

mod helpers;
mod prompts;
mod tools;
pub mod server;

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    handler::server::router::prompt::PromptRouter,
    handler::server::tool::ToolRouter,
    prompt_handler,
    service::RequestContext,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{
    CallToolResult,
    Content,
    GetPromptRequestParams,
    GetPromptResult,
    ListPromptsResult,
    PaginatedRequestParams,
    ServerCapabilities,
    ServerInfo,
};
use serde::Serialize;
use tracxn_core::{HttpTransport, ToolName, ToolRequest, TracxnAdapter, Transport};

pub use tools::{NumberOrString, SortOrderParam, StringOrList};

const SERVER_INSTRUCTIONS: &str = r"tracxn-mcp exposes the Tracxn API (v2.2) for company, funding, investor, and acquisition research.

Tools:
- Companies: `search_companies` (sector, location, founding year, funding range), `company_lookup`
  (one domain or a list), `funded_companies`, `search_companies_by_name`.
- Deals: `search_transactions`, `search_investors`, `search_acquisitions`.
- Taxonomy: `search_practice_areas`, `search_feeds`, `search_business_models`.
- Debugging: `debug_api_call` shows the exact request a tool sends (token masked) and the raw
  response; `diagnose_api_request` suggests alternative request shapes after a rejection.

Notes:
- Every search returns at most 20 results; `limit` defaults to 5.
- Dates accept YYYY-MM-DD or dd/mm/yyyy. Amounts are USD.
- Errors come back as tool results with a `kind`: bad_request, auth_failure, forbidden, not_found,
  rate_limited, upstream_failure, unexpected_status, transport, invalid_argument, cancelled.
- The server may point at the playground (sample data) or production API.
- `health` returns `ok`.";

/// MCP server wrapper around a shared adapter and the tool and prompt routers.
pub struct TracxnMcp<T: Transport = HttpTransport> {
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
    adapter: Arc<TracxnAdapter<T>>,
}

impl<T: Transport> Clone for TracxnMcp<T> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            prompt_router: self.prompt_router.clone(),
            adapter: Arc::clone(&self.adapter),
        }
    }
}

impl<T: Transport> TracxnMcp<T> {
    /// Creates a new server owning the adapter.
    #[must_use]
    pub fn new(adapter: TracxnAdapter<T>) -> Self {
        Self::with_adapter(Arc::new(adapter))
    }

    /// Creates a new server using a shared adapter handle.
    #[must_use]
    pub fn with_adapter(adapter: Arc<TracxnAdapter<T>>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_companies()
            + Self::tool_router_deals()
            + Self::tool_router_taxonomy()
            + Self::tool_router_debug();
        Self {
            tool_router,
            prompt_router: Self::prompt_router(),
            adapter,
        }
    }

    /// Runs a tool through the adapter, stopping early if `cancelled` resolves.
    pub(crate) async fn run<P, F>(
        &self,
        tool: ToolName,
        params: &P,
        cancelled: F,
    ) -> Result<CallToolResult, ErrorData>
    where
        P: Serialize + Sync,
        F: Future<Output = ()> + Send,
    {
        let arguments = helpers::to_arguments(params)?;
        let outcome = match ToolRequest::from_arguments(tool, arguments) {
            Ok(request) => self.adapter.call_until(request, cancelled).await,
            Err(err) => Err(err),
        };
        helpers::tool_result(outcome)
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<T: Transport> TracxnMcp<T> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
#[prompt_handler]
impl<T: Transport> ServerHandler for TracxnMcp<T> {
    fn get_info(&self) -> ServerInfo {
        let environment = self.adapter.config().environment().as_str();
        ServerInfo {
            instructions: Some(format!("{SERVER_INSTRUCTIONS}\n- Current environment: {environment}.")),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use tracxn_core::{ApiEnvironment, EndpointConfig};

    use super::*;

    fn server() -> TracxnMcp {
        let config = EndpointConfig::new("token-for-tests", ApiEnvironment::Playground);
        TracxnMcp::new(TracxnAdapter::new(config).expect("http client builds"))
    }

    #[test]
    fn registers_every_tool() {
        let server = server();
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        for tool in ToolName::ALL {
            assert!(names.iter().any(|name| name == tool.as_str()), "missing {tool}");
        }
        assert!(names.iter().any(|name| name == "health"));
        assert_eq!(names.len(), ToolName::ALL.len() + 1);
    }

    #[test]
    fn registers_prompts() {
        let server = server();
        let names: Vec<String> = server
            .prompt_router
            .list_all()
            .into_iter()
            .map(|prompt| prompt.name)
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"lookup_company".to_string()));
    }

    #[tokio::test]
    async fn cancelled_call_is_an_error_result() {
        let result = server()
            .run(ToolName::SearchFeeds, &serde_json::json!({}), std::future::ready(()))
            .await
            .expect("still a tool result");

        assert_eq!(result.is_error, Some(true));
        let text = result
            .content
            .first()
            .and_then(|content| content.raw.as_text())
            .map(|text| text.text.clone())
            .expect("text content");
        assert!(text.contains("\"cancelled\""), "{text}");
    }

    #[test]
    fn info_mentions_environment() {
        let info = server().get_info();
        let instructions = info.instructions.expect("instructions set");
        assert!(instructions.contains("playground"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
    }
}
