use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    service::RequestContext,
    tool,
    tool_router,
    RoleServer,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracxn_core::{ToolName, Transport};

use crate::TracxnMcp;

/// Parameters for describing, and optionally sending, a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DebugApiCallParams {
    /// Data tool whose request should be built, e.g. "search_companies".
    pub tool: Option<String>,
    /// Arguments for `tool`.
    pub arguments: Option<Value>,
    /// Raw endpoint path relative to the API base, e.g. "companies".
    pub endpoint: Option<String>,
    /// Raw JSON body for `endpoint`.
    pub data: Option<Value>,
    /// Send the request. Defaults to true.
    pub dispatch: Option<bool>,
}

/// Parameters for diagnosing a rejected request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DiagnoseParams {
    pub tool: Option<String>,
    pub arguments: Option<Value>,
    pub endpoint: Option<String>,
    pub request_data: Option<Value>,
    /// Also send each suggested variation. Defaults to false.
    pub probe_variations: Option<bool>,
}

#[tool_router(router = tool_router_debug, vis = "pub")]
impl<T: Transport> TracxnMcp<T> {
    #[tool(
        description = "Show the exact request a tool (or a raw endpoint and body) sends, with the token masked, and the raw response. Set dispatch=false to skip the network call."
    )]
    async fn debug_api_call(
        &self,
        Parameters(params): Parameters<DebugApiCallParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::DebugApiCall, &params, context.ct.cancelled())
            .await
    }

    #[tool(
        description = "Send a request once and, if it is rejected, suggest alternative request shapes (sort and domain formats)."
    )]
    async fn diagnose_api_request(
        &self,
        Parameters(params): Parameters<DiagnoseParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::DiagnoseApiRequest, &params, context.ct.cancelled())
            .await
    }
}
