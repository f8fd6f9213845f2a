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
use tracxn_core::{ToolName, Transport};

use super::StringOrList;
use crate::TracxnMcp;

/// Parameters for searching practice areas or business models.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TaxonomySearchParams {
    pub name: Option<String>,
    /// One id or a list of ids.
    pub id: Option<StringOrList>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Parameters for searching feeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchFeedsParams {
    pub name: Option<String>,
    pub primary_geography: Option<String>,
    pub id: Option<StringOrList>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[tool_router(router = tool_router_taxonomy, vis = "pub")]
impl<T: Transport> TracxnMcp<T> {
    #[tool(description = "Search for practice areas in the Tracxn database.")]
    async fn search_practice_areas(
        &self,
        Parameters(params): Parameters<TaxonomySearchParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchPracticeAreas, &params, context.ct.cancelled())
            .await
    }

    #[tool(description = "Search for feeds (sectors) in the Tracxn database.")]
    async fn search_feeds(
        &self,
        Parameters(params): Parameters<SearchFeedsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchFeeds, &params, context.ct.cancelled())
            .await
    }

    #[tool(description = "Search for business models in the Tracxn database. Requires name or id.")]
    async fn search_business_models(
        &self,
        Parameters(params): Parameters<TaxonomySearchParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchBusinessModels, &params, context.ct.cancelled())
            .await
    }
}
