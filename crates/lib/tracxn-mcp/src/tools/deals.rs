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

use super::{NumberOrString, SortOrderParam, StringOrList};
use crate::TracxnMcp;

/// Parameters for searching funding rounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchTransactionsParams {
    pub sector: Option<String>,
    /// Round category, e.g. "Series A".
    pub round_type: Option<String>,
    /// Minimum round amount in USD.
    pub min_amount: Option<NumberOrString>,
    /// Maximum round amount in USD.
    pub max_amount: Option<NumberOrString>,
    /// Earliest round date (YYYY-MM-DD or dd/mm/yyyy).
    pub start_date: Option<String>,
    /// Latest round date (YYYY-MM-DD or dd/mm/yyyy).
    pub end_date: Option<String>,
    /// Domain of a participating institutional investor.
    pub investor_domain: Option<StringOrList>,
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Defaults to "transactionFundingRoundDate".
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrderParam>,
}

/// Parameters for searching investors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchInvestorsParams {
    /// Investor domain or name.
    pub investor_name: Option<String>,
    /// e.g. "Venture Capital", "Angel".
    pub investor_type: Option<String>,
    pub investor_country: Option<String>,
    /// Sector the investor's portfolio covers.
    pub portfolio_sector: Option<String>,
    /// Minimum Tracxn investment score, 0 to 100.
    pub min_investment_score: Option<NumberOrString>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrderParam>,
}

/// Parameters for searching acquisitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchAcquisitionsParams {
    pub acquisition_type: Option<String>,
    /// Earliest announcement date (YYYY-MM-DD or dd/mm/yyyy).
    pub start_date: Option<String>,
    /// Latest announcement date (YYYY-MM-DD or dd/mm/yyyy).
    pub end_date: Option<String>,
    pub acquirer_domain: Option<StringOrList>,
    pub sector: Option<String>,
    pub min_amount: Option<NumberOrString>,
    pub max_amount: Option<NumberOrString>,
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Defaults to "announcementDate".
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrderParam>,
}

#[tool_router(router = tool_router_deals, vis = "pub")]
impl<T: Transport> TracxnMcp<T> {
    #[tool(description = "Search for funding rounds (transactions) in the Tracxn database.")]
    async fn search_transactions(
        &self,
        Parameters(params): Parameters<SearchTransactionsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchTransactions, &params, context.ct.cancelled())
            .await
    }

    #[tool(description = "Search for investors in the Tracxn database.")]
    async fn search_investors(
        &self,
        Parameters(params): Parameters<SearchInvestorsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchInvestors, &params, context.ct.cancelled())
            .await
    }

    #[tool(description = "Search for acquisitions in the Tracxn database.")]
    async fn search_acquisitions(
        &self,
        Parameters(params): Parameters<SearchAcquisitionsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchAcquisitions, &params, context.ct.cancelled())
            .await
    }
}
