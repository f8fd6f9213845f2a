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

/// Parameters for searching companies by sector and other criteria.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchCompaniesParams {
    /// Sector (feed) name. Defaults to "Cybersecurity".
    pub sector: Option<String>,
    /// Number of results, at most 20. Defaults to 5.
    pub limit: Option<i64>,
    /// Offset of the first result.
    pub from: Option<i64>,
    /// Field to sort by, e.g. "totalMoneyRaised".
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrderParam>,
    pub country: Option<String>,
    pub city: Option<String>,
    /// Four-digit founding year.
    pub founded_year: Option<NumberOrString>,
    /// Minimum total funding in USD.
    pub min_funding: Option<NumberOrString>,
    /// Maximum total funding in USD.
    pub max_funding: Option<NumberOrString>,
}

/// Parameters for looking up companies by domain.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompanyLookupParams {
    /// Company domain such as "crowdstrike.com", or a list of domains.
    pub domain: StringOrList,
}

/// Parameters for finding companies within a funding range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FundedCompaniesParams {
    /// Minimum total funding in USD. Defaults to 10,000,000.
    pub min_funding: Option<NumberOrString>,
    /// Maximum total funding in USD. Defaults to 100,000,000.
    pub max_funding: Option<NumberOrString>,
    /// Sector (feed) name. Defaults to "Cybersecurity".
    pub sector: Option<String>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrderParam>,
    pub country: Option<String>,
}

/// Parameters for searching companies by name.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompanyNameParams {
    pub company_name: String,
    pub limit: Option<i64>,
}

#[tool_router(router = tool_router_companies, vis = "pub")]
impl<T: Transport> TracxnMcp<T> {
    #[tool(description = "Search for companies in the Tracxn database by sector and other criteria.")]
    async fn search_companies(
        &self,
        Parameters(params): Parameters<SearchCompaniesParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchCompanies, &params, context.ct.cancelled())
            .await
    }

    #[tool(description = "Look up detailed information about companies by domain.")]
    async fn company_lookup(
        &self,
        Parameters(params): Parameters<CompanyLookupParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::CompanyLookup, &params, context.ct.cancelled())
            .await
    }

    #[tool(description = "Find companies whose total funding falls within a range.")]
    async fn funded_companies(
        &self,
        Parameters(params): Parameters<FundedCompaniesParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::FundedCompanies, &params, context.ct.cancelled())
            .await
    }

    #[tool(description = "Search for companies by name to get their IDs and domains.")]
    async fn search_companies_by_name(
        &self,
        Parameters(params): Parameters<CompanyNameParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolName::SearchCompaniesByName, &params, context.ct.cancelled())
            .await
    }
}
