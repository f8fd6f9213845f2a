//! Tool names and their typed argument sets.
//!
//! Each tool maps to exactly one [`ToolRequest`] variant that carries only the
//! arguments that tool accepts. Unknown keys are rejected during parsing.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ErrorDescriptor;
use crate::args::{NumberArg, OneOrMany, SortOrder};

/// The fixed set of tools exposed to model hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    SearchCompanies,
    CompanyLookup,
    FundedCompanies,
    SearchCompaniesByName,
    SearchTransactions,
    SearchInvestors,
    SearchAcquisitions,
    SearchPracticeAreas,
    SearchFeeds,
    SearchBusinessModels,
    DebugApiCall,
    DiagnoseApiRequest,
}

impl ToolName {
    pub const ALL: [Self; 12] = [
        Self::SearchCompanies,
        Self::CompanyLookup,
        Self::FundedCompanies,
        Self::SearchCompaniesByName,
        Self::SearchTransactions,
        Self::SearchInvestors,
        Self::SearchAcquisitions,
        Self::SearchPracticeAreas,
        Self::SearchFeeds,
        Self::SearchBusinessModels,
        Self::DebugApiCall,
        Self::DiagnoseApiRequest,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchCompanies => "search_companies",
            Self::CompanyLookup => "company_lookup",
            Self::FundedCompanies => "funded_companies",
            Self::SearchCompaniesByName => "search_companies_by_name",
            Self::SearchTransactions => "search_transactions",
            Self::SearchInvestors => "search_investors",
            Self::SearchAcquisitions => "search_acquisitions",
            Self::SearchPracticeAreas => "search_practice_areas",
            Self::SearchFeeds => "search_feeds",
            Self::SearchBusinessModels => "search_business_models",
            Self::DebugApiCall => "debug_api_call",
            Self::DiagnoseApiRequest => "diagnose_api_request",
        }
    }

    /// Whether the tool only inspects requests built for another tool.
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::DebugApiCall | Self::DiagnoseApiRequest)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ErrorDescriptor;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name.trim())
            .ok_or_else(|| ErrorDescriptor::invalid_argument(format!("unknown tool: {name}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchCompaniesArgs {
    pub sector: Option<String>,
    pub limit: Option<i64>,
    pub from: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub founded_year: Option<NumberArg>,
    pub min_funding: Option<NumberArg>,
    pub max_funding: Option<NumberArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyLookupArgs {
    pub domain: OneOrMany,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FundedCompaniesArgs {
    pub min_funding: Option<NumberArg>,
    pub max_funding: Option<NumberArg>,
    pub sector: Option<String>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyNameArgs {
    pub company_name: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionSearchArgs {
    pub sector: Option<String>,
    pub round_type: Option<String>,
    pub min_amount: Option<NumberArg>,
    pub max_amount: Option<NumberArg>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub investor_domain: Option<OneOrMany>,
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvestorSearchArgs {
    pub investor_name: Option<String>,
    pub investor_type: Option<String>,
    pub investor_country: Option<String>,
    pub portfolio_sector: Option<String>,
    pub min_investment_score: Option<NumberArg>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcquisitionSearchArgs {
    pub acquisition_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub acquirer_domain: Option<OneOrMany>,
    pub sector: Option<String>,
    pub min_amount: Option<NumberArg>,
    pub max_amount: Option<NumberArg>,
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

/// Arguments shared by the practice-area and business-model lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxonomySearchArgs {
    pub name: Option<String>,
    pub id: Option<OneOrMany>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedSearchArgs {
    pub name: Option<String>,
    pub primary_geography: Option<String>,
    pub id: Option<OneOrMany>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebugApiCallArgs {
    pub tool: Option<String>,
    pub arguments: Option<Value>,
    pub endpoint: Option<String>,
    pub data: Option<Value>,
    pub dispatch: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnoseArgs {
    pub tool: Option<String>,
    pub arguments: Option<Value>,
    pub endpoint: Option<String>,
    pub request_data: Option<Value>,
    pub probe_variations: Option<bool>,
}

/// What a debug tool builds a request for.
#[derive(Debug, Clone, PartialEq)]
pub enum DebugTarget {
    /// The request a data tool would send for these arguments.
    Tool(Box<ToolRequest>),
    /// A caller-supplied endpoint path and body, sent verbatim.
    Raw { endpoint: String, body: Value },
}

impl DebugTarget {
    fn resolve(
        tool: Option<String>,
        arguments: Option<Value>,
        endpoint: Option<String>,
        body: Option<Value>,
    ) -> Result<Option<Self>, ErrorDescriptor> {
        let tool = tool.filter(|name| !name.trim().is_empty());
        let endpoint = endpoint.filter(|path| !path.trim().is_empty());

        match (tool, endpoint) {
            (Some(_), Some(_)) => Err(ErrorDescriptor::invalid_argument(
                "provide either tool or endpoint, not both",
            )),
            (Some(name), None) => {
                if body.is_some() {
                    return Err(ErrorDescriptor::invalid_argument(
                        "raw request data requires endpoint; use arguments with tool",
                    ));
                }
                let tool: ToolName = name.parse()?;
                if tool.is_debug() {
                    return Err(ErrorDescriptor::invalid_argument(format!(
                        "{tool} cannot target another debug tool"
                    )));
                }
                let request = ToolRequest::from_arguments(tool, arguments.unwrap_or(Value::Null))?;
                Ok(Some(Self::Tool(Box::new(request))))
            }
            (None, endpoint) => {
                if arguments.is_some() {
                    return Err(ErrorDescriptor::invalid_argument(
                        "arguments require tool; use data with endpoint",
                    ));
                }
                match (endpoint, body) {
                    (None, None) => Ok(None),
                    (endpoint, body) => Ok(Some(Self::Raw {
                        endpoint: endpoint.unwrap_or_else(|| "companies".to_string()),
                        body: body.unwrap_or_else(|| Value::Object(Map::new())),
                    })),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugRequest {
    pub target: DebugTarget,
    /// Send the request; otherwise only describe it.
    pub dispatch: bool,
}

impl TryFrom<DebugApiCallArgs> for DebugRequest {
    type Error = ErrorDescriptor;

    fn try_from(args: DebugApiCallArgs) -> Result<Self, Self::Error> {
        let target = DebugTarget::resolve(args.tool, args.arguments, args.endpoint, args.data)?
            .unwrap_or_else(|| {
                DebugTarget::Tool(Box::new(ToolRequest::SearchCompanies(SearchCompaniesArgs {
                    limit: Some(1),
                    ..SearchCompaniesArgs::default()
                })))
            });
        Ok(Self {
            target,
            dispatch: args.dispatch.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnoseRequest {
    pub target: DebugTarget,
    /// Send each suggested variation after a failed request.
    pub probe_variations: bool,
}

impl TryFrom<DiagnoseArgs> for DiagnoseRequest {
    type Error = ErrorDescriptor;

    fn try_from(args: DiagnoseArgs) -> Result<Self, Self::Error> {
        let target = DebugTarget::resolve(
            args.tool,
            args.arguments,
            args.endpoint,
            args.request_data,
        )?
        .ok_or_else(|| {
            ErrorDescriptor::invalid_argument(
                "diagnose_api_request needs a tool or an endpoint with request_data",
            )
        })?;
        Ok(Self {
            target,
            probe_variations: args.probe_variations.unwrap_or(false),
        })
    }
}

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    SearchCompanies(SearchCompaniesArgs),
    CompanyLookup(CompanyLookupArgs),
    FundedCompanies(FundedCompaniesArgs),
    SearchCompaniesByName(CompanyNameArgs),
    SearchTransactions(TransactionSearchArgs),
    SearchInvestors(InvestorSearchArgs),
    SearchAcquisitions(AcquisitionSearchArgs),
    SearchPracticeAreas(TaxonomySearchArgs),
    SearchFeeds(FeedSearchArgs),
    SearchBusinessModels(TaxonomySearchArgs),
    DebugApiCall(DebugRequest),
    DiagnoseApiRequest(DiagnoseRequest),
}

impl ToolRequest {
    /// Parses loosely-typed arguments into the variant for `tool`.
    ///
    /// `null` is treated as an empty argument object.
    ///
    /// # Errors
    /// Returns `invalid_argument` when the arguments do not fit the tool.
    pub fn from_arguments(tool: ToolName, arguments: Value) -> Result<Self, ErrorDescriptor> {
        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let request = match tool {
            ToolName::SearchCompanies => Self::SearchCompanies(parse_args(tool, arguments)?),
            ToolName::CompanyLookup => Self::CompanyLookup(parse_args(tool, arguments)?),
            ToolName::FundedCompanies => Self::FundedCompanies(parse_args(tool, arguments)?),
            ToolName::SearchCompaniesByName => {
                Self::SearchCompaniesByName(parse_args(tool, arguments)?)
            }
            ToolName::SearchTransactions => Self::SearchTransactions(parse_args(tool, arguments)?),
            ToolName::SearchInvestors => Self::SearchInvestors(parse_args(tool, arguments)?),
            ToolName::SearchAcquisitions => Self::SearchAcquisitions(parse_args(tool, arguments)?),
            ToolName::SearchPracticeAreas => {
                Self::SearchPracticeAreas(parse_args(tool, arguments)?)
            }
            ToolName::SearchFeeds => Self::SearchFeeds(parse_args(tool, arguments)?),
            ToolName::SearchBusinessModels => {
                Self::SearchBusinessModels(parse_args(tool, arguments)?)
            }
            ToolName::DebugApiCall => {
                Self::DebugApiCall(parse_args::<DebugApiCallArgs>(tool, arguments)?.try_into()?)
            }
            ToolName::DiagnoseApiRequest => {
                Self::DiagnoseApiRequest(parse_args::<DiagnoseArgs>(tool, arguments)?.try_into()?)
            }
        };
        Ok(request)
    }

    #[must_use]
    pub const fn tool_name(&self) -> ToolName {
        match self {
            Self::SearchCompanies(_) => ToolName::SearchCompanies,
            Self::CompanyLookup(_) => ToolName::CompanyLookup,
            Self::FundedCompanies(_) => ToolName::FundedCompanies,
            Self::SearchCompaniesByName(_) => ToolName::SearchCompaniesByName,
            Self::SearchTransactions(_) => ToolName::SearchTransactions,
            Self::SearchInvestors(_) => ToolName::SearchInvestors,
            Self::SearchAcquisitions(_) => ToolName::SearchAcquisitions,
            Self::SearchPracticeAreas(_) => ToolName::SearchPracticeAreas,
            Self::SearchFeeds(_) => ToolName::SearchFeeds,
            Self::SearchBusinessModels(_) => ToolName::SearchBusinessModels,
            Self::DebugApiCall(_) => ToolName::DebugApiCall,
            Self::DiagnoseApiRequest(_) => ToolName::DiagnoseApiRequest,
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> Result<T, ErrorDescriptor> {
    serde_json::from_value(arguments).map_err(|err| {
        ErrorDescriptor::invalid_argument(format!("invalid arguments for {tool}: {err}"))
    })
}
