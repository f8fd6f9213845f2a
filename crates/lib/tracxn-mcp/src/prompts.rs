//! Canned prompts that steer a model toward the company tools.

use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{GetPromptResult, PromptMessage, PromptMessageRole},
    prompt,
    prompt_router,
    schemars,
};
use serde::{Deserialize, Serialize};
use tracxn_core::Transport;

use crate::TracxnMcp;

const DEFAULT_PROMPT_LIMIT: &str = "5";
const DEFAULT_MIN_FUNDING: &str = "10000000";
const DEFAULT_MAX_FUNDING: &str = "100000000";

#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CybersecurityPromptArgs {
    /// Number of companies to retrieve.
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LookupCompanyPromptArgs {
    /// Company domain, e.g. "crowdstrike.com".
    pub domain: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FundedCompaniesPromptArgs {
    /// Minimum funding amount in USD.
    pub min_funding: Option<String>,
    /// Maximum funding amount in USD.
    pub max_funding: Option<String>,
}

fn user_prompt(description: String, text: String) -> GetPromptResult {
    GetPromptResult {
        description: Some(description),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[prompt_router(vis = "pub")]
impl<T: Transport> TracxnMcp<T> {
    #[prompt(
        name = "search_cybersecurity_companies",
        description = "Search for information about cybersecurity companies in the Tracxn database"
    )]
    async fn search_cybersecurity_companies(
        &self,
        Parameters(args): Parameters<CybersecurityPromptArgs>,
    ) -> Result<GetPromptResult, ErrorData> {
        let limit = or_default(args.limit, DEFAULT_PROMPT_LIMIT);
        Ok(user_prompt(
            format!("Searching for top {limit} cybersecurity companies"),
            format!("Find information about the top {limit} cybersecurity companies"),
        ))
    }

    #[prompt(
        name = "lookup_company",
        description = "Look up detailed information about a specific company by domain name"
    )]
    async fn lookup_company(
        &self,
        Parameters(args): Parameters<LookupCompanyPromptArgs>,
    ) -> Result<GetPromptResult, ErrorData> {
        let domain = args.domain.trim();
        Ok(user_prompt(
            format!("Looking up information about {domain}"),
            format!("Find detailed information about the company with domain {domain}"),
        ))
    }

    #[prompt(
        name = "search_funded_companies",
        description = "Find cybersecurity companies with specific funding amounts"
    )]
    async fn search_funded_companies(
        &self,
        Parameters(args): Parameters<FundedCompaniesPromptArgs>,
    ) -> Result<GetPromptResult, ErrorData> {
        let min = or_default(args.min_funding, DEFAULT_MIN_FUNDING);
        let max = or_default(args.max_funding, DEFAULT_MAX_FUNDING);
        Ok(user_prompt(
            format!("Finding cybersecurity companies with funding between ${min} and ${max}"),
            format!("Find cybersecurity companies with funding between ${min} and ${max}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompt_arguments_use_defaults() {
        assert_eq!(or_default(Some("  ".to_string()), DEFAULT_PROMPT_LIMIT), "5");
        assert_eq!(or_default(None, DEFAULT_MIN_FUNDING), "10000000");
        assert_eq!(or_default(Some("7".to_string()), DEFAULT_PROMPT_LIMIT), "7");
    }
}
