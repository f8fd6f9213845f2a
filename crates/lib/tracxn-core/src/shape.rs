//! Request shaping.
//!
//! Turns a [`ToolRequest`] into the body a Tracxn endpoint expects. All
//! validation that can fail happens here, before anything touches the network.
//! The result ceiling, domain normalization, and per-endpoint sort format are
//! applied uniformly so that debug tools can reproduce the exact request a
//! data tool would send.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Number, Value, json};

use crate::args::{NumberArg, OneOrMany, SortOrder};
use crate::config::{DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT};
use crate::tools::{
    AcquisitionSearchArgs,
    CompanyLookupArgs,
    CompanyNameArgs,
    DebugTarget,
    FeedSearchArgs,
    FundedCompaniesArgs,
    InvestorSearchArgs,
    SearchCompaniesArgs,
    TaxonomySearchArgs,
    ToolRequest,
    TransactionSearchArgs,
};
use crate::ErrorDescriptor;

const DEFAULT_SECTOR: &str = "Cybersecurity";
const DEFAULT_MIN_FUNDING: i64 = 10_000_000;
const DEFAULT_MAX_FUNDING: i64 = 100_000_000;

/// A shaped request: endpoint path relative to the base URL, plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRequest {
    pub endpoint: String,
    pub body: Value,
}

/// Tracxn endpoints reachable through the data tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Companies,
    CompanyNameSearch,
    Transactions,
    Investors,
    AcquisitionTransactions,
    PracticeAreas,
    Feeds,
    BusinessModels,
}

/// How an endpoint wants its sort expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortStyle {
    /// `"sort": [{"<field>": "<order>"}]`
    FieldList,
    /// `"sortField": "<field>", "sortOrder": "<order>"`
    FieldAndOrder,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::CompanyNameSearch => "companies/search",
            Self::Transactions => "transactions",
            Self::Investors => "investors",
            Self::AcquisitionTransactions => "acquisitiontransactions",
            Self::PracticeAreas => "practiceareas",
            Self::Feeds => "feeds",
            Self::BusinessModels => "businessmodels",
        }
    }

    const fn sort_style(self) -> SortStyle {
        match self {
            Self::Transactions | Self::AcquisitionTransactions => SortStyle::FieldAndOrder,
            _ => SortStyle::FieldList,
        }
    }

    const fn default_sort_field(self) -> Option<&'static str> {
        match self {
            Self::Transactions => Some("transactionFundingRoundDate"),
            Self::AcquisitionTransactions => Some("announcementDate"),
            _ => None,
        }
    }
}

/// Applies the result ceiling. Missing limits fall back to the default.
///
/// # Errors
/// Returns `invalid_argument` for limits below 1.
pub fn effective_limit(limit: Option<i64>) -> Result<u32, ErrorDescriptor> {
    match limit {
        None => Ok(DEFAULT_RESULT_LIMIT),
        Some(value) if value < 1 => Err(ErrorDescriptor::invalid_argument(format!(
            "limit must be at least 1, got {value}"
        ))),
        Some(value) => Ok(u32::try_from(value).map_or(MAX_RESULT_LIMIT, |value| {
            value.min(MAX_RESULT_LIMIT)
        })),
    }
}

/// Negative offsets are treated as the first page.
#[must_use]
pub fn effective_offset(offset: Option<i64>) -> u64 {
    offset.map_or(0, |value| u64::try_from(value).unwrap_or(0))
}

/// Normalizes a company or investor domain to its bare host.
#[must_use]
pub fn normalize_domain(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut domain = lowered.as_str();
    for prefix in ["http://", "https://", "www."] {
        domain = domain.strip_prefix(prefix).unwrap_or(domain);
    }
    domain
        .split('/')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn normalize_domains(field: &str, value: &OneOrMany) -> Result<Vec<String>, ErrorDescriptor> {
    let domains: Vec<String> = value
        .clone()
        .into_vec()
        .iter()
        .map(|domain| normalize_domain(domain))
        .filter(|domain| !domain.is_empty())
        .collect();
    if domains.is_empty() {
        return Err(ErrorDescriptor::invalid_argument(format!(
            "{field} must contain at least one domain"
        )));
    }
    if let Some(bad) = domains.iter().find(|domain| domain.contains(char::is_whitespace)) {
        return Err(ErrorDescriptor::invalid_argument(format!(
            "{field} contains an invalid domain: {bad:?}"
        )));
    }
    Ok(domains)
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ErrorDescriptor> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|date| date.date_naive()))
        .map_err(|_| {
            ErrorDescriptor::invalid_argument(format!(
                "{field} must be a date (YYYY-MM-DD or dd/mm/yyyy), got {value:?}"
            ))
        })
}

fn sector(value: Option<&str>) -> Result<&str, ErrorDescriptor> {
    match value.map(str::trim) {
        None => Ok(DEFAULT_SECTOR),
        Some("") => Err(ErrorDescriptor::invalid_argument("sector must not be empty")),
        Some(sector) => Ok(sector),
    }
}

fn founded_year(value: &NumberArg) -> Result<String, ErrorDescriptor> {
    let number = value.to_number("founded_year")?;
    number
        .as_i64()
        .or_else(|| number.as_f64().and_then(whole))
        .filter(|year| (1000..=9999).contains(year))
        .map(|year| year.to_string())
        .ok_or_else(|| ErrorDescriptor::invalid_argument("founded_year must be a four-digit year"))
}

/// `2020.0` is `2020`; fractional or out-of-range values are `None`.
#[allow(clippy::cast_possible_truncation)]
fn whole(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < 1e15).then(|| value as i64)
}

struct BodyBuilder {
    endpoint: Endpoint,
    filter: Map<String, Value>,
    body: Map<String, Value>,
}

impl BodyBuilder {
    fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            filter: Map::new(),
            body: Map::new(),
        }
    }

    fn filter(&mut self, key: &str, value: Value) {
        self.filter.insert(key.to_string(), value);
    }

    /// Inserts `[value]` when the value is present and not blank.
    fn list(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            self.filter(key, json!([value]));
        }
    }

    fn values(&mut self, key: &str, values: Vec<String>) {
        if !values.is_empty() {
            self.filter(key, Value::from(values));
        }
    }

    fn amount_range(
        &mut self,
        key: &str,
        min: (&str, Option<&NumberArg>),
        max: (&str, Option<&NumberArg>),
    ) -> Result<(), ErrorDescriptor> {
        let min_value = min.1.map(|value| value.to_amount(min.0)).transpose()?;
        let max_value = max.1.map(|value| value.to_amount(max.0)).transpose()?;
        if let (Some(low), Some(high)) = (&min_value, &max_value)
            && low.as_f64() > high.as_f64()
        {
            return Err(ErrorDescriptor::invalid_argument(format!(
                "{} must not exceed {}",
                min.0, max.0
            )));
        }
        self.range(key, min_value.map(Value::Number), max_value.map(Value::Number));
        Ok(())
    }

    fn date_range(
        &mut self,
        key: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(), ErrorDescriptor> {
        let start = start.map(str::trim).filter(|value| !value.is_empty());
        let end = end.map(str::trim).filter(|value| !value.is_empty());
        let start_date = start.map(|value| parse_date("start_date", value)).transpose()?;
        let end_date = end.map(|value| parse_date("end_date", value)).transpose()?;
        if let (Some(low), Some(high)) = (start_date, end_date)
            && low > high
        {
            return Err(ErrorDescriptor::invalid_argument(
                "start_date must not be after end_date",
            ));
        }
        self.range(key, start.map(Value::from), end.map(Value::from));
        Ok(())
    }

    fn range(&mut self, key: &str, min: Option<Value>, max: Option<Value>) {
        let mut range = Map::new();
        if let Some(min) = min {
            range.insert("min".to_string(), min);
        }
        if let Some(max) = max {
            range.insert("max".to_string(), max);
        }
        if !range.is_empty() {
            self.filter(key, Value::Object(range));
        }
    }

    fn size(&mut self, limit: Option<i64>) -> Result<(), ErrorDescriptor> {
        let size = effective_limit(limit)?;
        self.body.insert("size".to_string(), size.into());
        Ok(())
    }

    fn page(&mut self, limit: Option<i64>, offset: Option<i64>) -> Result<(), ErrorDescriptor> {
        self.size(limit)?;
        self.body
            .insert("from".to_string(), effective_offset(offset).into());
        Ok(())
    }

    /// Forwards the caller's sort field verbatim in the endpoint's format.
    fn sort(
        &mut self,
        sort_by: Option<&str>,
        sort_order: Option<SortOrder>,
    ) -> Result<(), ErrorDescriptor> {
        let field = match sort_by.map(str::trim) {
            Some("") => {
                return Err(ErrorDescriptor::invalid_argument("sort_by must not be empty"));
            }
            Some(field) => Some(field),
            None => self.endpoint.default_sort_field(),
        };
        let Some(field) = field else {
            if sort_order.is_some() {
                return Err(ErrorDescriptor::invalid_argument(
                    "sort_order requires sort_by for this endpoint",
                ));
            }
            return Ok(());
        };

        let order = sort_order.unwrap_or_default();
        match self.endpoint.sort_style() {
            SortStyle::FieldList => {
                let mut entry = Map::new();
                entry.insert(field.to_string(), order.into());
                self.body
                    .insert("sort".to_string(), Value::Array(vec![Value::Object(entry)]));
            }
            SortStyle::FieldAndOrder => {
                self.body.insert("sortField".to_string(), field.into());
                self.body.insert("sortOrder".to_string(), order.into());
            }
        }
        Ok(())
    }

    fn build(mut self) -> ApiRequest {
        if !self.filter.is_empty() {
            self.body
                .insert("filter".to_string(), Value::Object(self.filter));
        }
        ApiRequest {
            endpoint: self.endpoint.path().to_string(),
            body: Value::Object(self.body),
        }
    }
}

impl ToolRequest {
    /// Builds the outgoing request without sending it.
    ///
    /// Debug tools shape the request of their target.
    ///
    /// # Errors
    /// Returns `invalid_argument` when an argument fails validation.
    pub fn shape(&self) -> Result<ApiRequest, ErrorDescriptor> {
        match self {
            Self::SearchCompanies(args) => search_companies(args),
            Self::CompanyLookup(args) => company_lookup(args),
            Self::FundedCompanies(args) => funded_companies(args),
            Self::SearchCompaniesByName(args) => companies_by_name(args),
            Self::SearchTransactions(args) => transactions(args),
            Self::SearchInvestors(args) => investors(args),
            Self::SearchAcquisitions(args) => acquisitions(args),
            Self::SearchPracticeAreas(args) => taxonomy(Endpoint::PracticeAreas, args, false),
            Self::SearchFeeds(args) => feeds(args),
            Self::SearchBusinessModels(args) => taxonomy(Endpoint::BusinessModels, args, true),
            Self::DebugApiCall(debug) => debug.target.shape(),
            Self::DiagnoseApiRequest(diagnose) => diagnose.target.shape(),
        }
    }
}

impl DebugTarget {
    /// # Errors
    /// Returns `invalid_argument` when the target cannot be shaped.
    pub fn shape(&self) -> Result<ApiRequest, ErrorDescriptor> {
        match self {
            Self::Tool(request) => request.shape(),
            Self::Raw { endpoint, body } => raw(endpoint, body),
        }
    }
}

fn search_companies(args: &SearchCompaniesArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let mut builder = BodyBuilder::new(Endpoint::Companies);
    builder.list("feedName", Some(sector(args.sector.as_deref())?));
    builder.list("country", args.country.as_deref());
    builder.list("city", args.city.as_deref());
    if let Some(year) = &args.founded_year {
        builder.filter("foundedYear", json!([founded_year(year)?]));
    }
    builder.amount_range(
        "totalMoneyRaised",
        ("min_funding", args.min_funding.as_ref()),
        ("max_funding", args.max_funding.as_ref()),
    )?;
    builder.page(args.limit, args.from)?;
    builder.sort(args.sort_by.as_deref(), args.sort_order)?;
    Ok(builder.build())
}

fn company_lookup(args: &CompanyLookupArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let domains = normalize_domains("domain", &args.domain)?;
    let size = u32::try_from(domains.len()).map_or(MAX_RESULT_LIMIT, |count| {
        count.min(MAX_RESULT_LIMIT)
    });
    let mut builder = BodyBuilder::new(Endpoint::Companies);
    builder.values("domain", domains);
    builder.body.insert("size".to_string(), size.into());
    Ok(builder.build())
}

fn funded_companies(args: &FundedCompaniesArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let min = args
        .min_funding
        .clone()
        .unwrap_or_else(|| NumberArg::from(DEFAULT_MIN_FUNDING));
    let max = args
        .max_funding
        .clone()
        .unwrap_or_else(|| NumberArg::from(DEFAULT_MAX_FUNDING));

    let mut builder = BodyBuilder::new(Endpoint::Companies);
    builder.list("feedName", Some(sector(args.sector.as_deref())?));
    builder.amount_range(
        "totalMoneyRaised",
        ("min_funding", Some(&min)),
        ("max_funding", Some(&max)),
    )?;
    builder.list("country", args.country.as_deref());
    builder.page(args.limit, None)?;
    builder.sort(args.sort_by.as_deref(), args.sort_order)?;
    Ok(builder.build())
}

fn companies_by_name(args: &CompanyNameArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let name = args.company_name.trim();
    if name.is_empty() {
        return Err(ErrorDescriptor::invalid_argument("company_name is required"));
    }
    let mut builder = BodyBuilder::new(Endpoint::CompanyNameSearch);
    builder.filter("companyName", Value::from(name));
    if args.limit.is_some() {
        builder.size(args.limit)?;
    }
    Ok(builder.build())
}

fn transactions(args: &TransactionSearchArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let mut builder = BodyBuilder::new(Endpoint::Transactions);
    builder.list("feedName", args.sector.as_deref());
    builder.list("transactionFundingRoundCategory", args.round_type.as_deref());
    builder.date_range(
        "transactionFundingRoundDate",
        args.start_date.as_deref(),
        args.end_date.as_deref(),
    )?;
    builder.amount_range(
        "transactionFundingRoundAmount",
        ("min_amount", args.min_amount.as_ref()),
        ("max_amount", args.max_amount.as_ref()),
    )?;
    if let Some(investor) = &args.investor_domain {
        let domains = normalize_domains("investor_domain", investor)?;
        builder.filter(
            "transactionInvestor",
            json!({ "transactionInstitutionalInvestorDomain": domains }),
        );
    }
    builder.list("country", args.country.as_deref());
    builder.page(args.limit, args.offset)?;
    builder.sort(args.sort_by.as_deref(), args.sort_order)?;
    Ok(builder.build())
}

fn investors(args: &InvestorSearchArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let mut builder = BodyBuilder::new(Endpoint::Investors);
    builder.list("investorDomainName", args.investor_name.as_deref());
    builder.list("investorType", args.investor_type.as_deref());
    builder.list("investorCountry", args.investor_country.as_deref());
    builder.list("feedName", args.portfolio_sector.as_deref());
    if let Some(score) = &args.min_investment_score {
        let score = score.to_number("min_investment_score")?;
        if !score.as_f64().is_some_and(|value| (0.0..=100.0).contains(&value)) {
            return Err(ErrorDescriptor::invalid_argument(
                "min_investment_score must be between 0 and 100",
            ));
        }
        builder.range("tracxnInvestmentScore", Some(Value::Number(score)), None);
    }
    builder.page(args.limit, args.offset)?;
    builder.sort(args.sort_by.as_deref(), args.sort_order)?;
    Ok(builder.build())
}

fn acquisitions(args: &AcquisitionSearchArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let mut builder = BodyBuilder::new(Endpoint::AcquisitionTransactions);
    builder.list("acquisitionType", args.acquisition_type.as_deref());
    builder.date_range(
        "announcementDate",
        args.start_date.as_deref(),
        args.end_date.as_deref(),
    )?;
    if let Some(acquirer) = &args.acquirer_domain {
        builder.values(
            "acquirerListDomain",
            normalize_domains("acquirer_domain", acquirer)?,
        );
    }
    builder.list("feedName", args.sector.as_deref());
    builder.amount_range(
        "acquisitionAmount",
        ("min_amount", args.min_amount.as_ref()),
        ("max_amount", args.max_amount.as_ref()),
    )?;
    builder.list("country", args.country.as_deref());
    builder.page(args.limit, args.offset)?;
    builder.sort(args.sort_by.as_deref(), args.sort_order)?;
    Ok(builder.build())
}

fn taxonomy(
    endpoint: Endpoint,
    args: &TaxonomySearchArgs,
    require_filter: bool,
) -> Result<ApiRequest, ErrorDescriptor> {
    let mut builder = BodyBuilder::new(endpoint);
    builder.list("name", args.name.as_deref());
    if let Some(ids) = &args.id {
        builder.values("id", ids.clone().into_vec());
    }
    if require_filter && builder.filter.is_empty() {
        return Err(ErrorDescriptor::invalid_argument(
            "at least one of name or id is required",
        ));
    }
    builder.page(args.limit, args.offset)?;
    Ok(builder.build())
}

fn feeds(args: &FeedSearchArgs) -> Result<ApiRequest, ErrorDescriptor> {
    let mut builder = BodyBuilder::new(Endpoint::Feeds);
    builder.list("name", args.name.as_deref());
    builder.list("primaryGeography", args.primary_geography.as_deref());
    if let Some(ids) = &args.id {
        builder.values("id", ids.clone().into_vec());
    }
    builder.page(args.limit, args.offset)?;
    Ok(builder.build())
}

fn raw(endpoint: &str, body: &Value) -> Result<ApiRequest, ErrorDescriptor> {
    let path = endpoint.trim().trim_matches('/');
    let valid = !path.is_empty()
        && !path.contains("..")
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-'));
    if !valid {
        return Err(ErrorDescriptor::invalid_argument(format!(
            "endpoint must be a relative API path, got {endpoint:?}"
        )));
    }
    let Value::Object(fields) = body else {
        return Err(ErrorDescriptor::invalid_argument(
            "request data must be a JSON object",
        ));
    };

    let mut fields = fields.clone();
    if let Some(size) = fields.get("size") {
        let size = raw_size(size)?;
        fields.insert("size".to_string(), Value::Number(Number::from(size)));
    }
    Ok(ApiRequest {
        endpoint: path.to_string(),
        body: Value::Object(fields),
    })
}

/// A raw `size` may be any JSON number or numeric string; it is sent as an integer
/// no greater than [`MAX_RESULT_LIMIT`].
fn raw_size(size: &Value) -> Result<u32, ErrorDescriptor> {
    let requested = match size {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
    .ok_or_else(|| ErrorDescriptor::invalid_argument(format!("size must be numeric, got {size}")))?;

    if requested > f64::from(MAX_RESULT_LIMIT) {
        return Ok(MAX_RESULT_LIMIT);
    }
    let requested = whole(requested).ok_or_else(|| {
        ErrorDescriptor::invalid_argument(format!("size must be a whole number, got {size}"))
    })?;
    effective_limit(Some(requested))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::tools::ToolName;

    fn shape(tool: ToolName, arguments: Value) -> Result<ApiRequest, ErrorDescriptor> {
        ToolRequest::from_arguments(tool, arguments)?.shape()
    }

    #[test]
    fn every_paged_tool_caps_the_limit() {
        let cases = [
            (ToolName::SearchCompanies, json!({ "limit": 500 })),
            (ToolName::FundedCompanies, json!({ "limit": 21 })),
            (ToolName::SearchCompaniesByName, json!({ "company_name": "Apple", "limit": 50 })),
            (ToolName::SearchTransactions, json!({ "limit": 100 })),
            (ToolName::SearchInvestors, json!({ "limit": 100 })),
            (ToolName::SearchAcquisitions, json!({ "limit": 100 })),
            (ToolName::SearchPracticeAreas, json!({ "limit": 100 })),
            (ToolName::SearchFeeds, json!({ "limit": 100 })),
            (ToolName::SearchBusinessModels, json!({ "name": "SaaS", "limit": 100 })),
            (
                ToolName::DebugApiCall,
                json!({ "endpoint": "feeds", "data": { "size": 99 } }),
            ),
            (
                ToolName::DebugApiCall,
                json!({ "endpoint": "feeds", "data": { "size": 50.0 } }),
            ),
            (
                ToolName::DebugApiCall,
                json!({ "endpoint": "feeds", "data": { "size": "100" } }),
            ),
            (
                ToolName::DebugApiCall,
                json!({ "endpoint": "feeds", "data": { "size": 1e9 } }),
            ),
        ];
        for (tool, arguments) in cases {
            let request = shape(tool, arguments).expect("valid arguments");
            assert_eq!(request.body["size"], 20, "{tool}");
        }
    }

    #[test]
    fn raw_size_is_sent_as_an_integer() {
        for size in [json!(3), json!(3.0), json!("3"), json!(" 3 ")] {
            let request = shape(
                ToolName::DebugApiCall,
                json!({ "endpoint": "feeds", "data": { "size": size } }),
            )
            .expect("small size");
            assert_eq!(request.body["size"], json!(3), "{size}");
        }

        for size in [json!(2.5), json!("ten"), json!(0), json!(-4), json!(true), json!([5])] {
            let err = shape(
                ToolName::DebugApiCall,
                json!({ "endpoint": "feeds", "data": { "size": size } }),
            )
            .expect_err("bad size");
            assert_eq!(err.kind, ErrorKind::InvalidArgument, "{size}");
        }
    }

    #[test]
    fn founded_year_accepts_whole_floats() {
        for year in [json!(2020), json!(2020.0), json!("2020"), json!("2020.0")] {
            let request = shape(ToolName::SearchCompanies, json!({ "founded_year": year }))
                .expect("whole year");
            assert_eq!(request.body["filter"]["foundedYear"], json!(["2020"]), "{year}");
        }

        for year in [json!(2020.5), json!(99), json!("next year")] {
            let err = shape(ToolName::SearchCompanies, json!({ "founded_year": year }))
                .expect_err("bad year");
            assert_eq!(err.kind, ErrorKind::InvalidArgument, "{year}");
        }
    }

    #[test]
    fn limit_defaults_to_five_and_rejects_zero() {
        let request = shape(ToolName::SearchFeeds, json!({})).expect("defaults");
        assert_eq!(request.body["size"], 5);
        assert_eq!(request.body["from"], 0);

        let err = shape(ToolName::SearchFeeds, json!({ "limit": 0 })).expect_err("zero limit");
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn negative_offset_is_first_page() {
        let request =
            shape(ToolName::SearchInvestors, json!({ "offset": -10 })).expect("clamped offset");
        assert_eq!(request.body["from"], 0);
    }

    #[test]
    fn domain_string_and_list_shape_identically() {
        let single = shape(ToolName::CompanyLookup, json!({ "domain": "https://www.CrowdStrike.com/" }))
            .expect("single domain");
        let list = shape(ToolName::CompanyLookup, json!({ "domain": ["crowdstrike.com"] }))
            .expect("domain list");
        assert_eq!(single, list);
        assert_eq!(
            single.body,
            json!({ "filter": { "domain": ["crowdstrike.com"] }, "size": 1 })
        );
    }

    #[test]
    fn blank_domain_is_rejected() {
        let err = shape(ToolName::CompanyLookup, json!({ "domain": "  " })).expect_err("blank");
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn company_search_uses_sort_list() {
        let request = shape(
            ToolName::SearchCompanies,
            json!({
                "sector": "Fintech",
                "country": "United States",
                "founded_year": "2020",
                "min_funding": 1_000_000,
                "max_funding": "5000000",
                "sort_by": "totalMoneyRaised",
                "sort_order": "asc",
                "limit": 10,
                "from": 20
            }),
        )
        .expect("valid search");
        assert_eq!(
            request.body,
            json!({
                "filter": {
                    "feedName": ["Fintech"],
                    "country": ["United States"],
                    "foundedYear": ["2020"],
                    "totalMoneyRaised": { "min": 1_000_000, "max": 5_000_000 }
                },
                "size": 10,
                "from": 20,
                "sort": [{ "totalMoneyRaised": "asc" }]
            })
        );
        assert_eq!(request.endpoint, "companies");
    }

    #[test]
    fn empty_or_missing_sort_field_is_rejected() {
        let blank = shape(ToolName::SearchCompanies, json!({ "sort_by": "  " }))
            .expect_err("blank sort field");
        assert_eq!(blank.kind, ErrorKind::InvalidArgument);

        let missing = shape(ToolName::SearchCompanies, json!({ "sort_order": "asc" }))
            .expect_err("order without field");
        assert_eq!(missing.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn transactions_use_sort_field_with_default() {
        let request = shape(
            ToolName::SearchTransactions,
            json!({
                "round_type": "Series A",
                "start_date": "01/01/2024",
                "end_date": "2024-06-30",
                "investor_domain": "sequoiacap.com"
            }),
        )
        .expect("valid transaction search");
        assert_eq!(request.endpoint, "transactions");
        assert_eq!(request.body["sortField"], "transactionFundingRoundDate");
        assert_eq!(request.body["sortOrder"], "desc");
        assert_eq!(
            request.body["filter"]["transactionFundingRoundDate"],
            json!({ "min": "01/01/2024", "max": "2024-06-30" })
        );
        assert_eq!(
            request.body["filter"]["transactionInvestor"],
            json!({ "transactionInstitutionalInvestorDomain": ["sequoiacap.com"] })
        );
        assert!(request.body.get("sort").is_none());
    }

    #[test]
    fn malformed_ranges_fail_fast() {
        let bad_date = shape(ToolName::SearchAcquisitions, json!({ "start_date": "last week" }))
            .expect_err("bad date");
        assert_eq!(bad_date.kind, ErrorKind::InvalidArgument);

        let inverted = shape(
            ToolName::SearchAcquisitions,
            json!({ "start_date": "2024-05-01", "end_date": "2024-01-01" }),
        )
        .expect_err("inverted dates");
        assert_eq!(inverted.kind, ErrorKind::InvalidArgument);

        let bad_amount = shape(ToolName::SearchTransactions, json!({ "min_amount": "lots" }))
            .expect_err("bad amount");
        assert_eq!(bad_amount.kind, ErrorKind::InvalidArgument);

        let inverted_amount = shape(
            ToolName::FundedCompanies,
            json!({ "min_funding": 50, "max_funding": 10 }),
        )
        .expect_err("inverted amounts");
        assert_eq!(inverted_amount.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn funded_companies_apply_default_range() {
        let request = shape(ToolName::FundedCompanies, json!({})).expect("defaults");
        assert_eq!(
            request.body["filter"]["totalMoneyRaised"],
            json!({ "min": 10_000_000, "max": 100_000_000 })
        );
        assert_eq!(request.body["filter"]["feedName"], json!(["Cybersecurity"]));
    }

    #[test]
    fn name_search_sends_plain_string() {
        let request = shape(ToolName::SearchCompaniesByName, json!({ "company_name": " Apple " }))
            .expect("name search");
        assert_eq!(request.endpoint, "companies/search");
        assert_eq!(request.body, json!({ "filter": { "companyName": "Apple" } }));
    }

    #[test]
    fn business_models_need_a_filter() {
        let err = shape(ToolName::SearchBusinessModels, json!({ "limit": 3 }))
            .expect_err("no filter");
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let request = shape(ToolName::SearchBusinessModels, json!({ "id": "bm-1" }))
            .expect("id filter");
        assert_eq!(request.body["filter"]["id"], json!(["bm-1"]));
    }

    #[test]
    fn investor_score_must_be_a_percentage() {
        let err = shape(ToolName::SearchInvestors, json!({ "min_investment_score": 120 }))
            .expect_err("out of range");
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let request = shape(ToolName::SearchInvestors, json!({ "min_investment_score": 70 }))
            .expect("in range");
        assert_eq!(request.body["filter"]["tracxnInvestmentScore"], json!({ "min": 70 }));
    }

    #[test]
    fn raw_endpoints_must_be_relative() {
        for endpoint in ["https://evil.example/x", "../admin", "companies?x=1"] {
            let err = shape(ToolName::DebugApiCall, json!({ "endpoint": endpoint }))
                .expect_err("rejected endpoint");
            assert_eq!(err.kind, ErrorKind::InvalidArgument, "{endpoint}");
        }
    }
}
