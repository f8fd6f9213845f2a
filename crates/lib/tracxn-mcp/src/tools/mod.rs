//! MCP tool modules.
//!
//! Tools are grouped by the Tracxn resource they query: companies, deals
//! (transactions, investors, acquisitions), taxonomy lookups, and request
//! debugging. Parameter structs only describe the schema; validation happens
//! in `tracxn-core` so every entry point shapes requests identically.

pub mod companies;
pub mod deals;
pub mod debug;
pub mod taxonomy;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// A single value or a list of values.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

/// A number, or a string holding one.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum NumberOrString {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrderParam {
    Asc,
    Desc,
}
