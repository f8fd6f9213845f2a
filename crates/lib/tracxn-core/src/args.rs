//! Argument value types shared across tools.
//!
//! These accept the loose shapes model hosts tend to send (a string where a
//! list is expected, a numeric string where a number is expected) and are
//! validated later during request shaping.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::ErrorDescriptor;

/// A single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flattens to a list, dropping blank entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        let values = match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        };
        values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// A JSON number, or a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberArg {
    Number(Number),
    Text(String),
}

impl NumberArg {
    /// Validates the value and returns it as a JSON number.
    ///
    /// # Errors
    /// Returns `invalid_argument` when the value is not numeric.
    pub fn to_number(&self, field: &str) -> Result<Number, ErrorDescriptor> {
        match self {
            Self::Number(number) => Ok(number.clone()),
            Self::Text(text) => parse_number(text.trim()).ok_or_else(|| {
                ErrorDescriptor::invalid_argument(format!("{field} must be numeric, got {text:?}"))
            }),
        }
    }

    /// Validates a non-negative amount.
    ///
    /// # Errors
    /// Returns `invalid_argument` when the value is not numeric or is negative.
    pub fn to_amount(&self, field: &str) -> Result<Number, ErrorDescriptor> {
        let number = self.to_number(field)?;
        if number.as_f64().is_some_and(|value| value < 0.0) {
            return Err(ErrorDescriptor::invalid_argument(format!(
                "{field} must not be negative"
            )));
        }
        Ok(number)
    }
}

impl From<i64> for NumberArg {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(integer.into());
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .and_then(Number::from_f64)
}

/// Sort direction accepted by every sortable endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl From<SortOrder> for Value {
    fn from(order: SortOrder) -> Self {
        Self::String(order.as_str().to_string())
    }
}
