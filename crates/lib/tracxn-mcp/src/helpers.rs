use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use serde::Serialize;
use serde_json::Value;
use tracxn_core::ToolResult;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Serializes tool parameters into the loose argument map the adapter parses.
///
/// Absent optional parameters are dropped rather than sent as `null`.
pub fn to_arguments<P: Serialize>(params: &P) -> Result<Value, ErrorData> {
    let mut value = serde_json::to_value(params).map_err(|err| {
        mcp_err(
            ErrorCode::INTERNAL_ERROR,
            format!("failed to encode tool parameters: {err}"),
        )
    })?;
    if let Value::Object(fields) = &mut value {
        fields.retain(|_, field| !field.is_null());
    }
    Ok(value)
}

/// Domain failures become error results the model can read, not protocol errors.
pub fn tool_result(result: ToolResult) -> Result<CallToolResult, ErrorData> {
    match result {
        Ok(payload) => Ok(CallToolResult::success(vec![Content::json(payload)?])),
        Err(err) => Ok(CallToolResult::error(vec![Content::json(err)?])),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracxn_core::ErrorDescriptor;

    use super::*;
    use crate::tools::companies::SearchCompaniesParams;

    #[test]
    fn absent_parameters_are_omitted() {
        let params = SearchCompaniesParams {
            sector: Some("Fintech".to_string()),
            limit: Some(3),
            ..SearchCompaniesParams::default()
        };
        let value = to_arguments(&params).expect("params encode");
        assert_eq!(value, json!({ "sector": "Fintech", "limit": 3 }));
    }

    #[test]
    fn adapter_errors_are_error_results() {
        let result = tool_result(Err(ErrorDescriptor::invalid_argument("limit must be at least 1")))
            .expect("still a tool result");
        assert_eq!(result.is_error, Some(true));

        let result = tool_result(Ok(json!({ "result": [] }))).expect("success result");
        assert_eq!(result.is_error, Some(false));
    }
}
