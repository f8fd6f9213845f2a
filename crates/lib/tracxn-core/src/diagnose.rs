//! Request-shape variations suggested after a rejected request.
//!
//! Tracxn endpoints disagree on how sorting and domain filters are spelled.
//! When a request comes back `bad_request` or `not_found`, these rewrites are
//! the alternatives most likely to be accepted.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::ErrorKind;
use crate::shape::ApiRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    pub description: &'static str,
    pub request: ApiRequest,
}

/// Whether a failure is worth exploring with variations.
#[must_use]
pub const fn worth_varying(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::BadRequest | ErrorKind::NotFound)
}

/// Short guidance for a failure kind.
#[must_use]
pub const fn hint(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::BadRequest => {
            "the endpoint rejected the body; check filter field names and the sort format"
        }
        ErrorKind::AuthFailure => "check TRACXN_ACCESS_TOKEN and the playground/production setting",
        ErrorKind::Forbidden => {
            "the token lacks access to this data or the credit limit is exhausted"
        }
        ErrorKind::NotFound => "no entity matched; check the endpoint path and identifiers",
        ErrorKind::RateLimited => "wait before sending more requests",
        ErrorKind::UpstreamFailure => "the API failed on its side; retry later",
        ErrorKind::UnexpectedStatus => "the API returned a status outside the documented set",
        ErrorKind::Transport => "the API could not be reached; check network access and the base URL",
        ErrorKind::InvalidArgument => "the request was rejected locally before sending",
        ErrorKind::Cancelled => "the call was cancelled",
    }
}

/// Alternative spellings of `request`, in the order they are tried.
#[must_use]
pub fn variations(request: &ApiRequest) -> Vec<Variation> {
    let Value::Object(body) = &request.body else {
        return Vec::new();
    };

    let mut found = Vec::new();
    if let Some(rewritten) = sort_list_to_fields(body) {
        found.push(variation(
            request,
            rewritten,
            "converted 'sort' list to 'sortField' and 'sortOrder'",
        ));
    } else if let Some(rewritten) = sort_fields_to_list(body) {
        found.push(variation(
            request,
            rewritten,
            "converted 'sortField' and 'sortOrder' to a 'sort' list",
        ));
    }
    if let Some((rewritten, description)) = flip_domain(body) {
        found.push(variation(request, rewritten, description));
    }
    found
}

fn variation(request: &ApiRequest, body: Map<String, Value>, description: &'static str) -> Variation {
    Variation {
        description,
        request: ApiRequest {
            endpoint: request.endpoint.clone(),
            body: Value::Object(body),
        },
    }
}

fn sort_list_to_fields(body: &Map<String, Value>) -> Option<Map<String, Value>> {
    if body.contains_key("sortField") {
        return None;
    }
    let sort = body.get("sort")?.as_array()?;
    let (field, order) = sort
        .first()
        .and_then(Value::as_object)
        .and_then(|entry| entry.iter().next())?;

    let mut rewritten = body.clone();
    rewritten.remove("sort");
    rewritten.insert("sortField".to_string(), Value::String(field.clone()));
    rewritten.insert(
        "sortOrder".to_string(),
        order.as_str().map_or_else(|| order.clone(), Value::from),
    );
    Some(rewritten)
}

fn sort_fields_to_list(body: &Map<String, Value>) -> Option<Map<String, Value>> {
    if body.contains_key("sort") {
        return None;
    }
    let field = body.get("sortField")?.as_str()?;
    let order = body
        .get("sortOrder")
        .cloned()
        .unwrap_or_else(|| Value::from("desc"));

    let mut entry = Map::new();
    entry.insert(field.to_string(), order);
    let mut rewritten = body.clone();
    rewritten.remove("sortField");
    rewritten.remove("sortOrder");
    rewritten.insert("sort".to_string(), Value::Array(vec![Value::Object(entry)]));
    Some(rewritten)
}

fn flip_domain(body: &Map<String, Value>) -> Option<(Map<String, Value>, &'static str)> {
    let domain = body.get("filter")?.get("domain")?;
    let (flipped, description) = match domain {
        Value::Array(values) => (
            values.first().cloned().unwrap_or_else(|| Value::from("")),
            "converted 'domain' from list to string",
        ),
        other => (
            Value::Array(vec![other.clone()]),
            "converted 'domain' from string to list",
        ),
    };

    let mut rewritten = body.clone();
    if let Some(Value::Object(filter)) = rewritten.get_mut("filter") {
        filter.insert("domain".to_string(), flipped);
    }
    Some((rewritten, description))
}
