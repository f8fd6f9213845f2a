//! Error taxonomy returned by every tool invocation.
//!
//! Remote HTTP statuses, transport failures, and local validation failures all
//! collapse into a single [`ErrorDescriptor`] at the adapter boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single tool invocation.
pub type ToolResult = Result<Value, ErrorDescriptor>;

/// Normalized error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    AuthFailure,
    Forbidden,
    NotFound,
    RateLimited,
    UpstreamFailure,
    UnexpectedStatus,
    Transport,
    InvalidArgument,
    Cancelled,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::AuthFailure => "auth_failure",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::UpstreamFailure => "upstream_failure",
            Self::UnexpectedStatus => "unexpected_status",
            Self::Transport => "transport",
            Self::InvalidArgument => "invalid_argument",
            Self::Cancelled => "cancelled",
        }
    }

    /// Classifies an HTTP status code. Success statuses return `None`.
    #[must_use]
    pub const fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(Self::BadRequest),
            401 => Some(Self::AuthFailure),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            429 => Some(Self::RateLimited),
            500..=599 => Some(Self::UpstreamFailure),
            _ => Some(Self::UnexpectedStatus),
        }
    }

    const fn summary(self) -> &'static str {
        match self {
            Self::BadRequest => "request rejected as malformed",
            Self::AuthFailure => "access token missing or invalid",
            Self::Forbidden => "access denied for this query or credit limit exceeded",
            Self::NotFound => "no matching entity",
            Self::RateLimited => "rate limit exceeded; back off before retrying",
            Self::UpstreamFailure => "remote server error",
            Self::UnexpectedStatus => "unexpected response status",
            Self::Transport => "transport failure",
            Self::InvalidArgument => "invalid argument",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error record handed back to callers instead of raw failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ErrorDescriptor {
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
}

impl ErrorDescriptor {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            http_status: None,
            message: message.into(),
            raw_body: None,
        }
    }

    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "tool call cancelled before a response arrived")
    }

    /// Builds a descriptor for a non-success HTTP status.
    ///
    /// Returns `None` when the status is a success.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Option<Self> {
        let kind = ErrorKind::from_status(status)?;
        let message = remote_message(body).map_or_else(
            || format!("{} (status {status})", kind.summary()),
            |remote| format!("{} (status {status}): {remote}", kind.summary()),
        );
        Some(Self {
            kind,
            http_status: Some(status),
            message,
            raw_body: non_empty(body),
        })
    }

    /// A success status whose body could not be decoded as JSON.
    #[must_use]
    pub fn undecodable(status: u16, body: &str, err: &serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::UpstreamFailure,
            http_status: Some(status),
            message: format!("response body is not valid JSON: {err}"),
            raw_body: non_empty(body),
        }
    }
}

fn remote_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "errorMessage"]
        .iter()
        .find_map(|key| value.get(*key))
        .and_then(|message| match message {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
}

fn non_empty(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}
