//! The API adapter: shapes a tool request, sends it, and normalizes the outcome.

use std::collections::BTreeMap;
use std::future::{Future, pending};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{Instrument, Span, debug, error, field, info, info_span, warn};
use uuid::Uuid;

use crate::config::{EndpointConfig, mask_token};
use crate::diagnose::{self, Variation};
use crate::shape::ApiRequest;
use crate::tools::{DebugRequest, DiagnoseRequest, ToolName, ToolRequest};
use crate::transport::{
    ACCESS_TOKEN_HEADER,
    HttpRequest,
    HttpResponse,
    HttpTransport,
    Transport,
    TransportError,
};
use crate::{ErrorDescriptor, ErrorKind, ToolResult};

/// What the debug tools echo back: the outgoing request with the token masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl From<&HttpRequest> for RequestDescriptor {
    fn from(request: &HttpRequest) -> Self {
        let headers = request
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if name.eq_ignore_ascii_case(ACCESS_TOKEN_HEADER) {
                    mask_token(value)
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect();
        Self {
            method: request.method.clone(),
            url: request.url.clone(),
            headers,
            body: request.body.clone(),
        }
    }
}

/// One request/response exchange as reported by the debug tools.
struct Exchange {
    status: Option<u16>,
    headers: BTreeMap<String, String>,
    result: ToolResult,
}

impl Exchange {
    fn failed_kind(&self) -> Option<ErrorKind> {
        self.result.as_ref().err().map(|err| err.kind)
    }

    fn into_json(self) -> Value {
        let mut report = Map::new();
        if let Some(status) = self.status {
            report.insert("status".to_string(), status.into());
            report.insert("headers".to_string(), json!(self.headers));
        }
        match self.result {
            Ok(body) => {
                report.insert("body".to_string(), body);
            }
            Err(err) => {
                report.insert("error".to_string(), json!(err));
            }
        }
        Value::Object(report)
    }
}

/// Translates tool invocations into Tracxn HTTP requests.
///
/// Holds only read-only state; share it behind an `Arc` across concurrent calls.
#[derive(Debug)]
pub struct TracxnAdapter<T: Transport = HttpTransport> {
    config: Arc<EndpointConfig>,
    transport: T,
}

impl TracxnAdapter<HttpTransport> {
    /// Builds an adapter backed by a pooled reqwest client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: EndpointConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> TracxnAdapter<T> {
    pub fn with_transport(config: EndpointConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Invokes a tool by name with loosely-typed arguments.
    ///
    /// # Errors
    /// Returns an [`ErrorDescriptor`] for unknown tools, invalid arguments,
    /// remote error statuses, and transport failures.
    pub async fn invoke(&self, tool: &str, arguments: Value) -> ToolResult {
        let request = tool
            .parse::<ToolName>()
            .and_then(|tool| ToolRequest::from_arguments(tool, arguments))
            .inspect_err(|err| warn!(tool, error = %err, "rejected tool call"))?;
        self.call(request).await
    }

    /// # Errors
    /// See [`TracxnAdapter::invoke`].
    pub async fn call(&self, request: ToolRequest) -> ToolResult {
        self.call_until(request, pending::<()>()).await
    }

    /// Runs the request until it completes or `cancelled` resolves.
    ///
    /// Cancellation drops the in-flight HTTP request.
    ///
    /// # Errors
    /// See [`TracxnAdapter::invoke`]; cancellation yields `cancelled`.
    pub async fn call_until<F>(&self, request: ToolRequest, cancelled: F) -> ToolResult
    where
        F: Future<Output = ()> + Send,
    {
        let request_id = Uuid::new_v4();
        let tool = request.tool_name();
        let span = info_span!(
            "tool_call",
            %request_id,
            tool = tool.as_str(),
            endpoint = field::Empty
        );

        async move {
            info!("tool call started");
            let outcome = tokio::select! {
                biased;
                () = cancelled => Err(ErrorDescriptor::cancelled()),
                result = self.dispatch(request) => result,
            };
            match &outcome {
                Ok(_) => info!("tool call finished"),
                Err(err) => info!(kind = %err.kind, status = ?err.http_status, "tool call failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, request: ToolRequest) -> ToolResult {
        match request {
            ToolRequest::DebugApiCall(debug) => self.debug(debug).await,
            ToolRequest::DiagnoseApiRequest(request) => self.diagnose(request).await,
            request => {
                let shaped = shape_in_span(request.shape())?;
                let http = self.http_request(&shaped);
                let response = self.exchange(&http).await.map_err(|err| {
                    error!(endpoint = %shaped.endpoint, error = %err, "transport failure");
                    ErrorDescriptor::transport(err.to_string())
                })?;
                decode(&response)
            }
        }
    }

    /// Builds the transport request for a shaped request.
    #[must_use]
    pub fn http_request(&self, request: &ApiRequest) -> HttpRequest {
        HttpRequest {
            method: "POST".to_string(),
            url: self.config.url_for(&request.endpoint),
            headers: vec![
                (
                    ACCESS_TOKEN_HEADER.to_string(),
                    self.config.access_token().to_string(),
                ),
                ("cache-control".to_string(), "no-cache".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: request.body.clone(),
        }
    }

    /// Describes what `request` would send, without sending it.
    ///
    /// # Errors
    /// Returns `invalid_argument` when the request cannot be shaped.
    pub fn describe(&self, request: &ToolRequest) -> Result<RequestDescriptor, ErrorDescriptor> {
        let shaped = request.shape()?;
        Ok(RequestDescriptor::from(&self.http_request(&shaped)))
    }

    async fn exchange(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(
            url = %request.url,
            token = %self.config.masked_token(),
            body = %request.body,
            "sending request"
        );
        tokio::time::timeout(self.config.timeout(), self.transport.send(request))
            .await
            .unwrap_or(Err(TransportError::Timeout))
    }

    async fn send_and_report(&self, request: &HttpRequest) -> Exchange {
        match self.exchange(request).await {
            Ok(response) => Exchange {
                status: Some(response.status),
                headers: response.headers.iter().cloned().collect(),
                result: decode(&response),
            },
            Err(err) => {
                error!(url = %request.url, error = %err, "transport failure");
                Exchange {
                    status: None,
                    headers: BTreeMap::new(),
                    result: Err(ErrorDescriptor::transport(err.to_string())),
                }
            }
        }
    }

    async fn debug(&self, debug: DebugRequest) -> ToolResult {
        let shaped = shape_in_span(debug.target.shape())?;
        let http = self.http_request(&shaped);

        let mut report = Map::new();
        report.insert("request".to_string(), json!(RequestDescriptor::from(&http)));
        if debug.dispatch {
            report.insert("response".to_string(), self.send_and_report(&http).await.into_json());
        }
        Ok(Value::Object(report))
    }

    async fn diagnose(&self, request: DiagnoseRequest) -> ToolResult {
        let shaped = shape_in_span(request.target.shape())?;
        let http = self.http_request(&shaped);
        let outcome = self.send_and_report(&http).await;
        let failed = outcome.failed_kind();

        let mut report = Map::new();
        report.insert("request".to_string(), json!(RequestDescriptor::from(&http)));
        report.insert("response".to_string(), outcome.into_json());

        let Some(kind) = failed else {
            report.insert("diagnosis".to_string(), json!("request accepted"));
            return Ok(Value::Object(report));
        };
        report.insert("diagnosis".to_string(), json!(diagnose::hint(kind)));

        let candidates = if diagnose::worth_varying(kind) {
            diagnose::variations(&shaped)
        } else {
            Vec::new()
        };
        let mut variations = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            variations.push(self.try_variation(candidate, request.probe_variations).await);
        }
        report.insert("variations".to_string(), Value::Array(variations));
        Ok(Value::Object(report))
    }

    async fn try_variation(&self, variation: Variation, send: bool) -> Value {
        let http = self.http_request(&variation.request);
        let mut entry = Map::new();
        entry.insert("description".to_string(), json!(variation.description));
        entry.insert("request".to_string(), json!(RequestDescriptor::from(&http)));
        if send {
            info!(description = variation.description, "sending variation");
            entry.insert("response".to_string(), self.send_and_report(&http).await.into_json());
        }
        Value::Object(entry)
    }
}

/// Records the shaped endpoint on the current `tool_call` span.
fn shape_in_span(
    shaped: Result<ApiRequest, ErrorDescriptor>,
) -> Result<ApiRequest, ErrorDescriptor> {
    if let Ok(request) = &shaped {
        Span::current().record("endpoint", request.endpoint.as_str());
    }
    shaped
}

/// Normalizes a response: 2xx bodies pass through, everything else is an error.
///
/// # Errors
/// Returns the descriptor for a non-2xx status or an undecodable 2xx body.
pub fn decode(response: &HttpResponse) -> ToolResult {
    if let Some(err) = ErrorDescriptor::from_status(response.status, &response.body) {
        warn!(status = response.status, kind = %err.kind, "remote error status");
        return Err(err);
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body)
        .map_err(|err| ErrorDescriptor::undecodable(response.status, &response.body, &err))
}
