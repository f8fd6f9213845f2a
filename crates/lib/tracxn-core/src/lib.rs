//! Core of the Tracxn MCP adapter.
//!
//! A tool call flows through three stages:
//! - [`tools`] parses the tool name and arguments into a [`ToolRequest`],
//! - [`shape`] turns it into the exact endpoint path and JSON body,
//! - [`adapter`] sends it through a [`Transport`] and normalizes the response
//!   or failure into an [`ErrorDescriptor`].
//!
//! Nothing here knows about MCP; the protocol layer lives in `tracxn-mcp`.

pub mod adapter;
pub mod args;
pub mod config;
pub mod diagnose;
pub mod error;
pub mod shape;
pub mod tools;
pub mod transport;

pub use adapter::{RequestDescriptor, TracxnAdapter};
pub use config::{ApiEnvironment, EndpointConfig, MAX_RESULT_LIMIT};
pub use error::{ErrorDescriptor, ErrorKind, ToolResult};
pub use shape::ApiRequest;
pub use tools::{ToolName, ToolRequest};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};
