//! Error constructors for MCP servers
//!
//! Tool failures are reported as `ErrorData` so a single bad call never takes
//! the server down. Each constructor accepts an optional structured `data`
//! payload that clients can inspect instead of parsing the message.

use rmcp::ErrorData as McpError;
use serde_json::Value;

/// Create an internal error (filesystem failures, serialization, ...)
pub fn internal_error(message: impl Into<String>, data: Option<Value>) -> McpError {
    McpError::internal_error(message.into(), data)
}

/// Create an invalid params error
///
/// Use this when the tool receives malformed input.
pub fn invalid_params(message: impl Into<String>, data: Option<Value>) -> McpError {
    McpError::invalid_params(message.into(), data)
}

/// Create an invalid request error
///
/// Use this when the input is well-formed but the request is refused,
/// e.g. it targets something the server is not allowed to touch.
pub fn invalid_request(message: impl Into<String>, data: Option<Value>) -> McpError {
    McpError::invalid_request(message.into(), data)
}
