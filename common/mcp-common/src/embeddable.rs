//! Embeddable MCP trait for in-process execution
//!
//! Lets a host (or a test) call a server's tools directly, without spawning
//! the binary and speaking JSON-RPC over stdio.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let server = OrganizerMcpServer::with_config(config)?;
//! let result = server
//!     .call_tool("list_directory", serde_json::json!({ "path": "~/Downloads" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Parameters could not be decoded into the tool's input type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool ran and reported an MCP error
    #[error("mcp error: {}", .0.message)]
    Mcp(rmcp::ErrorData),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::Mcp(err)
    }
}

impl EmbeddableError {
    /// The underlying MCP error, when the tool itself failed
    pub fn mcp_error(&self) -> Option<&rmcp::ErrorData> {
        match self {
            EmbeddableError::Mcp(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// Servers using `#[tool_router]` implement this by listing their router's
/// tools and dispatching `call_tool` by name to the same methods the router
/// calls.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name, matching the name used in MCP configuration files
    fn server_name(&self) -> &str;

    /// All available tools with their input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name with JSON parameters
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }

    /// Sorted tool names, handy for discovery output
    fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .list_tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers `ping` and nothing else
    struct PingServer;

    #[async_trait]
    impl EmbeddableMcp for PingServer {
        fn server_name(&self) -> &str {
            "ping"
        }

        fn list_tools(&self) -> Vec<Tool> {
            Vec::new()
        }

        async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
            match name {
                "ping" => {
                    let payload: std::collections::HashMap<String, String> =
                        serde_json::from_value(params)?;
                    Ok(CallToolResult::success(vec![rmcp::model::Content::text(format!(
                        "pong {}",
                        payload.len()
                    ))]))
                }
                _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
            }
        }
    }

    #[test]
    fn test_provided_methods() {
        let server = PingServer;
        assert!(server.server_description().is_none());
        assert!(server.tool_names().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_and_errors() {
        let server = PingServer;

        let ok = server.call_tool("ping", serde_json::json!({ "a": "b" })).await;
        assert!(ok.is_ok());

        let bad = server.call_tool("ping", serde_json::json!([1, 2])).await;
        assert!(matches!(bad, Err(EmbeddableError::InvalidParams(_))));

        let missing = server.call_tool("pong", serde_json::json!({})).await;
        assert!(matches!(missing, Err(EmbeddableError::ToolNotFound(_))));
    }

    #[test]
    fn test_mcp_error_accessor() {
        let err: EmbeddableError = rmcp::ErrorData::invalid_request("nope", None).into();
        assert_eq!(err.mcp_error().map(|e| e.message.to_string()), Some("nope".to_string()));
        assert!(err.to_string().contains("nope"));
    }
}
