//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`] for server startup
//! - **Results**: builders for `CallToolResult` payloads
//! - **Errors**: constructors for MCP errors with structured data
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{init_tracing, serve_stdio, summary_success};
//!
//! init_tracing("my_mcp", "info")?;
//! serve_stdio(MyServer::with_config(config)?, "my_mcp").await?;
//!
//! // In tool implementations
//! summary_success(format!("Found {} entries", data.len()), &data)
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params, invalid_request};
pub use init::{init_tracing, serve_stdio};
pub use result::summary_success;

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
