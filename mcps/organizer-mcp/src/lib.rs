//! Organizer MCP Library
//!
//! Sandboxed file organizing server. Every operation is confined to a fixed
//! set of allowed root directories, checked by [`sandbox::PathGuard`] before
//! the filesystem is touched.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use organizer_mcp::{Config, OrganizerMcpServer};
//!
//! let server = OrganizerMcpServer::with_config(Config::with_roots(["~/Downloads"]))?;
//! let result = server
//!     .call_tool("search_paths", serde_json::json!({ "path": "~/Downloads", "extensions": [".png"] }))
//!     .await?;
//! ```
//!
//! The components in [`ops`] can also be used directly, without MCP.

pub mod handlers;
pub mod ops;
pub mod params;
pub mod sandbox;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::OrganizerMcpServer;

pub use types::{Config, FsError, FsResult};

// Re-export parameter types for direct API usage
pub use params::*;
