//! MCP Server implementation for sandboxed file organizing
//!
//! This module defines the server that exposes the filesystem operations as
//! tools. Handler implementations are in the handlers module.

use std::path::{Path, PathBuf};

use mcp_common::{
    async_trait, CallToolResult, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError, Tool,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::handlers;
use crate::ops::{BatchMover, DirectoryCreator, DirectoryLister, PathDeleter, PathSearcher};
use crate::params::*;
use crate::sandbox::PathGuard;
use crate::types::{Config, FsError, FsResult};

const INSTRUCTIONS: &str = "Sandboxed file organizer. Lists, creates, searches, moves and \
     deletes files only inside the configured allowed directories. \
     Use list_allowed_directories to see what paths are accessible.";

/// The Organizer MCP Server
#[derive(Clone)]
pub struct OrganizerMcpServer {
    config: Config,
    guard: PathGuard,
    lister: DirectoryLister,
    creator: DirectoryCreator,
    searcher: PathSearcher,
    mover: BatchMover,
    deleter: PathDeleter,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl OrganizerMcpServer {
    /// Create a server for the given config.
    ///
    /// Fails if the config does not yield at least one allowed root.
    pub fn with_config(config: Config) -> Result<Self, FsError> {
        let guard = PathGuard::from_config(&config)?;
        let protect_roots = config.safety.protect_roots;

        tracing::info!(
            roots = ?guard.roots().display_strings(),
            resolve_symlinks = config.resolve_symlinks,
            "Sandbox configured"
        );

        Ok(Self {
            lister: DirectoryLister::new(guard.clone()),
            creator: DirectoryCreator::new(guard.clone()),
            searcher: PathSearcher::new(guard.clone(), config.limits.max_search_limit),
            mover: BatchMover::new(guard.clone(), protect_roots),
            deleter: PathDeleter::new(guard.clone(), protect_roots),
            guard,
            config,
            tool_router: Self::tool_router(),
        })
    }

    /// Load config from an explicit file, or from standard locations
    ///
    /// An explicit file must exist and parse. Otherwise the first readable
    /// file of these wins:
    /// 1. `~/.binks/organizer.toml`
    /// 2. `./organizer-mcp.toml`
    /// 3. `$XDG_CONFIG_HOME/organizer-mcp/config.toml`
    ///
    /// and with none found the default (rootless) config is returned.
    pub fn load_config(explicit: Option<&Path>) -> FsResult<Config> {
        if let Some(path) = explicit {
            let config = read_config(path)?;
            tracing::info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        let mut config_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            config_paths.push(home.join(".binks").join("organizer.toml"));
        }

        config_paths.push(PathBuf::from("organizer-mcp.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("organizer-mcp").join("config.toml"));
        }

        for path in config_paths {
            if !path.exists() {
                continue;
            }
            match read_config(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => tracing::warn!("Skipping config {}: {}", path.display(), e),
            }
        }

        tracing::info!("Using default configuration");
        Ok(Config::default())
    }

    #[tool(
        description = "List the immediate children of a directory. Each entry has name, isDirectory and isFile."
    )]
    async fn list_directory(
        &self,
        Parameters(params): Parameters<ListDirectoryParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_directory(&self.lister, params).await
    }

    #[tool(
        description = "Create a directory, including missing parent directories. Succeeds if it already exists."
    )]
    async fn create_directory(
        &self,
        Parameters(params): Parameters<CreateDirectoryParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_directory(&self.creator, params).await
    }

    #[tool(
        description = "Recursively search a directory for files by extension and/or directories by name (case-insensitive). Stops once 'limit' matches are found."
    )]
    async fn search_paths(
        &self,
        Parameters(params): Parameters<SearchPathsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::search_paths(&self.searcher, &self.config, params).await
    }

    #[tool(
        description = "Move or rename several files/directories. Destination parents are created as needed and existing destination files are overwritten. Each item succeeds or fails independently."
    )]
    async fn move_items(
        &self,
        Parameters(params): Parameters<MoveItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::move_items(&self.mover, params).await
    }

    #[tool(
        description = "Delete a file, or a directory and everything in it. Reports not_found instead of failing when nothing exists at the path."
    )]
    async fn delete_path(
        &self,
        Parameters(params): Parameters<DeletePathParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_path(&self.deleter, params).await
    }

    #[tool(description = "List the allowed root directories this server can access.")]
    async fn list_allowed_directories(&self) -> Result<CallToolResult, McpError> {
        handlers::list_allowed_directories(self.guard.roots()).await
    }
}

fn read_config(path: &Path) -> FsResult<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FsError::Config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| FsError::Config(format!("{}: {}", path.display(), e)))
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for OrganizerMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for OrganizerMcpServer {
    fn server_name(&self) -> &str {
        "organizer"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "list_directory" => {
                let params: ListDirectoryParams = serde_json::from_value(params)?;
                self.list_directory(Parameters(params)).await.map_err(Into::into)
            }

            "create_directory" => {
                let params: CreateDirectoryParams = serde_json::from_value(params)?;
                self.create_directory(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "search_paths" => {
                let params: SearchPathsParams = serde_json::from_value(params)?;
                self.search_paths(Parameters(params)).await.map_err(Into::into)
            }

            "move_items" => {
                let params: MoveItemsParams = serde_json::from_value(params)?;
                self.move_items(Parameters(params)).await.map_err(Into::into)
            }

            "delete_path" => {
                let params: DeletePathParams = serde_json::from_value(params)?;
                self.delete_path(Parameters(params)).await.map_err(Into::into)
            }

            "list_allowed_directories" => {
                self.list_allowed_directories().await.map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
