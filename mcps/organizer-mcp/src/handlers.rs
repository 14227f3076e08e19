//! Tool handlers
//!
//! Each handler runs one component and turns its result into a tool result:
//! a one-line summary plus the JSON payload, or an MCP error with structured
//! data. Nothing here panics on bad input.

use mcp_common::{
    internal_error, invalid_params, invalid_request, summary_success, CallToolResult, McpError,
};
use serde_json::json;

use crate::ops::{BatchMover, DirectoryCreator, DirectoryLister, PathDeleter, PathSearcher, SearchFilter};
use crate::params::*;
use crate::sandbox::AllowedRoots;
use crate::types::{
    AllowedDirectoriesResponse, Config, CreateDirectoryResponse, DeleteReason, FsError,
    ListDirectoryResponse,
};

// ============================================================================
// Helper Functions
// ============================================================================

pub fn fs_error_to_mcp(err: FsError) -> McpError {
    let data = Some(json!({
        "kind": err.kind(),
        "path": err.path().map(|p| p.display().to_string()),
    }));

    match &err {
        FsError::OutsideAllowedRoots { .. } | FsError::RootProtected { .. } => {
            invalid_request(err.to_string(), data)
        }
        FsError::InvalidPath(_) | FsError::InvalidParams(_) => invalid_params(err.to_string(), data),
        _ => internal_error(err.to_string(), data),
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

pub async fn list_directory(
    lister: &DirectoryLister,
    params: ListDirectoryParams,
) -> Result<CallToolResult, McpError> {
    let listing = lister.list(&params.path).await.map_err(fs_error_to_mcp)?;

    let response = ListDirectoryResponse {
        path: listing.path.to_string(),
        total_count: listing.entries.len(),
        entries: listing.entries,
    };

    summary_success(
        format!("{} entries in {}", response.total_count, response.path),
        &response,
    )
}

pub async fn create_directory(
    creator: &DirectoryCreator,
    params: CreateDirectoryParams,
) -> Result<CallToolResult, McpError> {
    let created = creator
        .make_dir(&params.path)
        .await
        .map_err(fs_error_to_mcp)?;

    let response = CreateDirectoryResponse {
        created: created.to_string(),
    };

    summary_success(format!("Directory ready: {}", response.created), &response)
}

pub async fn search_paths(
    searcher: &PathSearcher,
    config: &Config,
    params: SearchPathsParams,
) -> Result<CallToolResult, McpError> {
    let limit = params.limit.unwrap_or(config.limits.default_search_limit);
    let filter = SearchFilter::new(limit)
        .map_err(fs_error_to_mcp)?
        .files(params.search_files)
        .directories(params.search_directories)
        .with_extensions(&params.extensions)
        .with_names(&params.names);

    let report = searcher
        .search(&params.path, &filter)
        .await
        .map_err(fs_error_to_mcp)?;

    let summary = match report.truncated_at {
        Some(limit) => format!(
            "Found {} matches under {} (stopped at limit {})",
            report.matches.len(),
            report.root,
            limit
        ),
        None => format!("Found {} matches under {}", report.matches.len(), report.root),
    };

    summary_success(summary, &report)
}

pub async fn move_items(
    mover: &BatchMover,
    params: MoveItemsParams,
) -> Result<CallToolResult, McpError> {
    let report = mover.move_all(&params.items).await;

    summary_success(
        format!(
            "Moved {} item(s), {} failed",
            report.moved_count, report.failed_count
        ),
        &report,
    )
}

pub async fn delete_path(
    deleter: &PathDeleter,
    params: DeletePathParams,
) -> Result<CallToolResult, McpError> {
    let outcome = deleter
        .delete(&params.path)
        .await
        .map_err(fs_error_to_mcp)?;

    let summary = match outcome.reason {
        DeleteReason::None => format!("Deleted {}", outcome.path),
        DeleteReason::NotFound => format!("Nothing to delete at {}", outcome.path),
        DeleteReason::UnsupportedType => format!(
            "Not deleted: {} is neither a file nor a directory",
            outcome.path
        ),
    };

    summary_success(summary, &outcome)
}

pub async fn list_allowed_directories(roots: &AllowedRoots) -> Result<CallToolResult, McpError> {
    let response = AllowedDirectoriesResponse {
        roots: roots.display_strings(),
    };

    summary_success(
        format!("{} allowed root(s)", response.roots.len()),
        &response,
    )
}
