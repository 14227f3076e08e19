//! Result helpers for MCP tool responses

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

fn to_pretty_json<T: Serialize>(data: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(data).map_err(|e| McpError::internal_error(e.to_string(), None))
}

/// Create a successful response with a human-readable summary and a JSON payload
///
/// The summary is the first content item, the pretty-printed payload the second.
/// Clients that only render text get something readable; clients that parse
/// get the structured data.
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::summary_success;
///
/// let report = mover.move_all(items).await;
/// summary_success(
///     format!("Moved {} item(s), {} failed", report.moved_count, report.failed_count),
///     &report,
/// )
/// ```
pub fn summary_success<T: Serialize>(
    summary: impl Into<String>,
    data: &T,
) -> Result<CallToolResult, McpError> {
    let json = to_pretty_json(data)?;
    Ok(CallToolResult::success(vec![
        Content::text(summary.into()),
        Content::text(json),
    ]))
}
