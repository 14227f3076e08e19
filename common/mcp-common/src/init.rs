//! Server initialization utilities
//!
//! Tracing setup and stdio serving shared by every MCP server binary.

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for MCP servers
///
/// Logs go to stderr (stdout is reserved for the MCP protocol). `RUST_LOG`
/// filters as usual; `default_level` applies to `crate_name` on top of it.
///
/// Set `LOG_FORMAT=json` for structured JSON output.
///
/// ```rust,ignore
/// mcp_common::init_tracing("my_mcp", "info")?;
/// ```
pub fn init_tracing(crate_name: &str, default_level: &str) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, default_level);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Serve an already constructed server over stdio until the client disconnects
///
/// Servers that need startup configuration (CLI arguments, config files)
/// build themselves first and hand the finished value over here.
///
/// ```rust,ignore
/// let server = MyServer::with_config(config)?;
/// mcp_common::serve_stdio(server, "my_mcp").await?;
/// ```
pub async fn serve_stdio<S>(server: S, name: &str) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    tracing::info!("Starting {} MCP Server", name);

    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
