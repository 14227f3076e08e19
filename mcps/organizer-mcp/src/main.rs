//! Organizer MCP - sandboxed file organizing server
//!
//! # Usage
//!
//! ```text
//! organizer-mcp ~/Downloads ~/Desktop
//! organizer-mcp --config ~/.binks/organizer.toml
//! ```
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "organizer": { "command": "./organizer-mcp", "args": ["/Users/me/Downloads"] } } }
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use organizer_mcp::OrganizerMcpServer;

#[derive(Parser)]
#[command(name = "organizer-mcp")]
#[command(about = "Sandboxed file organizer MCP server")]
struct Cli {
    /// Allowed root directories (added to any roots from the config file)
    roots: Vec<String>,

    /// Config file (TOML)
    #[arg(long, short, env = "ORGANIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Also check symlink-resolved locations against the roots
    #[arg(long)]
    resolve_symlinks: bool,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    mcp_common::init_tracing("organizer_mcp", level)?;

    let mut config = OrganizerMcpServer::load_config(cli.config.as_deref())?;
    config.roots.extend(cli.roots);
    config.resolve_symlinks |= cli.resolve_symlinks;

    let server = OrganizerMcpServer::with_config(config)
        .map_err(|e| anyhow::anyhow!("{} (pass root directories as arguments or set roots in the config file)", e))?;

    mcp_common::serve_stdio(server, "organizer_mcp").await
}
