//! Stdio Transport for MCP Server
//!
//! Provides standard I/O transport for local MCP connections (e.g., Claude Desktop).

use crate::config::Config;
use crate::mcp::BinanceServer;
use anyhow::Context;
use rmcp::ServiceExt;

/// Runs the MCP server with stdio transport
///
/// Messages are read from stdin and responses are written to stdout, so all
/// logging must go to stderr. Returns once the client closes the session.
pub async fn run_stdio_server(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting Binance MCP server in stdio mode");

    let server = BinanceServer::from_config(config).context("failed to build Binance client")?;

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP session on stdio")?;

    tracing::info!("MCP server ready on stdio");

    let reason = service.waiting().await.context("MCP session task failed")?;

    tracing::info!(?reason, "MCP server shutdown complete");

    Ok(())
}
