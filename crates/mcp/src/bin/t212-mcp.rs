// Standalone MCP server binary (stdio transport)

use anyhow::{Context, Result};
use std::sync::Arc;
use t212_client::Trading212Client;
use t212_mcp::{McpServer, ToolRouter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Failed to start MCP server: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run() -> Result<()> {
    tracing::info!("Trading212 MCP Server starting...");

    if let Ok(transport) = std::env::var("MCP_TRANSPORT") {
        if !transport.trim().eq_ignore_ascii_case("stdio") {
            tracing::warn!(
                transport = %transport,
                "t212-mcp only serves stdio; use t212-server --transport http for HTTP"
            );
        }
    }

    let client = Trading212Client::from_env().context("Failed to load Trading212 configuration")?;
    tracing::info!(base_url = %client.config().base_url, "Using Trading212 API");

    let server = Arc::new(McpServer::new(ToolRouter::new(Arc::new(client))));
    server.serve_stdio().await
}
