use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use t212_client::Trading212Client;
use t212_mcp::{McpServer, ToolRouter};

mod api;
mod config;
mod session;

use config::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// Server-sent events plus a POST endpoint
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "t212-server")]
#[command(about = "Trading 212 MCP server", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "t212-mcp.toml")]
    config: PathBuf,

    /// Transport to serve on
    #[arg(short, long, env = "MCP_TRANSPORT", value_enum, ignore_case = true, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Port to listen on (overrides the configuration file)
    #[arg(short, long, env = "MCP_HTTP_PORT")]
    port: Option<u16>,

    /// Host to bind to (overrides the configuration file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!("Failed to start MCP server: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    tracing::info!("Starting Trading212 MCP server");

    // Load configuration
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(host) = args.host {
        config.http.host = host;
    }

    let client = Trading212Client::from_env().context("Failed to load Trading212 configuration")?;
    tracing::info!(base_url = %client.config().base_url, "Using Trading212 API");

    let mcp = Arc::new(McpServer::new(ToolRouter::new(Arc::new(client))));

    match args.transport {
        Transport::Stdio => mcp.serve_stdio().await,
        Transport::Http => api::serve(config, mcp).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["t212-server"]).unwrap();
        assert_eq!(args.config, PathBuf::from("t212-mcp.toml"));
        assert!(args.host.is_none());
        if std::env::var_os("MCP_TRANSPORT").is_none() {
            assert_eq!(args.transport, Transport::Stdio);
        }
    }

    #[test]
    fn test_transport_is_case_insensitive() {
        let args = Args::try_parse_from(["t212-server", "--transport", "STDIO"]).unwrap();
        assert_eq!(args.transport, Transport::Stdio);

        let args = Args::try_parse_from(["t212-server", "-t", "http", "-p", "4000"]).unwrap();
        assert_eq!(args.transport, Transport::Http);
        assert_eq!(args.port, Some(4000));
    }
}
