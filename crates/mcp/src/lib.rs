// MCP (Model Context Protocol) server for the Trading 212 API
// Exposes read-only account, history, metadata and pie endpoints as tools

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

#[cfg(test)]
mod testing;

pub use error::{ToolError, ToolResult};
pub use server::McpServer;
pub use tools::{Tool, ToolRouter};
