// Tool call failures

use crate::protocol::JsonRpcError;
use t212_client::Trading212Error;

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Upstream(#[from] Trading212Error),

    #[error("Failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

impl ToolError {
    /// JSON-RPC error reported to the caller.
    ///
    /// Every failure is an internal error carrying the display text, unknown
    /// tool names included.
    pub fn to_rpc_error(&self) -> JsonRpcError {
        JsonRpcError::internal_error(self.to_string())
    }
}
