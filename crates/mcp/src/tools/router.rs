// Routes tool calls onto upstream requests

use crate::error::{ToolError, ToolResult};
use crate::protocol::ToolSchema;
use crate::tools::catalog::Tool;
use std::sync::Arc;
use t212_client::Trading212Api;

/// Maps tool calls onto the Trading 212 API.
#[derive(Clone)]
pub struct ToolRouter {
    api: Arc<dyn Trading212Api>,
}

impl ToolRouter {
    pub fn new(api: Arc<dyn Trading212Api>) -> Self {
        Self { api }
    }

    /// List all tool schemas, in catalog order
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        Tool::ALL.iter().map(|tool| tool.schema()).collect()
    }

    /// Run a tool and render the upstream result as pretty-printed JSON.
    pub async fn call(&self, name: &str, arguments: &serde_json::Value) -> ToolResult<String> {
        let tool = Tool::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let request = tool.request(arguments);

        tracing::debug!(tool = name, path = %request.path, "Calling tool");
        let payload = self.api.get(&request.path, request.query.as_ref()).await?;

        Ok(payload.to_pretty_json()?)
    }
}
