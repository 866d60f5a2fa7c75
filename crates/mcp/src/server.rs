// MCP server: JSON-RPC dispatch plus the stdio transport

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, LATEST_PROTOCOL_VERSION,
};
use crate::tools::ToolRouter;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead, FramedWrite, LinesCodec};

pub const SERVER_NAME: &str = "trading212";

pub struct McpServer {
    router: ToolRouter,
    server_info: ServerInfo,
}

impl McpServer {
    pub fn new(router: ToolRouter) -> Self {
        Self {
            router,
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Handle one raw JSON-RPC message. Returns the response to send back, if any.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(_) => return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error())),
        };

        // Replies to server-initiated requests; nothing is ever sent, so nothing to match.
        if value.get("method").is_none()
            && (value.get("result").is_some() || value.get("error").is_some())
        {
            return None;
        }

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(_) => Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
        }
    }

    /// Handle a parsed request. Notifications get no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "Received notification");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize(request.params)),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.router.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            method => JsonRpcResponse::error(id, JsonRpcError::method_not_found(method)),
        };

        Some(response)
    }

    fn initialize(&self, params: Option<Value>) -> InitializeResult {
        let requested = params
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            .map(|p| p.protocol_version);

        if let Some(version) = &requested {
            tracing::info!(protocol_version = %version, "Client initialized");
        }

        InitializeResult {
            protocol_version: requested.unwrap_or_else(|| LATEST_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            server_info: self.server_info.clone(),
        }
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params.unwrap_or(Value::Null)) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid params for tools/call: {}", e)),
                )
            }
        };

        match self.router.call(&params.name, &params.arguments).await {
            Ok(text) => JsonRpcResponse::success(id, CallToolResult::text(text)),
            Err(e) => {
                tracing::warn!(tool = %params.name, error = %e, "Tool call failed");
                JsonRpcResponse::error(id, e.to_rpc_error())
            }
        }
    }

    /// Serve newline-delimited JSON-RPC over stdin/stdout until stdin closes.
    pub async fn serve_stdio(self: Arc<Self>) -> Result<()> {
        tracing::info!("MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC over any byte stream pair.
    ///
    /// Requests are handled concurrently; responses are written as they complete.
    /// Returns once the reader is exhausted and every in-flight request has answered.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        // Split on raw bytes so a line that is not UTF-8 is still framed and answered.
        let mut lines = FramedRead::new(
            reader,
            AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec()),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(response) = rx.recv().await {
                let line = serde_json::to_string(&response)?;
                sink.send(line).await.context("Failed to write response")?;
            }
            Ok::<_, anyhow::Error>(())
        });

        while let Some(chunk) = lines.next().await {
            let chunk = chunk.context("Failed to read request")?;
            let line = String::from_utf8_lossy(&chunk).into_owned();
            if line.trim().is_empty() {
                continue;
            }

            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    let _ = tx.send(response);
                }
            });
        }

        drop(tx);
        writer_task.await.context("Response writer panicked")??;

        tracing::info!("Input closed, MCP server stopping");
        Ok(())
    }
}
