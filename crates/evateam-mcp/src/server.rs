//! MCP server over stdio.
//!
//! Messages are accepted with either `Content-Length` framing or one JSON
//! object per line. Each response is written back in the framing its
//! request arrived in.

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{McpError, ToolError};
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, MCP_PROTOCOL_VERSION, ServerCapabilities, ServerInfo,
    ToolsCapability,
};
use crate::tool::ToolRegistry;

/// Largest `Content-Length` body accepted (16 MiB).
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// How a message was framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// `Content-Length: N\r\n\r\n` followed by N bytes.
    ContentLength,
    /// One JSON object per line.
    Line,
}

/// MCP server dispatching tool calls to a [`ToolRegistry`].
pub struct McpServer {
    registry: ToolRegistry,
    server_info: ServerInfo,
}

impl McpServer {
    /// Create a server for `registry`.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_info: ServerInfo::default(),
        }
    }

    /// Override the name and version reported on `initialize`.
    pub fn with_server_info(mut self, info: ServerInfo) -> Self {
        self.server_info = info;
        self
    }

    /// The registry served.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one request. Notifications get no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "notification");
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => self.initialize(),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::new(
                JsonRpcError::METHOD_NOT_FOUND,
                format!("method not found: {}", other),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    /// Handle one raw message body.
    pub async fn handle_message(&self, body: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(JsonRpcError::PARSE_ERROR, format!("parse error: {}", e)),
                ));
            }
        };
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(
                    JsonRpcError::INVALID_REQUEST,
                    format!("invalid request: {}", e),
                ),
            )),
        }
    }

    /// Serve requests from `reader` until end of input.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(tools = self.registry.len(), "MCP server started");
        while let Some((framing, body)) = read_message(&mut reader).await? {
            tracing::trace!(json = %body, "received MCP message");
            if let Some(response) = self.handle_message(&body).await {
                write_message(&mut writer, framing, &response).await?;
            }
        }
        tracing::info!("MCP server input closed");
        Ok(())
    }

    fn initialize(&self) -> Result<Value, JsonRpcError> {
        to_result(&InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            server_info: self.server_info.clone(),
        })
    }

    fn list_tools(&self) -> Result<Value, JsonRpcError> {
        to_result(&ListToolsResult {
            tools: self.registry.definitions(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::new(JsonRpcError::INVALID_PARAMS, "missing params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    JsonRpcError::new(JsonRpcError::INVALID_PARAMS, format!("invalid params: {}", e))
                })
            })?;

        let arguments = params.arguments.unwrap_or(Value::Null);
        let result = match self.registry.execute(&params.name, arguments).await {
            Ok(output) => CallToolResult::text(output.to_text()),
            Err(ToolError::UnknownTool(name)) => {
                return Err(JsonRpcError::new(
                    JsonRpcError::INVALID_PARAMS,
                    format!("unknown tool: {}", name),
                ));
            }
            Err(e) => CallToolResult::error(e.user_message()),
        };
        to_result(&result)
    }
}

fn to_result(value: &impl serde::Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, e.to_string()))
}

/// Read the next message, or `None` at end of input.
pub async fn read_message<R>(reader: &mut R) -> Result<Option<(Framing, String)>, McpError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with("Content-Length:") {
            return Ok(Some((Framing::Line, trimmed.to_string())));
        }
        break;
    }

    // Header block: Content-Length plus any others, up to a blank line
    let mut content_length: Option<usize> = None;
    loop {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        if let Some(len_str) = trimmed.strip_prefix("Content-Length:") {
            content_length = Some(len_str.trim().parse().map_err(|e| {
                McpError::protocol(format!("invalid Content-Length: {}", e))
            })?);
        }
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(McpError::protocol("unexpected end of input in headers"));
        }
    }

    let content_length =
        content_length.ok_or_else(|| McpError::protocol("missing Content-Length header"))?;
    if content_length > MAX_MESSAGE_SIZE {
        return Err(McpError::protocol(format!(
            "message too large: {} bytes (max {})",
            content_length, MAX_MESSAGE_SIZE
        )));
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;
    let body = String::from_utf8(body)
        .map_err(|e| McpError::protocol(format!("invalid UTF-8 in message: {}", e)))?;
    Ok(Some((Framing::ContentLength, body)))
}

/// Write one response in the given framing.
pub async fn write_message<W>(
    writer: &mut W,
    framing: Framing,
    response: &JsonRpcResponse,
) -> Result<(), McpError>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    match framing {
        Framing::ContentLength => {
            let header = format!("Content-Length: {}\r\n\r\n", json.len());
            writer.write_all(header.as_bytes()).await?;
            writer.write_all(json.as_bytes()).await?;
        }
        Framing::Line => {
            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
    }
    writer.flush().await?;
    tracing::trace!(json = %json, "sent MCP message");
    Ok(())
}
