//! Error types for tools and the MCP server.

use thiserror::Error;

/// Result type for tool execution.
pub type Result<T> = std::result::Result<T, ToolError>;

/// A failed tool call, categorised for the end user.
///
/// Client errors are sorted by variant first: HTTP statuses map directly,
/// while local failures (a query without an entity, an undecodable body)
/// are passed through unchanged. Only RPC errors, whose kind the server
/// does not report in structured form, are sorted by well-known fragments
/// of their message (`not found`, `Forbidden`, ...).
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested object does not exist.
    #[error("{operation}: resource not found")]
    NotFound { operation: String },

    /// The token was rejected.
    #[error("{operation}: unauthorized")]
    Unauthorized { operation: String },

    /// The token lacks permission.
    #[error("{operation}: forbidden")]
    Forbidden { operation: String },

    /// Arguments were missing or rejected by the server.
    #[error("{operation}: invalid input: {message}")]
    InvalidInput { operation: String, message: String },

    /// Any other client failure.
    #[error("{operation}: {source}")]
    Client {
        operation: String,
        #[source]
        source: evateam_client::Error,
    },

    /// No tool is registered under this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Categorise a client error raised while running `operation`.
    pub fn wrap(operation: impl Into<String>, err: evateam_client::Error) -> Self {
        use evateam_client::Error as ClientError;

        let operation = operation.into();
        match &err {
            ClientError::Status { status: 401, .. } => ToolError::Unauthorized { operation },
            ClientError::Status { status: 403, .. } => ToolError::Forbidden { operation },
            ClientError::Status { status: 404, .. } => ToolError::NotFound { operation },
            ClientError::Rpc { message, .. } => {
                if message.contains("not found") {
                    ToolError::NotFound { operation }
                } else if message.contains("401") || message.contains("Unauthorized") {
                    ToolError::Unauthorized { operation }
                } else if message.contains("403") || message.contains("Forbidden") {
                    ToolError::Forbidden { operation }
                } else if message.contains("validation") || message.contains("invalid") {
                    ToolError::InvalidInput {
                        operation,
                        message: err.to_string(),
                    }
                } else {
                    ToolError::Client {
                        operation,
                        source: err,
                    }
                }
            }
            _ => ToolError::Client {
                operation,
                source: err,
            },
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ToolError::InvalidInput {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Message shown to the caller of the tool.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::NotFound { .. } => {
                "Resource not found. Please check the ID or code and try again.".to_string()
            }
            ToolError::Unauthorized { .. } => {
                "Authentication failed. Please check EVA_API_TOKEN.".to_string()
            }
            ToolError::Forbidden { .. } => {
                "Access denied. You don't have permission for this operation.".to_string()
            }
            ToolError::InvalidInput { .. } => format!("Invalid input: {}", self),
            ToolError::Client { .. } | ToolError::UnknownTool(_) => {
                format!("Operation failed: {}", self)
            }
        }
    }
}

/// Error type for the stdio server loop.
#[derive(Debug, Error)]
pub enum McpError {
    /// Reading or writing the stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed framing.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl McpError {
    /// Create a protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }
}
