//! Tool framework.
//!
//! Every operation exposed over MCP implements [`Tool`]; the
//! [`ToolRegistry`] looks tools up by name and runs them.
//!
//! # Example
//!
//! ```rust,ignore
//! use evateam_mcp::{Tool, ToolResult, ToolRegistry};
//!
//! struct Ping;
//!
//! #[async_trait]
//! impl Tool for Ping {
//!     fn name(&self) -> &str { "ping" }
//!     fn description(&self) -> &str { "Answer pong" }
//!     fn parameters(&self) -> Value { json!({"type": "object"}) }
//!
//!     async fn execute(&self, params: Value) -> Result<ToolResult> {
//!         Ok(ToolResult::text("pong"))
//!     }
//! }
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(Ping);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ToolError};
use crate::protocol::ToolInfo;

// ─────────────────────────────────────────────────────────────────────────────
// Tool Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A named operation callable over MCP.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, `eva_<entity>_<verb>`.
    fn name(&self) -> &str;

    /// One-line description shown to the caller.
    fn description(&self) -> &str;

    /// JSON Schema of the arguments object.
    fn parameters(&self) -> Value;

    /// Run the tool.
    async fn execute(&self, params: Value) -> Result<ToolResult>;
}

/// Decode tool arguments into a typed input.
///
/// A missing arguments object is treated as `{}` so tools whose inputs are
/// all optional can be called bare.
pub fn parse_params<T: DeserializeOwned>(operation: &str, params: Value) -> Result<T> {
    let params = match params {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(params).map_err(|e| ToolError::invalid_input(operation, e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool Result
// ─────────────────────────────────────────────────────────────────────────────

/// Successful output of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolResult {
    /// Plain text output.
    Text {
        /// The text content.
        content: String,
    },
    /// Structured output.
    Json {
        /// The JSON content.
        content: Value,
    },
}

impl ToolResult {
    /// Create a text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Create a JSON result.
    pub fn json(content: Value) -> Self {
        Self::Json { content }
    }

    /// Serialize `value` into a JSON result.
    pub fn from_serialize(operation: &str, value: &impl Serialize) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::json)
            .map_err(|e| ToolError::invalid_input(operation, format!("unencodable result: {}", e)))
    }

    /// Content as text, JSON pretty-printed.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text { content } => content.clone(),
            Self::Json { content } => {
                serde_json::to_string_pretty(content).unwrap_or_else(|_| content.to_string())
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of available tools.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it will be replaced.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool definitions for `tools/list`, sorted by name.
    pub fn definitions(&self) -> Vec<ToolInfo> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: Some(tool.description().to_string()),
                input_schema: Some(tool.parameters()),
            })
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, params: Value) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tracing::debug!(tool = name, "executing tool");
        let result = tool.execute(params).await;
        if let Err(e) = &result {
            tracing::warn!(tool = name, error = %e, "tool failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the message back"
        }

        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"message": {"type": "string"}},
                "required": ["message"]
            })
        }

        async fn execute(&self, params: Value) -> Result<ToolResult> {
            #[derive(Deserialize)]
            struct Input {
                message: String,
            }
            let input: Input = parse_params("echo", params)?;
            Ok(ToolResult::text(input.message))
        }
    }

    #[test]
    fn test_registry() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        registry.register(Echo);
        registry.register(Echo);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("echo"));
        assert_eq!(registry.names(), vec!["echo"]);

        let defs = registry.definitions();
        assert_eq!(defs[0].name, "echo");
        assert_eq!(defs[0].input_schema.as_ref().unwrap()["required"], json!(["message"]));
    }

    #[tokio::test]
    async fn test_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo);

        let result = registry
            .execute("echo", json!({"message": "hi"}))
            .await
            .unwrap();
        assert_eq!(result, ToolResult::text("hi"));
    }

    #[tokio::test]
    async fn test_execute_bad_params() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo);

        let err = registry.execute("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
        assert!(err.to_string().contains("message"));
    }

    #[tokio::test]
    async fn test_execute_unknown() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nope", Value::Null).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[test]
    fn test_result_text() {
        assert_eq!(ToolResult::text("x").to_text(), "x");
        let json = ToolResult::json(json!({"a": 1})).to_text();
        assert!(json.contains("\"a\": 1"));
    }

    #[test]
    fn test_parse_params_null_is_empty_object() {
        #[derive(Deserialize, Default)]
        struct Input {
            #[serde(default)]
            limit: Option<u64>,
        }
        let input: Input = parse_params("x", Value::Null).unwrap();
        assert!(input.limit.is_none());
    }
}
