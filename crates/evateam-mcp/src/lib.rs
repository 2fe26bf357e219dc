//! MCP tool server for the EVA Team API.
//!
//! Wraps [`evateam_client`] façades as MCP tools (`eva_task_list`,
//! `eva_project_get`, ...) and serves them over stdio.
//!
//! ```rust,ignore
//! let client = EvaClient::from_env()?;
//! let server = McpServer::new(default_registry(client));
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! server.serve(stdin, tokio::io::stdout()).await?;
//! ```

pub mod error;
pub mod input;
pub mod protocol;
pub mod server;
pub mod tool;
pub mod tools;

pub use error::{McpError, Result, ToolError};
pub use input::{CountResult, FilterInput, ListResult, QueryInput, build_query};
pub use server::{Framing, McpServer};
pub use tool::{Tool, ToolRegistry, ToolResult, parse_params};
pub use tools::default_registry;
