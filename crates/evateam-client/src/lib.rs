//! Typed JSON-RPC client for the EVA Team project management API.
//!
//! Every call is a single `POST <base_url>/api/` carrying a versioned
//! envelope. List queries are described with [`QueryBuilder`] and translated
//! into the server's keyword arguments (`filter`, `fields`, `order_by`,
//! `slice`, ...).
//!
//! # Example
//!
//! ```no_run
//! use evateam_client::{Entity, EvaClient, Predicate, QueryBuilder, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = EvaClient::builder()
//!     .base_url("https://eva.example.com")
//!     .api_token("secret")
//!     .build()?;
//!
//! // Fetch one task with the default projection
//! if let Some(task) = client.tasks().get("PROJ-123", &[]).await?.result {
//!     println!("{:?}", task.name);
//! }
//!
//! // Page through a project's open tasks
//! let page = QueryBuilder::new()
//!     .select(["id", "code", "name"])
//!     .from(Entity::Task)
//!     .filter(Predicate::eq("project_id", "CmfProject:1"))
//!     .filter(Predicate::eq("cache_status_type", "OPEN"))
//!     .order_by(["-priority", "name"])
//!     .offset(100)
//!     .limit(100);
//! let tasks = client.tasks().list(page).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! The server reports domain errors inside HTTP 200 bodies. Those surface as
//! [`Error::Rpc`]; transport failures, non-2xx statuses and undecodable
//! bodies each have their own variant.

pub mod api;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod hooks;
pub mod models;
pub mod predicate;
pub mod query;
pub mod rpc;

pub use client::{ClientBuilder, DEFAULT_TIMEOUT, EvaClient};
pub use config::ClientConfig;
pub use entity::{Entity, FieldDefaults, Projection};
pub use error::{Error, Result};
pub use hooks::{Logger, Metrics, TracingLogger};
pub use predicate::{Condition, Filter, Operator, Predicate};
pub use query::{Kwargs, QueryBuilder};
pub use rpc::{RpcRequest, RpcResponse};
