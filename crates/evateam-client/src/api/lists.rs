//! Sprints and releases API.
//!
//! Both live in the `CmfList` class and differ only by code prefix, so one
//! façade serves both; [`ListKind`] narrows a listing to one of them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{kwargs_with_defaults, list_method, lookup, params_kwargs, update_kwargs};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields, status};
use crate::error::Result;
use crate::models::{List, RELEASE_CODE_PREFIX, SPRINT_CODE_PREFIX};
use crate::predicate::Predicate;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Sprint or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Sprint,
    Release,
}

impl ListKind {
    pub fn code_prefix(&self) -> &'static str {
        match self {
            ListKind::Sprint => SPRINT_CODE_PREFIX,
            ListKind::Release => RELEASE_CODE_PREFIX,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Sprint => "sprint",
            ListKind::Release => "release",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sprint" | "sprints" => Some(ListKind::Sprint),
            "release" | "releases" => Some(ListKind::Release),
            _ => None,
        }
    }

    /// Whether `code` carries this kind's prefix.
    pub fn matches(&self, code: &str) -> bool {
        code.starts_with(self.code_prefix())
    }

    /// `code LIKE <prefix>%`.
    pub fn predicate(&self) -> Predicate {
        Predicate::like(fields::CODE, format!("{}%", self.code_prefix()))
    }
}

/// Parameters for creating a sprint or release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCreate {
    pub name: String,
    /// Owning project.
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl ListCreate {
    pub fn new(name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: parent_id.into(),
            ..Self::default()
        }
    }
}

/// Sprints and releases API client.
pub struct ListsApi {
    client: EvaClient,
}

impl ListsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a list by code (`SPR-001543`, `REL-001641`).
    pub async fn get(&self, code: &str, columns: &[&str]) -> Result<RpcResponse<Option<List>>> {
        self.query(lookup(Entity::List, fields::CODE, code, columns))
            .await
    }

    /// Get the first list matching `query` (`CmfList.get`).
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<List>>> {
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::List, Projection::Single);
        self.client
            .call("ListsApi::query", Entity::List.method("get"), kwargs)
            .await
    }

    /// List sprints and releases matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<List>>> {
        let method = list_method(&query, Entity::List)?;
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::List, Projection::List);
        self.client.call("ListsApi::list", method, kwargs).await
    }

    /// Count lists matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call("ListsApi::count", Entity::List.method("count"), query.to_kwargs())
            .await?;
        Ok(response.result)
    }

    /// Lists of a project, optionally narrowed to one kind and to open ones.
    pub async fn for_project(
        &self,
        project_id: &str,
        kind: Option<ListKind>,
        open_only: bool,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<List>>> {
        self.list(project_query(project_id, kind, open_only).select(columns.iter().copied()))
            .await
    }

    /// Sprints of a project.
    pub async fn project_sprints(
        &self,
        project_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<List>>> {
        self.for_project(project_id, Some(ListKind::Sprint), false, columns)
            .await
    }

    /// Releases of a project.
    pub async fn project_releases(
        &self,
        project_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<List>>> {
        self.for_project(project_id, Some(ListKind::Release), false, columns)
            .await
    }

    /// Create a sprint or release.
    pub async fn create(&self, params: &ListCreate) -> Result<RpcResponse<List>> {
        self.client
            .call(
                "ListsApi::create",
                Entity::List.method("create"),
                params_kwargs(params)?,
            )
            .await
    }

    /// Update fields of a list.
    pub async fn update(&self, id: &str, changes: Map<String, Value>) -> Result<RpcResponse<List>> {
        self.client
            .call(
                "ListsApi::update",
                Entity::List.method("update"),
                update_kwargs(id, changes),
            )
            .await
    }

    /// Close a sprint or release.
    pub async fn close(&self, id: &str) -> Result<RpcResponse<List>> {
        let mut changes = Map::new();
        changes.insert(
            fields::CACHE_STATUS_TYPE.to_string(),
            Value::from(status::CLOSED),
        );
        self.update(id, changes).await
    }

    /// Delete a list.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "ListsApi::delete",
                Entity::List.method("delete"),
                Kwargs::new().with("id", id),
            )
            .await?;
        Ok(())
    }
}

/// Query for the lists of one project.
pub(crate) fn project_query(
    project_id: &str,
    kind: Option<ListKind>,
    open_only: bool,
) -> QueryBuilder {
    let mut query = QueryBuilder::new()
        .from(Entity::List)
        .filter(Predicate::eq(fields::PROJECT_ID, project_id));
    if let Some(kind) = kind {
        query = query.filter(kind.predicate());
    }
    if open_only {
        query = query.filter(Predicate::eq(fields::CACHE_STATUS_TYPE, status::OPEN));
    }
    query
}
