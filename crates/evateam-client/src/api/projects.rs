//! Projects API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{kwargs_with_defaults, list_method, lookup, params_kwargs, update_kwargs};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::Project;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Parameters for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admins: Vec<String>,
}

impl ProjectCreate {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Projects API client.
pub struct ProjectsApi {
    client: EvaClient,
}

impl ProjectsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a project by code.
    pub async fn get(&self, code: &str, columns: &[&str]) -> Result<RpcResponse<Option<Project>>> {
        self.query(lookup(Entity::Project, fields::CODE, code, columns))
            .await
    }

    /// Get the first project matching `query` (`CmfProject.get`).
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<Project>>> {
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::Project, Projection::Single);
        self.client
            .call("ProjectsApi::query", Entity::Project.method("get"), kwargs)
            .await
    }

    /// List projects matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<Project>>> {
        let method = list_method(&query, Entity::Project)?;
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Project, Projection::List);
        self.client.call("ProjectsApi::list", method, kwargs).await
    }

    /// Count projects matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "ProjectsApi::count",
                Entity::Project.method("count"),
                query.to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// Create a project.
    pub async fn create(&self, params: &ProjectCreate) -> Result<RpcResponse<Project>> {
        self.client
            .call(
                "ProjectsApi::create",
                Entity::Project.method("create"),
                params_kwargs(params)?,
            )
            .await
    }

    /// Update fields of a project.
    pub async fn update(
        &self,
        id: &str,
        changes: Map<String, Value>,
    ) -> Result<RpcResponse<Project>> {
        self.client
            .call(
                "ProjectsApi::update",
                Entity::Project.method("update"),
                update_kwargs(id, changes),
            )
            .await
    }

    /// Delete a project.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "ProjectsApi::delete",
                Entity::Project.method("delete"),
                Kwargs::new().with("id", id),
            )
            .await?;
        Ok(())
    }

    /// Add a person to the project's executors.
    pub async fn add_executor(&self, project_id: &str, person_id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "ProjectsApi::add_executor",
                Entity::Project.method("add_executors"),
                executors_kwargs(project_id, person_id),
            )
            .await?;
        Ok(())
    }

    /// Remove a person from the project's executors.
    pub async fn remove_executor(&self, project_id: &str, person_id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "ProjectsApi::remove_executor",
                Entity::Project.method("remove_executors"),
                executors_kwargs(project_id, person_id),
            )
            .await?;
        Ok(())
    }
}

fn executors_kwargs(project_id: &str, person_id: &str) -> Kwargs {
    Kwargs::new()
        .with("id", project_id)
        .with(fields::EXECUTORS, vec![person_id])
}
