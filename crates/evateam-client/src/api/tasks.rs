//! Tasks API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{kwargs_with_defaults, list_method, lookup, params_kwargs, update_kwargs};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::Task;
use crate::predicate::Predicate;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Parameters for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreate {
    pub name: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Sprint/release ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_type_id: Option<String>,
}

impl TaskCreate {
    pub fn new(name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_id: project_id.into(),
            ..Self::default()
        }
    }
}

/// Tasks API client.
pub struct TasksApi {
    client: EvaClient,
}

impl TasksApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a task by code (`PROJ-123`).
    pub async fn get(&self, code: &str, columns: &[&str]) -> Result<RpcResponse<Option<Task>>> {
        self.query(lookup(Entity::Task, fields::CODE, code, columns))
            .await
    }

    /// Get the first task matching `query` (`CmfTask.get`).
    ///
    /// The result is `None` when nothing matches.
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<Task>>> {
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Task, Projection::Single);
        self.client
            .call("TasksApi::query", Entity::Task.method("get"), kwargs)
            .await
    }

    /// List tasks matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<Task>>> {
        let method = list_method(&query, Entity::Task)?;
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Task, Projection::List);
        self.client.call("TasksApi::list", method, kwargs).await
    }

    /// Count tasks matching `query` (`CmfTask.count`).
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call("TasksApi::count", Entity::Task.method("count"), query.to_kwargs())
            .await?;
        Ok(response.result)
    }

    /// All tasks of a project.
    pub async fn project_tasks(
        &self,
        project_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Task>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .from(Entity::Task)
                .filter(Predicate::eq(fields::PARENT_ID, project_id)),
        )
        .await
    }

    /// All tasks in a sprint or release.
    pub async fn sprint_tasks(
        &self,
        sprint_code: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Task>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .from(Entity::Task)
                .filter(Predicate::contains(fields::LISTS, sprint_code)),
        )
        .await
    }

    /// Tasks where the person is responsible.
    pub async fn person_tasks(
        &self,
        person_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Task>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .from(Entity::Task)
                .filter(Predicate::eq(fields::RESPONSIBLE, person_id)),
        )
        .await
    }

    /// Tasks where the person is one of the executors.
    pub async fn person_tasks_as_executor(
        &self,
        person_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Task>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .from(Entity::Task)
                .filter(Predicate::contains(fields::EXECUTORS, person_id)),
        )
        .await
    }

    /// Tasks of one project where the person is responsible.
    pub async fn person_project_tasks(
        &self,
        project_id: &str,
        person_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Task>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .from(Entity::Task)
                .filter(Predicate::eq(fields::PROJECT_ID, project_id))
                .filter(Predicate::eq(fields::RESPONSIBLE, person_id)),
        )
        .await
    }

    /// Create a task.
    pub async fn create(&self, params: &TaskCreate) -> Result<RpcResponse<Task>> {
        self.client
            .call(
                "TasksApi::create",
                Entity::Task.method("create"),
                params_kwargs(params)?,
            )
            .await
    }

    /// Update fields of a task.
    pub async fn update(&self, id: &str, changes: Map<String, Value>) -> Result<RpcResponse<Task>> {
        self.client
            .call(
                "TasksApi::update",
                Entity::Task.method("update"),
                update_kwargs(id, changes),
            )
            .await
    }

    /// Move a task to another status.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<RpcResponse<Task>> {
        let mut changes = Map::new();
        changes.insert(fields::CACHE_STATUS_TYPE.to_string(), Value::from(status));
        self.update(id, changes).await
    }

    /// Delete a task.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "TasksApi::delete",
                Entity::Task.method("delete"),
                Kwargs::new().with("id", id),
            )
            .await?;
        Ok(())
    }

    /// Archive a task (soft delete).
    pub async fn archive(&self, id: &str) -> Result<()> {
        let mut changes = Map::new();
        changes.insert(fields::CMF_DELETED.to_string(), Value::Bool(true));
        let _: RpcResponse<Value> = self
            .client
            .call(
                "TasksApi::archive",
                Entity::Task.method("update"),
                update_kwargs(id, changes),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_params_skip_empty() {
        let mut params = TaskCreate::new("Fix login", "CmfProject:1");
        params.priority = Some(3);
        params.executors = vec!["CmfPerson:7".into()];

        let kwargs = params_kwargs(&params).unwrap();
        assert_eq!(
            serde_json::to_value(&kwargs).unwrap(),
            json!({
                "name": "Fix login",
                "project_id": "CmfProject:1",
                "priority": 3,
                "executors": ["CmfPerson:7"]
            })
        );
    }
}
