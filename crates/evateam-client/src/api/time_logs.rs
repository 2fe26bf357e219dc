//! Time logs API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{kwargs_with_defaults, list_method, lookup, params_kwargs, update_kwargs};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::TimeLog;
use crate::predicate::Predicate;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Parameters for logging time on a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeLogCreate {
    /// Task id.
    pub parent_id: String,
    /// Minutes.
    pub time_spent: i64,
}

/// Time logs API client.
pub struct TimeLogsApi {
    client: EvaClient,
}

impl TimeLogsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a time log by id.
    pub async fn get(&self, id: &str, columns: &[&str]) -> Result<RpcResponse<Option<TimeLog>>> {
        self.query(lookup(Entity::TimeLog, fields::ID, id, columns))
            .await
    }

    /// Get the first time log matching `query`.
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<TimeLog>>> {
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::TimeLog, Projection::Single);
        self.client
            .call("TimeLogsApi::query", Entity::TimeLog.method("get"), kwargs)
            .await
    }

    /// List time logs matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<TimeLog>>> {
        let method = list_method(&query, Entity::TimeLog)?;
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::TimeLog, Projection::List);
        self.client.call("TimeLogsApi::list", method, kwargs).await
    }

    /// Count time logs matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "TimeLogsApi::count",
                Entity::TimeLog.method("count"),
                query.to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// Time logged on a task, newest first.
    pub async fn task_time_logs(
        &self,
        task_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<TimeLog>>> {
        self.list(by(fields::PARENT_ID, task_id, columns)).await
    }

    /// Time logged by a person, newest first.
    pub async fn person_time_logs(
        &self,
        person_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<TimeLog>>> {
        self.list(by(fields::CMF_OWNER_ID, person_id, columns))
            .await
    }

    /// Time logged on any task of a project, newest first.
    pub async fn project_time_logs(
        &self,
        project_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<TimeLog>>> {
        self.list(by(fields::PARENT_PROJECT_ID, project_id, columns)).await
    }

    /// Log time on a task.
    pub async fn create(&self, params: &TimeLogCreate) -> Result<RpcResponse<TimeLog>> {
        self.client
            .call(
                "TimeLogsApi::create",
                Entity::TimeLog.method("create"),
                params_kwargs(params)?,
            )
            .await
    }

    /// Update fields of a time log.
    pub async fn update(
        &self,
        id: &str,
        changes: Map<String, Value>,
    ) -> Result<RpcResponse<TimeLog>> {
        self.client
            .call(
                "TimeLogsApi::update",
                Entity::TimeLog.method("update"),
                update_kwargs(id, changes),
            )
            .await
    }

    /// Delete a time log.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "TimeLogsApi::delete",
                Entity::TimeLog.method("delete"),
                Kwargs::new().with("id", id),
            )
            .await?;
        Ok(())
    }
}

fn by(field: &str, value: &str, columns: &[&str]) -> QueryBuilder {
    QueryBuilder::new()
        .select(columns.iter().copied())
        .from(Entity::TimeLog)
        .filter(Predicate::eq(field, value))
        .order_by(["-cmf_created_at"])
}
