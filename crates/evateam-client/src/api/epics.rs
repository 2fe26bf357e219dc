//! Epics API.
//!
//! An epic is a task whose logic type is `task.epic`; every call here goes
//! to the `CmfTask` family with that filter added.

use super::{kwargs_with_defaults, lookup};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields, logic_type};
use crate::error::Result;
use crate::models::Task;
use crate::predicate::Predicate;
use crate::query::QueryBuilder;
use crate::rpc::RpcResponse;

/// Epics API client.
pub struct EpicsApi {
    client: EvaClient,
}

impl EpicsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get an epic by code. A task that is not an epic is `None`.
    pub async fn get(&self, code: &str, columns: &[&str]) -> Result<RpcResponse<Option<Task>>> {
        self.query(lookup(Entity::Task, fields::CODE, code, columns))
            .await
    }

    /// Get an epic by object id.
    pub async fn get_by_id(
        &self,
        id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Option<Task>>> {
        self.query(lookup(Entity::Task, fields::ID, id, columns))
            .await
    }

    /// Get the first epic matching `query`.
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<Task>>> {
        let query = epic_query(query);
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Task, Projection::Single);
        self.client
            .call("EpicsApi::query", Entity::Task.method("get"), kwargs)
            .await
    }

    /// List epics matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<Task>>> {
        let query = epic_query(query);
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Task, Projection::List);
        self.client
            .call("EpicsApi::list", Entity::Task.method("list"), kwargs)
            .await
    }

    /// Count epics matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "EpicsApi::count",
                Entity::Task.method("count"),
                epic_query(query).to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// Epics of a project.
    pub async fn project_epics(
        &self,
        project_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Task>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .filter(Predicate::eq(fields::PROJECT_ID, project_id)),
        )
        .await
    }

    /// Tasks belonging to an epic.
    pub async fn epic_tasks(
        &self,
        epic_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Task>>> {
        self.client
            .tasks()
            .list(
                QueryBuilder::new()
                    .select(columns.iter().copied())
                    .from(Entity::Task)
                    .filter(Predicate::eq(fields::EPIC_ID, epic_id)),
            )
            .await
    }
}

/// Add the epic logic type filter to `query`.
fn epic_query(query: QueryBuilder) -> QueryBuilder {
    query
        .from(Entity::Task)
        .filter(Predicate::eq(logic_type::CODE_FIELD, logic_type::EPIC))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_epic_query_adds_logic_type() {
        let query = epic_query(QueryBuilder::new().filter(Predicate::eq("project_id", "P:1")));
        assert_eq!(query.entity(), Some("CmfTask"));
        assert_eq!(
            serde_json::to_value(query.to_kwargs()).unwrap(),
            json!({
                "filter": [
                    ["project_id", "==", "P:1"],
                    ["logic_type.code", "==", "task.epic"]
                ]
            })
        );
    }
}
