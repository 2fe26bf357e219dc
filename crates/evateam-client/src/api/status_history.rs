//! Status history API. Read-only: transitions are recorded by the server.

use super::{kwargs_with_defaults, list_method, lookup};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::StatusHistory;
use crate::predicate::Predicate;
use crate::query::QueryBuilder;
use crate::rpc::RpcResponse;

/// Status history API client.
pub struct StatusHistoryApi {
    client: EvaClient,
}

impl StatusHistoryApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a status history entry by id.
    pub async fn get(
        &self,
        id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Option<StatusHistory>>> {
        self.query(lookup(Entity::StatusHistory, fields::ID, id, columns))
            .await
    }

    /// Get the first entry matching `query`.
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<StatusHistory>>> {
        let kwargs = kwargs_with_defaults(
            &self.client,
            &query,
            Entity::StatusHistory,
            Projection::Single,
        );
        self.client
            .call(
                "StatusHistoryApi::query",
                Entity::StatusHistory.method("get"),
                kwargs,
            )
            .await
    }

    /// List entries matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<StatusHistory>>> {
        let method = list_method(&query, Entity::StatusHistory)?;
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::StatusHistory, Projection::List);
        self.client
            .call("StatusHistoryApi::list", method, kwargs)
            .await
    }

    /// Count entries matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "StatusHistoryApi::count",
                Entity::StatusHistory.method("count"),
                query.to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// Transitions of one task, newest first.
    pub async fn task_history(
        &self,
        task_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<StatusHistory>>> {
        self.list(by(fields::PARENT_ID, task_id, columns)).await
    }

    /// Transitions within a project, newest first.
    pub async fn project_history(
        &self,
        project_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<StatusHistory>>> {
        self.list(by(fields::PROJECT_ID, project_id, columns))
            .await
    }
}

fn by(field: &str, value: &str, columns: &[&str]) -> QueryBuilder {
    QueryBuilder::new()
        .select(columns.iter().copied())
        .from(Entity::StatusHistory)
        .filter(Predicate::eq(field, value))
        .order_by(["-cmf_created_at"])
}
