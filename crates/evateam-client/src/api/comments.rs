//! Comments API.

use serde_json::Value;

use super::{kwargs_with_defaults, list_method, lookup};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::Comment;
use crate::predicate::Predicate;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Comments API client.
pub struct CommentsApi {
    client: EvaClient,
}

impl CommentsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Comments of a task, newest first.
    ///
    /// `task` is either a task code (`PROJ-1`) or a full object id
    /// (`CmfTask:<uuid>`).
    pub async fn for_task(
        &self,
        task: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Comment>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .from(Entity::Comment)
                .filter(Predicate::eq(fields::TASK_ID, task_ref(task)))
                .order_by(["-cmf_created_at"]),
        )
        .await
    }

    /// Get a comment by id.
    pub async fn get(&self, id: &str, columns: &[&str]) -> Result<RpcResponse<Option<Comment>>> {
        self.query(lookup(Entity::Comment, fields::ID, id, columns))
            .await
    }

    /// Get the first comment matching `query`.
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<Comment>>> {
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::Comment, Projection::Single);
        self.client
            .call("CommentsApi::query", Entity::Comment.method("get"), kwargs)
            .await
    }

    /// Count comments matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "CommentsApi::count",
                Entity::Comment.method("count"),
                query.to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// List comments matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<Comment>>> {
        let method = list_method(&query, Entity::Comment)?;
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Comment, Projection::List);
        self.client.call("CommentsApi::list", method, kwargs).await
    }

    /// Post a comment on a task or document.
    pub async fn create(&self, parent_id: &str, text: &str) -> Result<RpcResponse<Comment>> {
        self.client
            .call(
                "CommentsApi::create",
                Entity::Comment.method("create"),
                Kwargs::new()
                    .with(fields::PARENT_ID, parent_id)
                    .with(fields::TEXT, text),
            )
            .await
    }

    /// Replace the text of a comment.
    pub async fn update(&self, id: &str, text: &str) -> Result<RpcResponse<Comment>> {
        self.client
            .call(
                "CommentsApi::update",
                Entity::Comment.method("update"),
                Kwargs::new().with("id", id).with(fields::TEXT, text),
            )
            .await
    }

    /// Delete a comment.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "CommentsApi::delete",
                Entity::Comment.method("delete"),
                Kwargs::new().with("id", id),
            )
            .await?;
        Ok(())
    }
}

fn task_ref(task: &str) -> String {
    if task.contains(':') {
        task.to_string()
    } else {
        format!("{}:{}", Entity::Task, task)
    }
}
