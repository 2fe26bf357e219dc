//! Task links API.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{kwargs_with_defaults, list_method, lookup};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::TaskLink;
use crate::predicate::Predicate;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Which side of a link a task is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    /// The task is the source.
    Outgoing,
    /// The task is the target.
    Incoming,
    #[default]
    Both,
}

impl LinkDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "outgoing" | "out" => Some(LinkDirection::Outgoing),
            "incoming" | "in" => Some(LinkDirection::Incoming),
            "both" | "" => Some(LinkDirection::Both),
            _ => None,
        }
    }
}

/// Task links API client.
pub struct TaskLinksApi {
    client: EvaClient,
}

impl TaskLinksApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a link by id.
    pub async fn get(&self, id: &str, columns: &[&str]) -> Result<RpcResponse<Option<TaskLink>>> {
        self.query(lookup(Entity::Relation, fields::ID, id, columns))
            .await
    }

    /// Get the first link matching `query`.
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<TaskLink>>> {
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::Relation, Projection::Single);
        self.client
            .call("TaskLinksApi::query", Entity::Relation.method("get"), kwargs)
            .await
    }

    /// List links matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<TaskLink>>> {
        let method = list_method(&query, Entity::Relation)?;
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::Relation, Projection::List);
        self.client.call("TaskLinksApi::list", method, kwargs).await
    }

    /// Count links matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "TaskLinksApi::count",
                Entity::Relation.method("count"),
                query.to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// Links where the task is the source, newest first.
    pub async fn outgoing(
        &self,
        task_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<TaskLink>>> {
        self.list(by(fields::SOURCE_ID, task_id, columns)).await
    }

    /// Links where the task is the target, newest first.
    pub async fn incoming(
        &self,
        task_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<TaskLink>>> {
        self.list(by(fields::TARGET_ID, task_id, columns)).await
    }

    /// Links of a task in the given direction.
    ///
    /// Filters are conjunctive, so [`LinkDirection::Both`] issues one call
    /// per side and merges the results, outgoing first, dropping links seen
    /// on both sides.
    pub async fn for_task(
        &self,
        task_id: &str,
        direction: LinkDirection,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<TaskLink>>> {
        match direction {
            LinkDirection::Outgoing => self.outgoing(task_id, columns).await,
            LinkDirection::Incoming => self.incoming(task_id, columns).await,
            LinkDirection::Both => {
                let outgoing = self.outgoing(task_id, columns).await?;
                let incoming = self.incoming(task_id, columns).await?;
                Ok(outgoing.map(|links| merge_links(links, incoming.result)))
            }
        }
    }

    /// Link two tasks.
    pub async fn create(
        &self,
        source_id: &str,
        target_id: &str,
        relation_option_id: &str,
    ) -> Result<RpcResponse<TaskLink>> {
        self.client
            .call(
                "TaskLinksApi::create",
                Entity::Relation.method("create"),
                Kwargs::new()
                    .with(fields::SOURCE_ID, source_id)
                    .with(fields::TARGET_ID, target_id)
                    .with("relation_option_id", relation_option_id),
            )
            .await
    }

    /// Delete a link.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "TaskLinksApi::delete",
                Entity::Relation.method("delete"),
                Kwargs::new().with("id", id),
            )
            .await?;
        Ok(())
    }
}

fn by(field: &str, value: &str, columns: &[&str]) -> QueryBuilder {
    QueryBuilder::new()
        .select(columns.iter().copied())
        .from(Entity::Relation)
        .filter(Predicate::eq(field, value))
        .order_by(["-cmf_created_at"])
}

fn merge_links(mut links: Vec<TaskLink>, more: Vec<TaskLink>) -> Vec<TaskLink> {
    let mut seen: HashSet<String> = links.iter().map(|l| l.id.clone()).collect();
    links.extend(more.into_iter().filter(|l| seen.insert(l.id.clone())));
    links
}
