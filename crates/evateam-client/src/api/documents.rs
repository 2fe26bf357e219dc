//! Documents API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{kwargs_with_defaults, list_method, lookup, params_kwargs, update_kwargs};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::Document;
use crate::predicate::Predicate;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Parameters for creating a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentCreate {
    pub name: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Documents API client.
pub struct DocumentsApi {
    client: EvaClient,
}

impl DocumentsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a document by code.
    pub async fn get(&self, code: &str, columns: &[&str]) -> Result<RpcResponse<Option<Document>>> {
        self.query(lookup(Entity::Document, fields::CODE, code, columns))
            .await
    }

    /// Get the first document matching `query` (`CmfDocument.get`).
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<Document>>> {
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::Document, Projection::Single);
        self.client
            .call("DocumentsApi::query", Entity::Document.method("get"), kwargs)
            .await
    }

    /// List documents matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<Document>>> {
        let method = list_method(&query, Entity::Document)?;
        let kwargs =
            kwargs_with_defaults(&self.client, &query, Entity::Document, Projection::List);
        self.client.call("DocumentsApi::list", method, kwargs).await
    }

    /// Count documents matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "DocumentsApi::count",
                Entity::Document.method("count"),
                query.to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// All documents of a project.
    pub async fn project_documents(
        &self,
        project_id: &str,
        columns: &[&str],
    ) -> Result<RpcResponse<Vec<Document>>> {
        self.list(
            QueryBuilder::new()
                .select(columns.iter().copied())
                .from(Entity::Document)
                .filter(Predicate::eq(fields::PROJECT_ID, project_id)),
        )
        .await
    }

    /// Create a document.
    pub async fn create(&self, params: &DocumentCreate) -> Result<RpcResponse<Document>> {
        self.client
            .call(
                "DocumentsApi::create",
                Entity::Document.method("create"),
                params_kwargs(params)?,
            )
            .await
    }

    /// Update fields of a document.
    pub async fn update(
        &self,
        id: &str,
        changes: Map<String, Value>,
    ) -> Result<RpcResponse<Document>> {
        self.client
            .call(
                "DocumentsApi::update",
                Entity::Document.method("update"),
                update_kwargs(id, changes),
            )
            .await
    }

    /// Delete a document.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: RpcResponse<Value> = self
            .client
            .call(
                "DocumentsApi::delete",
                Entity::Document.method("delete"),
                Kwargs::new().with("id", id),
            )
            .await?;
        Ok(())
    }
}
