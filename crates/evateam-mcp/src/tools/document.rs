//! Document tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::api::DocumentCreate;
use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, QueryBuilder};

use super::{IdInput, LookupInput, UpdateInput, found, id_schema, required, update_schema};
use crate::error::{Result, ToolError};
use crate::input::{
    CountResult, ListResult, QueryInput, build_query, filter_eq, lookup_schema, query_schema,
};
use crate::tool::{Tool, ToolResult, parse_params};

#[derive(Debug, Deserialize)]
struct DocumentListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(default)]
    project_id: Option<String>,
}

/// List documents.
#[derive(Clone)]
pub struct DocumentListTool {
    client: EvaClient,
}

impl DocumentListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DocumentListTool {
    fn name(&self) -> &str {
        "eva_document_list"
    }

    fn description(&self) -> &str {
        "List documents"
    }

    fn parameters(&self) -> Value {
        query_schema(json!({
            "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"}
        }))
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "document_list";
        let input: DocumentListInput = parse_params(OP, params)?;
        let query = build_query(OP, Entity::Document, &input.query)?;
        let query = filter_eq(query, fields::PROJECT_ID, input.project_id.as_deref());

        let docs = self
            .client
            .documents()
            .list(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &ListResult::new(docs.result, input.query.page_limit()))
    }
}

/// Get one document by code or id.
#[derive(Clone)]
pub struct DocumentGetTool {
    client: EvaClient,
}

impl DocumentGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DocumentGetTool {
    fn name(&self) -> &str {
        "eva_document_get"
    }

    fn description(&self) -> &str {
        "Get a single document by code or ID"
    }

    fn parameters(&self) -> Value {
        lookup_schema("DOC-000123")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "document_get";
        let input: LookupInput = parse_params(OP, params)?;
        let doc = self
            .client
            .documents()
            .query(input.to_query(OP, Entity::Document)?)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, doc.result)?)
    }
}

/// Create a document.
#[derive(Clone)]
pub struct DocumentCreateTool {
    client: EvaClient,
}

impl DocumentCreateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DocumentCreateTool {
    fn name(&self) -> &str {
        "eva_document_create"
    }

    fn description(&self) -> &str {
        "Create a new document"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "project_id": {"type": "string"},
                "text": {"type": "string", "description": "Body (HTML)"},
                "parent_id": {"type": "string", "description": "Parent document id"}
            },
            "required": ["name", "project_id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "document_create";
        let input: DocumentCreate = parse_params(OP, params)?;
        required(OP, "name", &input.name)?;
        required(OP, "project_id", &input.project_id)?;

        let doc = self
            .client
            .documents()
            .create(&input)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &doc.result)
    }
}

/// Update fields of a document.
#[derive(Clone)]
pub struct DocumentUpdateTool {
    client: EvaClient,
}

impl DocumentUpdateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DocumentUpdateTool {
    fn name(&self) -> &str {
        "eva_document_update"
    }

    fn description(&self) -> &str {
        "Update an existing document"
    }

    fn parameters(&self) -> Value {
        update_schema("Document id (CmfDocument:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "document_update";
        let input: UpdateInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let doc = self
            .client
            .documents()
            .update(id, input.updates)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &doc.result)
    }
}

/// Delete a document.
#[derive(Clone)]
pub struct DocumentDeleteTool {
    client: EvaClient,
}

impl DocumentDeleteTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DocumentDeleteTool {
    fn name(&self) -> &str {
        "eva_document_delete"
    }

    fn description(&self) -> &str {
        "Delete a document"
    }

    fn parameters(&self) -> Value {
        id_schema("Document id (CmfDocument:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "document_delete";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .documents()
            .delete(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

#[derive(Debug, Default, Deserialize)]
struct DocumentCountInput {
    #[serde(default)]
    project_id: Option<String>,
}

/// Count documents.
#[derive(Clone)]
pub struct DocumentCountTool {
    client: EvaClient,
}

impl DocumentCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DocumentCountTool {
    fn name(&self) -> &str {
        "eva_document_count"
    }

    fn description(&self) -> &str {
        "Count documents, optionally in one project"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"}
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "document_count";
        let input: DocumentCountInput = parse_params(OP, params)?;
        let query = filter_eq(
            QueryBuilder::new().from(Entity::Document),
            fields::PROJECT_ID,
            input.project_id.as_deref(),
        );

        let count = self
            .client
            .documents()
            .count(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
