//! Comment tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, QueryBuilder};

use super::{IdInput, found, id_fields_schema, id_schema, non_empty, required};
use crate::error::{Result, ToolError};
use crate::input::{CountResult, ListResult, QueryInput, build_query, filter_eq, query_schema};
use crate::tool::{Tool, ToolResult, parse_params};

/// Task and author filters shared by the list and count tools.
#[derive(Debug, Default, Deserialize)]
struct CommentFilters {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    task_code: Option<String>,
    #[serde(default)]
    author_id: Option<String>,
}

impl CommentFilters {
    fn apply(&self, query: QueryBuilder) -> QueryBuilder {
        let task_ref = non_empty(&self.task_code).map(|code| format!("{}:{}", Entity::Task, code));
        let query = filter_eq(query, fields::TASK_ID, self.task_id.as_deref());
        let query = filter_eq(query, fields::TASK_ID, task_ref.as_deref());
        filter_eq(query, fields::CMF_AUTHOR_ID, self.author_id.as_deref())
    }

    fn schema() -> Value {
        json!({
            "task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
            "task_code": {"type": "string", "description": "Task code, e.g. 'PROJ-123'"},
            "author_id": {"type": "string", "description": "Person id of the author"}
        })
    }
}

#[derive(Debug, Deserialize)]
struct CommentListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(flatten)]
    filters: CommentFilters,
}

/// List comments.
#[derive(Clone)]
pub struct CommentListTool {
    client: EvaClient,
}

impl CommentListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CommentListTool {
    fn name(&self) -> &str {
        "eva_comment_list"
    }

    fn description(&self) -> &str {
        "List comments, optionally for one task or author"
    }

    fn parameters(&self) -> Value {
        query_schema(CommentFilters::schema())
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "comment_list";
        let input: CommentListInput = parse_params(OP, params)?;
        let query = input
            .filters
            .apply(build_query(OP, Entity::Comment, &input.query)?);

        let comments = self
            .client
            .comments()
            .list(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(
            OP,
            &ListResult::new(comments.result, input.query.page_limit()),
        )
    }
}

#[derive(Debug, Deserialize)]
struct CommentCreateInput {
    #[serde(default)]
    task_id: String,
    #[serde(default)]
    text: String,
}

/// Post a comment on a task.
#[derive(Clone)]
pub struct CommentCreateTool {
    client: EvaClient,
}

impl CommentCreateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CommentCreateTool {
    fn name(&self) -> &str {
        "eva_comment_create"
    }

    fn description(&self) -> &str {
        "Add a comment to a task"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
                "text": {"type": "string"}
            },
            "required": ["task_id", "text"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "comment_create";
        let input: CommentCreateInput = parse_params(OP, params)?;
        let task_id = required(OP, "task_id", &input.task_id)?;
        let text = required(OP, "text", &input.text)?;

        let comment = self
            .client
            .comments()
            .create(task_id, text)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &comment.result)
    }
}

/// Get one comment by id.
#[derive(Clone)]
pub struct CommentGetTool {
    client: EvaClient,
}

impl CommentGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CommentGetTool {
    fn name(&self) -> &str {
        "eva_comment_get"
    }

    fn description(&self) -> &str {
        "Get a single comment by ID"
    }

    fn parameters(&self) -> Value {
        id_fields_schema("Comment id (Comment:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "comment_get";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let comment = self
            .client
            .comments()
            .get(id, &input.columns())
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, comment.result)?)
    }
}

#[derive(Debug, Deserialize)]
struct CommentUpdateInput {
    #[serde(default)]
    id: String,
    #[serde(default)]
    text: String,
}

/// Replace the text of a comment.
#[derive(Clone)]
pub struct CommentUpdateTool {
    client: EvaClient,
}

impl CommentUpdateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CommentUpdateTool {
    fn name(&self) -> &str {
        "eva_comment_update"
    }

    fn description(&self) -> &str {
        "Edit the text of a comment"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "string", "description": "Comment id (Comment:<uuid>)"},
                "text": {"type": "string"}
            },
            "required": ["id", "text"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "comment_update";
        let input: CommentUpdateInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        let text = required(OP, "text", &input.text)?;

        let comment = self
            .client
            .comments()
            .update(id, text)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &comment.result)
    }
}

/// Delete a comment.
#[derive(Clone)]
pub struct CommentDeleteTool {
    client: EvaClient,
}

impl CommentDeleteTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CommentDeleteTool {
    fn name(&self) -> &str {
        "eva_comment_delete"
    }

    fn description(&self) -> &str {
        "Delete a comment"
    }

    fn parameters(&self) -> Value {
        id_schema("Comment id (Comment:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "comment_delete";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .comments()
            .delete(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

/// Count comments.
#[derive(Clone)]
pub struct CommentCountTool {
    client: EvaClient,
}

impl CommentCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CommentCountTool {
    fn name(&self) -> &str {
        "eva_comment_count"
    }

    fn description(&self) -> &str {
        "Count comments, optionally for one task or author"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": CommentFilters::schema()})
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "comment_count";
        let input: CommentFilters = parse_params(OP, params)?;
        let count = self
            .client
            .comments()
            .count(input.apply(QueryBuilder::new().from(Entity::Comment)))
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
