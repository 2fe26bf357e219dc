//! Task link tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::api::LinkDirection;
use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, Predicate, QueryBuilder};

use super::{IdInput, found, id_fields_schema, id_schema, non_empty, required};
use crate::error::{Result, ToolError};
use crate::input::{CountResult, ListResult, QueryInput, build_query, query_schema};
use crate::tool::{Tool, ToolResult, parse_params};

/// Optional task and direction; without a task, links are not narrowed.
#[derive(Debug, Default, Deserialize)]
struct TaskLinkFilters {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    direction: Option<String>,
}

impl TaskLinkFilters {
    fn direction(&self, operation: &str) -> Result<LinkDirection> {
        let raw = self.direction.as_deref().unwrap_or_default();
        LinkDirection::parse(raw).ok_or_else(|| {
            ToolError::invalid_input(
                operation,
                format!("direction must be outgoing, incoming or both, got '{}'", raw),
            )
        })
    }

    fn schema() -> Value {
        json!({
            "task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
            "direction": {
                "type": "string",
                "enum": ["outgoing", "incoming", "both"],
                "description": "Side of the link the task is on (default both)"
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct TaskLinkListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(flatten)]
    filters: TaskLinkFilters,
}

/// List task links.
#[derive(Clone)]
pub struct TaskLinkListTool {
    client: EvaClient,
}

impl TaskLinkListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskLinkListTool {
    fn name(&self) -> &str {
        "eva_tasklink_list"
    }

    fn description(&self) -> &str {
        "List task links, optionally for one task in one direction"
    }

    fn parameters(&self) -> Value {
        query_schema(TaskLinkFilters::schema())
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "tasklink_list";
        let input: TaskLinkListInput = parse_params(OP, params)?;
        let direction = input.filters.direction(OP)?;
        let links = self.client.task_links();

        let result = match non_empty(&input.filters.task_id) {
            None => {
                let links = links
                    .list(build_query(OP, Entity::Relation, &input.query)?)
                    .await
                    .map_err(|e| ToolError::wrap(OP, e))?;
                ListResult::new(links.result, input.query.page_limit())
            }
            Some(task_id) => {
                let columns: Vec<&str> = input.query.fields.iter().map(String::as_str).collect();
                let links = links
                    .for_task(task_id, direction, &columns)
                    .await
                    .map_err(|e| ToolError::wrap(OP, e))?;
                ListResult::new(links.result, None)
            }
        };
        ToolResult::from_serialize(OP, &result)
    }
}

/// Get one task link.
#[derive(Clone)]
pub struct TaskLinkGetTool {
    client: EvaClient,
}

impl TaskLinkGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskLinkGetTool {
    fn name(&self) -> &str {
        "eva_tasklink_get"
    }

    fn description(&self) -> &str {
        "Get a single task link by ID"
    }

    fn parameters(&self) -> Value {
        id_fields_schema("Link id (CmfRelationOption:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "tasklink_get";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let link = self
            .client
            .task_links()
            .get(id, &input.columns())
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, link.result)?)
    }
}

#[derive(Debug, Deserialize)]
struct TaskLinkCreateInput {
    #[serde(default)]
    source_task_id: String,
    #[serde(default)]
    target_task_id: String,
    #[serde(default)]
    relation_option_id: String,
}

/// Link two tasks.
#[derive(Clone)]
pub struct TaskLinkCreateTool {
    client: EvaClient,
}

impl TaskLinkCreateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskLinkCreateTool {
    fn name(&self) -> &str {
        "eva_tasklink_create"
    }

    fn description(&self) -> &str {
        "Create a link between two tasks"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "source_task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
                "target_task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
                "relation_option_id": {"type": "string", "description": "Kind of relation"}
            },
            "required": ["source_task_id", "target_task_id", "relation_option_id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "tasklink_create";
        let input: TaskLinkCreateInput = parse_params(OP, params)?;
        let source = required(OP, "source_task_id", &input.source_task_id)?;
        let target = required(OP, "target_task_id", &input.target_task_id)?;
        let relation = required(OP, "relation_option_id", &input.relation_option_id)?;

        let link = self
            .client
            .task_links()
            .create(source, target, relation)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &link.result)
    }
}

/// Delete a task link.
#[derive(Clone)]
pub struct TaskLinkDeleteTool {
    client: EvaClient,
}

impl TaskLinkDeleteTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskLinkDeleteTool {
    fn name(&self) -> &str {
        "eva_tasklink_delete"
    }

    fn description(&self) -> &str {
        "Delete a task link"
    }

    fn parameters(&self) -> Value {
        id_schema("Link id (CmfRelationOption:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "tasklink_delete";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .task_links()
            .delete(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

/// Count task links.
#[derive(Clone)]
pub struct TaskLinkCountTool {
    client: EvaClient,
}

impl TaskLinkCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskLinkCountTool {
    fn name(&self) -> &str {
        "eva_tasklink_count"
    }

    fn description(&self) -> &str {
        "Count task links, optionally for one task in one direction"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": TaskLinkFilters::schema()})
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "tasklink_count";
        let input: TaskLinkFilters = parse_params(OP, params)?;
        let direction = input.direction(OP)?;
        let links = self.client.task_links();
        let query = QueryBuilder::new().from(Entity::Relation);

        let count = match (non_empty(&input.task_id), direction) {
            (None, _) => links.count(query).await,
            (Some(task_id), LinkDirection::Outgoing) => {
                links
                    .count(query.filter(Predicate::eq(fields::SOURCE_ID, task_id)))
                    .await
            }
            (Some(task_id), LinkDirection::Incoming) => {
                links
                    .count(query.filter(Predicate::eq(fields::TARGET_ID, task_id)))
                    .await
            }
            // Links on both sides are deduplicated client-side.
            (Some(task_id), LinkDirection::Both) => links
                .for_task(task_id, direction, &[fields::ID])
                .await
                .map(|links| links.result.len() as u64),
        }
        .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
