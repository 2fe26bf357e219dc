//! Task tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::api::TaskCreate;
use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, Predicate, QueryBuilder};

use super::{
    IdInput, LookupInput, UpdateInput, found, id_schema, non_empty, required, update_schema,
};
use crate::error::{Result, ToolError};
use crate::input::{CountResult, ListResult, QueryInput, build_query, filter_eq, query_schema};
use crate::tool::{Tool, ToolResult, parse_params};

// ─────────────────────────────────────────────────────────────────────────────
// Shared filters
// ─────────────────────────────────────────────────────────────────────────────

/// Shortcut filters accepted by list and count.
#[derive(Debug, Default, Deserialize)]
struct TaskFilters {
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    status_type: Option<String>,
    #[serde(default)]
    sprint_code: Option<String>,
    #[serde(default)]
    responsible_id: Option<String>,
    #[serde(default)]
    logic_type_id: Option<String>,
}

impl TaskFilters {
    fn apply(&self, query: QueryBuilder) -> QueryBuilder {
        let query = filter_eq(query, fields::PROJECT_ID, self.project_id.as_deref());
        let query = filter_eq(query, fields::CACHE_STATUS_TYPE, self.status_type.as_deref());
        let query = filter_eq(query, fields::RESPONSIBLE_ID, self.responsible_id.as_deref());
        let query = filter_eq(query, "logic_type_id", self.logic_type_id.as_deref());
        match non_empty(&self.sprint_code) {
            Some(sprint) => query.filter(Predicate::contains(fields::LISTS, sprint)),
            None => query,
        }
    }

    fn schema() -> Value {
        json!({
            "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"},
            "status_type": {"type": "string", "enum": ["OPEN", "IN_PROGRESS", "CLOSED"]},
            "sprint_code": {"type": "string", "description": "Sprint or release code, e.g. 'SPR-001543'"},
            "responsible_id": {"type": "string", "description": "Person id (CmfPerson:<uuid>)"},
            "logic_type_id": {"type": "string", "description": "Task type id"}
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_task_list
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TaskListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(flatten)]
    filters: TaskFilters,
}

/// List tasks.
#[derive(Clone)]
pub struct TaskListTool {
    client: EvaClient,
}

impl TaskListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskListTool {
    fn name(&self) -> &str {
        "eva_task_list"
    }

    fn description(&self) -> &str {
        "List tasks with optional filters (project, status, sprint, responsible)"
    }

    fn parameters(&self) -> Value {
        query_schema(TaskFilters::schema())
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_list";
        let input: TaskListInput = parse_params(OP, params)?;
        let query = input.filters.apply(build_query(OP, Entity::Task, &input.query)?);

        let tasks = self
            .client
            .tasks()
            .list(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &ListResult::new(tasks.result, input.query.page_limit()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_task_get
// ─────────────────────────────────────────────────────────────────────────────

/// Get one task by code or id.
#[derive(Clone)]
pub struct TaskGetTool {
    client: EvaClient,
}

impl TaskGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskGetTool {
    fn name(&self) -> &str {
        "eva_task_get"
    }

    fn description(&self) -> &str {
        "Get a single task by code (e.g., 'PROJ-123') or ID"
    }

    fn parameters(&self) -> Value {
        crate::input::lookup_schema("PROJ-123")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_get";
        let input: LookupInput = parse_params(OP, params)?;
        let task = self
            .client
            .tasks()
            .query(input.to_query(OP, Entity::Task)?)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, task.result)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_task_count
// ─────────────────────────────────────────────────────────────────────────────

/// Count tasks.
#[derive(Clone)]
pub struct TaskCountTool {
    client: EvaClient,
}

impl TaskCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskCountTool {
    fn name(&self) -> &str {
        "eva_task_count"
    }

    fn description(&self) -> &str {
        "Count tasks matching filters"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": TaskFilters::schema()})
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_count";
        let filters: TaskFilters = parse_params(OP, params)?;
        let count = self
            .client
            .tasks()
            .count(filters.apply(QueryBuilder::new().from(Entity::Task)))
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_task_create
// ─────────────────────────────────────────────────────────────────────────────

/// Create a task.
#[derive(Clone)]
pub struct TaskCreateTool {
    client: EvaClient,
}

impl TaskCreateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskCreateTool {
    fn name(&self) -> &str {
        "eva_task_create"
    }

    fn description(&self) -> &str {
        "Create a new task"
    }

    fn parameters(&self) -> Value {
        let ids = json!({"type": "array", "items": {"type": "string"}});
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "project_id": {"type": "string"},
                "text": {"type": "string", "description": "Description (HTML)"},
                "priority": {"type": "integer"},
                "deadline": {"type": "string"},
                "responsible": {"type": "string"},
                "executors": ids,
                "tags": ids,
                "lists": ids,
                "epic_id": {"type": "string"},
                "logic_type_id": {"type": "string"}
            },
            "required": ["name", "project_id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_create";
        let input: TaskCreate = parse_params(OP, params)?;
        required(OP, "name", &input.name)?;
        required(OP, "project_id", &input.project_id)?;

        let task = self
            .client
            .tasks()
            .create(&input)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &task.result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_task_update
// ─────────────────────────────────────────────────────────────────────────────

/// Update fields of a task.
#[derive(Clone)]
pub struct TaskUpdateTool {
    client: EvaClient,
}

impl TaskUpdateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskUpdateTool {
    fn name(&self) -> &str {
        "eva_task_update"
    }

    fn description(&self) -> &str {
        "Update an existing task"
    }

    fn parameters(&self) -> Value {
        update_schema("Task id (CmfTask:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_update";
        let input: UpdateInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let task = self
            .client
            .tasks()
            .update(id, input.updates)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &task.result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_task_update_status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TaskUpdateStatusInput {
    #[serde(default)]
    id: String,
    #[serde(default)]
    status: String,
}

/// Move a task to another status.
#[derive(Clone)]
pub struct TaskUpdateStatusTool {
    client: EvaClient,
}

impl TaskUpdateStatusTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskUpdateStatusTool {
    fn name(&self) -> &str {
        "eva_task_update_status"
    }

    fn description(&self) -> &str {
        "Update task status (OPEN, IN_PROGRESS, CLOSED)"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "string"},
                "status": {"type": "string", "enum": ["OPEN", "IN_PROGRESS", "CLOSED"]}
            },
            "required": ["id", "status"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_update_status";
        let input: TaskUpdateStatusInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        let status = required(OP, "status", &input.status)?;

        let task = self
            .client
            .tasks()
            .update_status(id, status)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &task.result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_task_delete / eva_task_archive
// ─────────────────────────────────────────────────────────────────────────────

/// Delete a task.
#[derive(Clone)]
pub struct TaskDeleteTool {
    client: EvaClient,
}

impl TaskDeleteTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskDeleteTool {
    fn name(&self) -> &str {
        "eva_task_delete"
    }

    fn description(&self) -> &str {
        "Delete a task"
    }

    fn parameters(&self) -> Value {
        id_schema("Task id (CmfTask:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_delete";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .tasks()
            .delete(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

/// Archive a task.
#[derive(Clone)]
pub struct TaskArchiveTool {
    client: EvaClient,
}

impl TaskArchiveTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TaskArchiveTool {
    fn name(&self) -> &str {
        "eva_task_archive"
    }

    fn description(&self) -> &str {
        "Archive a task (soft delete)"
    }

    fn parameters(&self) -> Value {
        id_schema("Task id (CmfTask:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "task_archive";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .tasks()
            .archive(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}
