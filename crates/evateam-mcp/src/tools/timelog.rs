//! Time log tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::api::TimeLogCreate;
use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, QueryBuilder};

use super::{IdInput, UpdateInput, found, id_fields_schema, id_schema, required, update_schema};
use crate::error::{Result, ToolError};
use crate::input::{CountResult, ListResult, QueryInput, build_query, filter_eq, query_schema};
use crate::tool::{Tool, ToolResult, parse_params};

/// Task, person and project filters.
#[derive(Debug, Default, Deserialize)]
struct TimeLogFilters {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    project_id: Option<String>,
}

impl TimeLogFilters {
    fn apply(&self, query: QueryBuilder) -> QueryBuilder {
        let query = filter_eq(query, fields::PARENT_ID, self.task_id.as_deref());
        let query = filter_eq(query, fields::CMF_OWNER_ID, self.user_id.as_deref());
        filter_eq(query, fields::PARENT_PROJECT_ID, self.project_id.as_deref())
    }

    fn schema() -> Value {
        json!({
            "task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
            "user_id": {"type": "string", "description": "Person id of whoever logged the time"},
            "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"}
        })
    }
}

#[derive(Debug, Deserialize)]
struct TimeLogListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(flatten)]
    filters: TimeLogFilters,
}

/// List time log entries.
#[derive(Clone)]
pub struct TimeLogListTool {
    client: EvaClient,
}

impl TimeLogListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimeLogListTool {
    fn name(&self) -> &str {
        "eva_timelog_list"
    }

    fn description(&self) -> &str {
        "List time log entries, optionally by task, person or project"
    }

    fn parameters(&self) -> Value {
        query_schema(TimeLogFilters::schema())
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "timelog_list";
        let input: TimeLogListInput = parse_params(OP, params)?;
        let query = input
            .filters
            .apply(build_query(OP, Entity::TimeLog, &input.query)?);

        let logs = self
            .client
            .time_logs()
            .list(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &ListResult::new(logs.result, input.query.page_limit()))
    }
}

/// Get one time log entry.
#[derive(Clone)]
pub struct TimeLogGetTool {
    client: EvaClient,
}

impl TimeLogGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimeLogGetTool {
    fn name(&self) -> &str {
        "eva_timelog_get"
    }

    fn description(&self) -> &str {
        "Get a single time log entry by ID"
    }

    fn parameters(&self) -> Value {
        id_fields_schema("Time log id (CmfTimeTrackerHistory:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "timelog_get";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let log = self
            .client
            .time_logs()
            .get(id, &input.columns())
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, log.result)?)
    }
}

#[derive(Debug, Deserialize)]
struct TimeLogCreateInput {
    #[serde(default)]
    task_id: String,
    #[serde(default)]
    time_spent: i64,
}

/// Log time on a task.
#[derive(Clone)]
pub struct TimeLogCreateTool {
    client: EvaClient,
}

impl TimeLogCreateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimeLogCreateTool {
    fn name(&self) -> &str {
        "eva_timelog_create"
    }

    fn description(&self) -> &str {
        "Log time spent on a task"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
                "time_spent": {"type": "integer", "minimum": 1, "description": "Minutes"}
            },
            "required": ["task_id", "time_spent"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "timelog_create";
        let input: TimeLogCreateInput = parse_params(OP, params)?;
        let task_id = required(OP, "task_id", &input.task_id)?;
        if input.time_spent <= 0 {
            return Err(ToolError::invalid_input(OP, "time_spent must be positive"));
        }

        let log = self
            .client
            .time_logs()
            .create(&TimeLogCreate {
                parent_id: task_id.to_string(),
                time_spent: input.time_spent,
            })
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &log.result)
    }
}

/// Update a time log entry.
#[derive(Clone)]
pub struct TimeLogUpdateTool {
    client: EvaClient,
}

impl TimeLogUpdateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimeLogUpdateTool {
    fn name(&self) -> &str {
        "eva_timelog_update"
    }

    fn description(&self) -> &str {
        "Update an existing time log entry"
    }

    fn parameters(&self) -> Value {
        update_schema("Time log id (CmfTimeTrackerHistory:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "timelog_update";
        let input: UpdateInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let log = self
            .client
            .time_logs()
            .update(id, input.updates)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &log.result)
    }
}

/// Delete a time log entry.
#[derive(Clone)]
pub struct TimeLogDeleteTool {
    client: EvaClient,
}

impl TimeLogDeleteTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimeLogDeleteTool {
    fn name(&self) -> &str {
        "eva_timelog_delete"
    }

    fn description(&self) -> &str {
        "Delete a time log entry"
    }

    fn parameters(&self) -> Value {
        id_schema("Time log id (CmfTimeTrackerHistory:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "timelog_delete";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .time_logs()
            .delete(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

/// Count time log entries.
#[derive(Clone)]
pub struct TimeLogCountTool {
    client: EvaClient,
}

impl TimeLogCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimeLogCountTool {
    fn name(&self) -> &str {
        "eva_timelog_count"
    }

    fn description(&self) -> &str {
        "Count time log entries"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": TimeLogFilters::schema()})
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "timelog_count";
        let input: TimeLogFilters = parse_params(OP, params)?;
        let count = self
            .client
            .time_logs()
            .count(input.apply(QueryBuilder::new().from(Entity::TimeLog)))
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
