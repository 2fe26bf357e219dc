//! Status history tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, QueryBuilder};

use super::{IdInput, found, id_fields_schema, required};
use crate::error::{Result, ToolError};
use crate::input::{CountResult, ListResult, QueryInput, build_query, filter_eq, query_schema};
use crate::tool::{Tool, ToolResult, parse_params};

#[derive(Debug, Default, Deserialize)]
struct StatusHistoryFilters {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    project_id: Option<String>,
}

impl StatusHistoryFilters {
    fn apply(&self, query: QueryBuilder) -> QueryBuilder {
        let query = filter_eq(query, fields::PARENT_ID, self.task_id.as_deref());
        filter_eq(query, fields::PROJECT_ID, self.project_id.as_deref())
    }

    fn schema() -> Value {
        json!({
            "task_id": {"type": "string", "description": "Task id (CmfTask:<uuid>)"},
            "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"}
        })
    }
}

#[derive(Debug, Deserialize)]
struct StatusHistoryListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(flatten)]
    filters: StatusHistoryFilters,
}

/// List status transitions.
#[derive(Clone)]
pub struct StatusHistoryListTool {
    client: EvaClient,
}

impl StatusHistoryListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for StatusHistoryListTool {
    fn name(&self) -> &str {
        "eva_statushistory_list"
    }

    fn description(&self) -> &str {
        "List status history entries, optionally for one task or project"
    }

    fn parameters(&self) -> Value {
        query_schema(StatusHistoryFilters::schema())
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "statushistory_list";
        let input: StatusHistoryListInput = parse_params(OP, params)?;
        let query = input
            .filters
            .apply(build_query(OP, Entity::StatusHistory, &input.query)?);

        let history = self
            .client
            .status_history()
            .list(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(
            OP,
            &ListResult::new(history.result, input.query.page_limit()),
        )
    }
}

/// Get one status transition.
#[derive(Clone)]
pub struct StatusHistoryGetTool {
    client: EvaClient,
}

impl StatusHistoryGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for StatusHistoryGetTool {
    fn name(&self) -> &str {
        "eva_statushistory_get"
    }

    fn description(&self) -> &str {
        "Get a single status history entry by ID"
    }

    fn parameters(&self) -> Value {
        id_fields_schema("Entry id (CmfStatusHistory:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "statushistory_get";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let entry = self
            .client
            .status_history()
            .get(id, &input.columns())
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, entry.result)?)
    }
}

/// Count status transitions.
#[derive(Clone)]
pub struct StatusHistoryCountTool {
    client: EvaClient,
}

impl StatusHistoryCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for StatusHistoryCountTool {
    fn name(&self) -> &str {
        "eva_statushistory_count"
    }

    fn description(&self) -> &str {
        "Count status history entries"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": StatusHistoryFilters::schema()})
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "statushistory_count";
        let input: StatusHistoryFilters = parse_params(OP, params)?;
        let count = self
            .client
            .status_history()
            .count(input.apply(QueryBuilder::new().from(Entity::StatusHistory)))
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
