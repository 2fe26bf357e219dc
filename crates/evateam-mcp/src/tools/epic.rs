//! Epic tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, QueryBuilder};

use super::{LookupInput, found};
use crate::error::{Result, ToolError};
use crate::input::{
    CountResult, ListResult, QueryInput, build_query, filter_eq, lookup_schema, query_schema,
};
use crate::tool::{Tool, ToolResult, parse_params};

#[derive(Debug, Default, Deserialize)]
struct EpicFilters {
    #[serde(default)]
    project_id: Option<String>,
}

fn project_schema() -> Value {
    json!({
        "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"}
    })
}

#[derive(Debug, Deserialize)]
struct EpicListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(flatten)]
    filters: EpicFilters,
}

/// List epics.
#[derive(Clone)]
pub struct EpicListTool {
    client: EvaClient,
}

impl EpicListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for EpicListTool {
    fn name(&self) -> &str {
        "eva_epic_list"
    }

    fn description(&self) -> &str {
        "List epics"
    }

    fn parameters(&self) -> Value {
        query_schema(project_schema())
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "epic_list";
        let input: EpicListInput = parse_params(OP, params)?;
        let query = build_query(OP, Entity::Task, &input.query)?;
        let query = filter_eq(query, fields::PROJECT_ID, input.filters.project_id.as_deref());

        let epics = self
            .client
            .epics()
            .list(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &ListResult::new(epics.result, input.query.page_limit()))
    }
}

/// Get one epic by code or id.
#[derive(Clone)]
pub struct EpicGetTool {
    client: EvaClient,
}

impl EpicGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for EpicGetTool {
    fn name(&self) -> &str {
        "eva_epic_get"
    }

    fn description(&self) -> &str {
        "Get a single epic by code or ID"
    }

    fn parameters(&self) -> Value {
        lookup_schema("PROJ-12")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "epic_get";
        let input: LookupInput = parse_params(OP, params)?;
        let epic = self
            .client
            .epics()
            .query(input.to_query(OP, Entity::Task)?)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, epic.result)?)
    }
}

/// Count epics.
#[derive(Clone)]
pub struct EpicCountTool {
    client: EvaClient,
}

impl EpicCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for EpicCountTool {
    fn name(&self) -> &str {
        "eva_epic_count"
    }

    fn description(&self) -> &str {
        "Count epics"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": project_schema()})
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "epic_count";
        let input: EpicFilters = parse_params(OP, params)?;
        let query = filter_eq(
            QueryBuilder::new(),
            fields::PROJECT_ID,
            input.project_id.as_deref(),
        );

        let count = self
            .client
            .epics()
            .count(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
