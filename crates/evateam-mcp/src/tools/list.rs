//! Sprint and release tools.
//!
//! `eva_list_*` covers both kinds; the `eva_sprint_*` and `eva_release_*`
//! aliases are the same tools pinned to one [`ListKind`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::api::{ListCreate, ListKind};
use evateam_client::entity::fields;
use evateam_client::{EvaClient, Entity, QueryBuilder};

use super::{
    IdInput, LookupInput, UpdateInput, found, id_schema, non_empty, required, update_schema,
};
use crate::error::{Result, ToolError};
use crate::input::{
    CountResult, ListResult, QueryInput, build_query, filter_eq, lookup_schema, query_schema,
};
use crate::tool::{Tool, ToolResult, parse_params};

/// Project, status and kind filters shared by the list and count tools.
#[derive(Debug, Default, Deserialize)]
struct ListFilters {
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    status_type: Option<String>,
    /// `sprint` or `release`.
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl ListFilters {
    /// Apply the filters; a pinned kind overrides the `type` parameter.
    fn apply(
        &self,
        operation: &str,
        query: QueryBuilder,
        pinned: Option<ListKind>,
    ) -> Result<QueryBuilder> {
        let kind = match (pinned, non_empty(&self.kind)) {
            (Some(kind), _) => Some(kind),
            (None, Some(raw)) => Some(ListKind::parse(raw).ok_or_else(|| {
                ToolError::invalid_input(
                    operation,
                    format!("type must be 'sprint' or 'release', got '{}'", raw),
                )
            })?),
            (None, None) => None,
        };

        let query = filter_eq(query, fields::PROJECT_ID, self.project_id.as_deref());
        let query = filter_eq(query, fields::CACHE_STATUS_TYPE, self.status_type.as_deref());
        Ok(match kind {
            Some(kind) => query.filter(kind.predicate()),
            None => query,
        })
    }

    fn schema(pinned: Option<ListKind>) -> Value {
        let mut schema = json!({
            "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"},
            "status_type": {"type": "string", "enum": ["OPEN", "IN_PROGRESS", "CLOSED"]}
        });
        if pinned.is_none() {
            schema["type"] = json!({"type": "string", "enum": ["sprint", "release"]});
        }
        schema
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_list_list / eva_sprint_list / eva_release_list
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ListListInput {
    #[serde(flatten)]
    query: QueryInput,
    #[serde(flatten)]
    filters: ListFilters,
}

/// List sprints and releases, or only one kind.
#[derive(Clone)]
pub struct ListListTool {
    client: EvaClient,
    kind: Option<ListKind>,
}

impl ListListTool {
    /// Sprints and releases.
    pub fn new(client: EvaClient) -> Self {
        Self { client, kind: None }
    }

    /// Only lists of `kind`.
    pub fn of_kind(client: EvaClient, kind: ListKind) -> Self {
        Self {
            client,
            kind: Some(kind),
        }
    }

    fn op(&self) -> &'static str {
        match self.kind {
            None => "list_list",
            Some(ListKind::Sprint) => "sprint_list",
            Some(ListKind::Release) => "release_list",
        }
    }
}

#[async_trait]
impl Tool for ListListTool {
    fn name(&self) -> &str {
        match self.kind {
            None => "eva_list_list",
            Some(ListKind::Sprint) => "eva_sprint_list",
            Some(ListKind::Release) => "eva_release_list",
        }
    }

    fn description(&self) -> &str {
        match self.kind {
            None => "List all lists (sprints and releases) with optional filters",
            Some(ListKind::Sprint) => "List sprints",
            Some(ListKind::Release) => "List releases",
        }
    }

    fn parameters(&self) -> Value {
        query_schema(ListFilters::schema(self.kind))
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let op = self.op();
        let input: ListListInput = parse_params(op, params)?;
        let query = input
            .filters
            .apply(op, build_query(op, Entity::List, &input.query)?, self.kind)?;

        let lists = self
            .client
            .lists()
            .list(query)
            .await
            .map_err(|e| ToolError::wrap(op, e))?;
        ToolResult::from_serialize(op, &ListResult::new(lists.result, input.query.page_limit()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_list_get / eva_sprint_get / eva_release_get
// ─────────────────────────────────────────────────────────────────────────────

/// Get one sprint or release by code or id.
#[derive(Clone)]
pub struct ListGetTool {
    client: EvaClient,
    kind: Option<ListKind>,
}

impl ListGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client, kind: None }
    }

    /// Only finds lists of `kind`; anything else is reported as not found.
    pub fn of_kind(client: EvaClient, kind: ListKind) -> Self {
        Self {
            client,
            kind: Some(kind),
        }
    }

    fn op(&self) -> &'static str {
        match self.kind {
            None => "list_get",
            Some(ListKind::Sprint) => "sprint_get",
            Some(ListKind::Release) => "release_get",
        }
    }
}

#[async_trait]
impl Tool for ListGetTool {
    fn name(&self) -> &str {
        match self.kind {
            None => "eva_list_get",
            Some(ListKind::Sprint) => "eva_sprint_get",
            Some(ListKind::Release) => "eva_release_get",
        }
    }

    fn description(&self) -> &str {
        match self.kind {
            None => "Get a single list (sprint/release) by code or ID",
            Some(ListKind::Sprint) => "Get a single sprint by code (e.g., 'SPR-001543') or ID",
            Some(ListKind::Release) => "Get a single release by code (e.g., 'REL-001641') or ID",
        }
    }

    fn parameters(&self) -> Value {
        match self.kind {
            Some(ListKind::Release) => lookup_schema("REL-001641"),
            _ => lookup_schema("SPR-001543"),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let op = self.op();
        let input: LookupInput = parse_params(op, params)?;
        if let (Some(kind), Some(code)) = (self.kind, non_empty(&input.code))
            && !kind.matches(code)
        {
            return Err(ToolError::invalid_input(
                op,
                format!("{} codes start with {}", kind.as_str(), kind.code_prefix()),
            ));
        }

        let list = self
            .client
            .lists()
            .query(input.to_query(op, Entity::List)?)
            .await
            .map_err(|e| ToolError::wrap(op, e))?;
        // An id lookup can land on the other kind.
        let list = list.result.filter(|list| match self.kind {
            Some(kind) => list.code.as_deref().is_none_or(|code| kind.matches(code)),
            None => true,
        });
        ToolResult::from_serialize(op, &found(op, list)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writes
// ─────────────────────────────────────────────────────────────────────────────

/// Create a sprint or release.
#[derive(Clone)]
pub struct ListCreateTool {
    client: EvaClient,
}

impl ListCreateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListCreateTool {
    fn name(&self) -> &str {
        "eva_list_create"
    }

    fn description(&self) -> &str {
        "Create a new list (sprint/release)"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "parent_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"},
                "code": {"type": "string", "description": "Code, e.g. 'SPR-001543'"},
                "start_date": {"type": "string", "description": "ISO 8601 date"},
                "end_date": {"type": "string", "description": "ISO 8601 date"},
                "goal": {"type": "string"}
            },
            "required": ["name", "parent_id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "list_create";
        let input: ListCreate = parse_params(OP, params)?;
        required(OP, "name", &input.name)?;
        required(OP, "parent_id", &input.parent_id)?;

        let list = self
            .client
            .lists()
            .create(&input)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &list.result)
    }
}

/// Update fields of a sprint or release.
#[derive(Clone)]
pub struct ListUpdateTool {
    client: EvaClient,
}

impl ListUpdateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListUpdateTool {
    fn name(&self) -> &str {
        "eva_list_update"
    }

    fn description(&self) -> &str {
        "Update an existing list (sprint/release)"
    }

    fn parameters(&self) -> Value {
        update_schema("List id (CmfList:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "list_update";
        let input: UpdateInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let list = self
            .client
            .lists()
            .update(id, input.updates)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &list.result)
    }
}

/// Close a sprint or release.
#[derive(Clone)]
pub struct ListCloseTool {
    client: EvaClient,
}

impl ListCloseTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListCloseTool {
    fn name(&self) -> &str {
        "eva_list_close"
    }

    fn description(&self) -> &str {
        "Close a list (sprint/release)"
    }

    fn parameters(&self) -> Value {
        id_schema("List id (CmfList:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "list_close";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let list = self
            .client
            .lists()
            .close(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &list.result)
    }
}

/// Delete a sprint or release.
#[derive(Clone)]
pub struct ListDeleteTool {
    client: EvaClient,
}

impl ListDeleteTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListDeleteTool {
    fn name(&self) -> &str {
        "eva_list_delete"
    }

    fn description(&self) -> &str {
        "Delete a list (sprint/release)"
    }

    fn parameters(&self) -> Value {
        id_schema("List id (CmfList:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "list_delete";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .lists()
            .delete(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

/// Count sprints and releases.
#[derive(Clone)]
pub struct ListCountTool {
    client: EvaClient,
}

impl ListCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListCountTool {
    fn name(&self) -> &str {
        "eva_list_count"
    }

    fn description(&self) -> &str {
        "Count lists (sprints/releases)"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": ListFilters::schema(None)})
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "list_count";
        let input: ListFilters = parse_params(OP, params)?;
        let query = input.apply(OP, QueryBuilder::new().from(Entity::List), None)?;

        let count = self
            .client
            .lists()
            .count(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
