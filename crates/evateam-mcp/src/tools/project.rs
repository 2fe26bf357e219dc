//! Project tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::api::ProjectCreate;
use evateam_client::{EvaClient, Entity};

use super::{IdInput, LookupInput, UpdateInput, found, id_schema, required, update_schema};
use crate::error::{Result, ToolError};
use crate::input::{
    CountResult, ListResult, QueryInput, build_query, lookup_schema, query_schema,
};
use crate::tool::{Tool, ToolResult, parse_params};

/// List projects.
#[derive(Clone)]
pub struct ProjectListTool {
    client: EvaClient,
}

impl ProjectListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectListTool {
    fn name(&self) -> &str {
        "eva_project_list"
    }

    fn description(&self) -> &str {
        "List projects"
    }

    fn parameters(&self) -> Value {
        query_schema(json!({}))
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_list";
        let input: QueryInput = parse_params(OP, params)?;
        let projects = self
            .client
            .projects()
            .list(build_query(OP, Entity::Project, &input)?)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &ListResult::new(projects.result, input.page_limit()))
    }
}

/// Get one project by code or id.
#[derive(Clone)]
pub struct ProjectGetTool {
    client: EvaClient,
}

impl ProjectGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectGetTool {
    fn name(&self) -> &str {
        "eva_project_get"
    }

    fn description(&self) -> &str {
        "Get a single project by code or ID"
    }

    fn parameters(&self) -> Value {
        lookup_schema("PROJ")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_get";
        let input: LookupInput = parse_params(OP, params)?;
        let project = self
            .client
            .projects()
            .query(input.to_query(OP, Entity::Project)?)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, project.result)?)
    }
}

/// Count projects.
#[derive(Clone)]
pub struct ProjectCountTool {
    client: EvaClient,
}

impl ProjectCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectCountTool {
    fn name(&self) -> &str {
        "eva_project_count"
    }

    fn description(&self) -> &str {
        "Count projects"
    }

    fn parameters(&self) -> Value {
        query_schema(json!({}))
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_count";
        let input: QueryInput = parse_params(OP, params)?;
        let count = self
            .client
            .projects()
            .count(build_query(OP, Entity::Project, &input)?)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writes
// ─────────────────────────────────────────────────────────────────────────────

/// Create a project.
#[derive(Clone)]
pub struct ProjectCreateTool {
    client: EvaClient,
}

impl ProjectCreateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectCreateTool {
    fn name(&self) -> &str {
        "eva_project_create"
    }

    fn description(&self) -> &str {
        "Create a new project"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {"type": "string", "description": "Project code, e.g. 'PROJ'"},
                "name": {"type": "string"},
                "text": {"type": "string", "description": "Description (HTML)"},
                "workflow_id": {"type": "string"},
                "executors": {"type": "array", "items": {"type": "string"}},
                "admins": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["code", "name"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_create";
        let input: ProjectCreate = parse_params(OP, params)?;
        required(OP, "code", &input.code)?;
        required(OP, "name", &input.name)?;

        let project = self
            .client
            .projects()
            .create(&input)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &project.result)
    }
}

/// Update fields of a project.
#[derive(Clone)]
pub struct ProjectUpdateTool {
    client: EvaClient,
}

impl ProjectUpdateTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectUpdateTool {
    fn name(&self) -> &str {
        "eva_project_update"
    }

    fn description(&self) -> &str {
        "Update an existing project"
    }

    fn parameters(&self) -> Value {
        update_schema("Project id (CmfProject:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_update";
        let input: UpdateInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;

        let project = self
            .client
            .projects()
            .update(id, input.updates)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &project.result)
    }
}

/// Delete a project.
#[derive(Clone)]
pub struct ProjectDeleteTool {
    client: EvaClient,
}

impl ProjectDeleteTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectDeleteTool {
    fn name(&self) -> &str {
        "eva_project_delete"
    }

    fn description(&self) -> &str {
        "Delete a project"
    }

    fn parameters(&self) -> Value {
        id_schema("Project id (CmfProject:<uuid>)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_delete";
        let input: IdInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        self.client
            .projects()
            .delete(id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eva_project_add_executor / eva_project_remove_executor
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExecutorInput {
    #[serde(default)]
    project_id: String,
    #[serde(default)]
    person_id: String,
}

fn executor_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"},
            "person_id": {"type": "string", "description": "Person id (CmfPerson:<uuid>)"}
        },
        "required": ["project_id", "person_id"]
    })
}

/// Add an executor to a project.
#[derive(Clone)]
pub struct ProjectAddExecutorTool {
    client: EvaClient,
}

impl ProjectAddExecutorTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectAddExecutorTool {
    fn name(&self) -> &str {
        "eva_project_add_executor"
    }

    fn description(&self) -> &str {
        "Add a person to the project's executors"
    }

    fn parameters(&self) -> Value {
        executor_schema()
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_add_executor";
        let input: ExecutorInput = parse_params(OP, params)?;
        let project_id = required(OP, "project_id", &input.project_id)?;
        let person_id = required(OP, "person_id", &input.person_id)?;
        self.client
            .projects()
            .add_executor(project_id, person_id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}

/// Remove an executor from a project.
#[derive(Clone)]
pub struct ProjectRemoveExecutorTool {
    client: EvaClient,
}

impl ProjectRemoveExecutorTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectRemoveExecutorTool {
    fn name(&self) -> &str {
        "eva_project_remove_executor"
    }

    fn description(&self) -> &str {
        "Remove a person from the project's executors"
    }

    fn parameters(&self) -> Value {
        executor_schema()
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "project_remove_executor";
        let input: ExecutorInput = parse_params(OP, params)?;
        let project_id = required(OP, "project_id", &input.project_id)?;
        let person_id = required(OP, "person_id", &input.person_id)?;
        self.client
            .projects()
            .remove_executor(project_id, person_id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        Ok(ToolResult::json(json!({"success": true})))
    }
}
