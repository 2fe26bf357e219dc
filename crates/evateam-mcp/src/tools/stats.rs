//! Statistics tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::EvaClient;

use super::required;
use crate::error::{Result, ToolError};
use crate::tool::{Tool, ToolResult, parse_params};

#[derive(Debug, Deserialize)]
struct ProjectStatsInput {
    #[serde(default)]
    project_id: String,
}

/// Task and sprint totals of a project.
#[derive(Clone)]
pub struct ProjectStatsTool {
    client: EvaClient,
}

impl ProjectStatsTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProjectStatsTool {
    fn name(&self) -> &str {
        "eva_stats_project"
    }

    fn description(&self) -> &str {
        "Get project statistics (total tasks, open tasks, active sprints)"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_id": {"type": "string", "description": "Project id (CmfProject:<uuid>)"}
            },
            "required": ["project_id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "stats_project";
        let input: ProjectStatsInput = parse_params(OP, params)?;
        let project_id = required(OP, "project_id", &input.project_id)?;

        let stats = self
            .client
            .stats()
            .project_stats(project_id)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &stats)
    }
}

#[derive(Debug, Deserialize)]
struct SprintStatsInput {
    #[serde(default)]
    sprint_code: String,
}

/// Task and story point totals of a sprint.
#[derive(Clone)]
pub struct SprintStatsTool {
    client: EvaClient,
}

impl SprintStatsTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SprintStatsTool {
    fn name(&self) -> &str {
        "eva_stats_sprint"
    }

    fn description(&self) -> &str {
        "Get sprint statistics (total tasks, tasks by status, story points)"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sprint_code": {"type": "string", "description": "Sprint code, e.g. 'SPR-001543'"}
            },
            "required": ["sprint_code"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "stats_sprint";
        let input: SprintStatsInput = parse_params(OP, params)?;
        let sprint_code = required(OP, "sprint_code", &input.sprint_code)?;

        let stats = self
            .client
            .stats()
            .sprint_stats(sprint_code)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &stats)
    }
}
