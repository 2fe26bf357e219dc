//! Aggregate statistics built from counts and listings.

use super::lists::{ListKind, project_query};
use crate::client::EvaClient;
use crate::entity::{Entity, fields, status};
use crate::error::Result;
use crate::models::{ProjectStats, SprintStats};
use crate::predicate::Predicate;
use crate::query::QueryBuilder;

/// Columns needed to tally a sprint.
const SPRINT_TASK_COLUMNS: &[&str] = &[
    fields::ID,
    fields::CACHE_STATUS_TYPE,
    fields::AGILE_STORY_POINTS,
];

/// Statistics API client.
pub struct StatsApi {
    client: EvaClient,
}

impl StatsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Task and active sprint totals of a project.
    ///
    /// Issues three count calls; the first failure is returned.
    pub async fn project_stats(&self, project_id: &str) -> Result<ProjectStats> {
        let tasks = QueryBuilder::new()
            .from(Entity::Task)
            .filter(Predicate::eq(fields::PROJECT_ID, project_id));
        let total_tasks = self.client.tasks().count(tasks.clone()).await?;
        let open_tasks = self
            .client
            .tasks()
            .count(tasks.filter(Predicate::eq(fields::CACHE_STATUS_TYPE, status::OPEN)))
            .await?;
        let active_sprints = self
            .client
            .lists()
            .count(project_query(project_id, Some(ListKind::Sprint), true))
            .await?;

        tracing::debug!(project_id, total_tasks, open_tasks, active_sprints, "project stats");
        Ok(ProjectStats {
            project_id: project_id.to_string(),
            total_tasks,
            open_tasks,
            active_sprints,
        })
    }

    /// Task and story point totals of a sprint.
    pub async fn sprint_stats(&self, sprint_code: &str) -> Result<SprintStats> {
        let tasks = self
            .client
            .tasks()
            .sprint_tasks(sprint_code, SPRINT_TASK_COLUMNS)
            .await?;
        Ok(SprintStats::from_tasks(sprint_code, &tasks.result))
    }
}
