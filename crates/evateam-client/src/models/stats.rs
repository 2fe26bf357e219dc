use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Task;
use crate::entity::status;

/// Task and sprint totals of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub project_id: String,
    pub total_tasks: u64,
    pub open_tasks: u64,
    pub active_sprints: u64,
}

/// Task totals of one sprint, tallied client-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SprintStats {
    pub sprint_code: String,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub total_story_points: f64,
    pub completed_story_points: f64,
    /// Task count per `cache_status_type`; tasks without one count as `UNKNOWN`.
    pub tasks_by_status: BTreeMap<String, u64>,
}

impl SprintStats {
    /// Tally the tasks of a sprint.
    pub fn from_tasks(sprint_code: impl Into<String>, tasks: &[Task]) -> Self {
        let mut stats = SprintStats {
            sprint_code: sprint_code.into(),
            ..SprintStats::default()
        };
        for task in tasks {
            let points = task.agile_story_points.unwrap_or(0.0);
            stats.total_tasks += 1;
            stats.total_story_points += points;
            if task.is_closed() {
                stats.completed_tasks += 1;
                stats.completed_story_points += points;
            }
            let status = task.cache_status_type.as_deref().unwrap_or("UNKNOWN");
            *stats.tasks_by_status.entry(status.to_string()).or_default() += 1;
        }
        stats
    }

    /// Share of closed tasks, `0.0` for an empty sprint.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_tasks == 0 {
            0.0
        } else {
            self.completed_tasks as f64 / self.total_tasks as f64
        }
    }
}
