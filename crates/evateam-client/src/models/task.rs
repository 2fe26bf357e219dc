use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Ref;

/// A task (`CmfTask`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description (HTML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Sprints and releases the task belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_for: Option<Ref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executors: Vec<Ref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spectators: Vec<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<Ref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Ref>,
    /// `OPEN`, `IN_PROGRESS` or `CLOSED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_status_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agile_story_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_modified_at: Option<String>,
    #[serde(default)]
    pub cmf_deleted: bool,
    /// Projected fields not modelled above (custom fields, `fix_versions`, ...).
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Task {
    /// Whether the task is in a closed status.
    pub fn is_closed(&self) -> bool {
        self.cache_status_type.as_deref() == Some(crate::entity::status::CLOSED)
    }
}
