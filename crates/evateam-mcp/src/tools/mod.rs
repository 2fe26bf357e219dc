//! EVA Team tools.
//!
//! One struct per tool, each holding a clone of the shared [`EvaClient`].

mod comment;
mod document;
mod epic;
mod list;
mod person;
mod project;
mod stats;
mod statushistory;
mod task;
mod tasklink;
mod timelog;

pub use comment::{
    CommentCountTool, CommentCreateTool, CommentDeleteTool, CommentGetTool, CommentListTool,
    CommentUpdateTool,
};
pub use document::{
    DocumentCountTool, DocumentCreateTool, DocumentDeleteTool, DocumentGetTool, DocumentListTool,
    DocumentUpdateTool,
};
pub use epic::{EpicCountTool, EpicGetTool, EpicListTool};
pub use list::{
    ListCloseTool, ListCountTool, ListCreateTool, ListDeleteTool, ListGetTool, ListListTool,
    ListUpdateTool,
};
pub use person::{PersonCountTool, PersonCurrentTool, PersonGetTool, PersonListTool};
pub use project::{
    ProjectAddExecutorTool, ProjectCountTool, ProjectCreateTool, ProjectDeleteTool,
    ProjectGetTool, ProjectListTool, ProjectRemoveExecutorTool, ProjectUpdateTool,
};
pub use stats::{ProjectStatsTool, SprintStatsTool};
pub use statushistory::{StatusHistoryCountTool, StatusHistoryGetTool, StatusHistoryListTool};
pub use task::{
    TaskArchiveTool, TaskCountTool, TaskCreateTool, TaskDeleteTool, TaskGetTool, TaskListTool,
    TaskUpdateStatusTool, TaskUpdateTool,
};
pub use tasklink::{
    TaskLinkCountTool, TaskLinkCreateTool, TaskLinkDeleteTool, TaskLinkGetTool, TaskLinkListTool,
};
pub use timelog::{
    TimeLogCountTool, TimeLogCreateTool, TimeLogDeleteTool, TimeLogGetTool, TimeLogListTool,
    TimeLogUpdateTool,
};

use serde::Deserialize;
use serde_json::{Map, Value, json};

use evateam_client::api::ListKind;
use evateam_client::{EvaClient, Entity, Predicate, QueryBuilder};

use crate::error::{Result, ToolError};
use crate::tool::ToolRegistry;

/// Registry with every EVA Team tool bound to `client`.
pub fn default_registry(client: EvaClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(TaskListTool::new(client.clone()));
    registry.register(TaskGetTool::new(client.clone()));
    registry.register(TaskCountTool::new(client.clone()));
    registry.register(TaskCreateTool::new(client.clone()));
    registry.register(TaskUpdateTool::new(client.clone()));
    registry.register(TaskUpdateStatusTool::new(client.clone()));
    registry.register(TaskDeleteTool::new(client.clone()));
    registry.register(TaskArchiveTool::new(client.clone()));

    registry.register(ProjectListTool::new(client.clone()));
    registry.register(ProjectGetTool::new(client.clone()));
    registry.register(ProjectCountTool::new(client.clone()));
    registry.register(ProjectCreateTool::new(client.clone()));
    registry.register(ProjectUpdateTool::new(client.clone()));
    registry.register(ProjectDeleteTool::new(client.clone()));
    registry.register(ProjectAddExecutorTool::new(client.clone()));
    registry.register(ProjectRemoveExecutorTool::new(client.clone()));

    registry.register(ListListTool::new(client.clone()));
    registry.register(ListGetTool::new(client.clone()));
    registry.register(ListCountTool::new(client.clone()));
    registry.register(ListCreateTool::new(client.clone()));
    registry.register(ListUpdateTool::new(client.clone()));
    registry.register(ListCloseTool::new(client.clone()));
    registry.register(ListDeleteTool::new(client.clone()));
    registry.register(ListListTool::of_kind(client.clone(), ListKind::Sprint));
    registry.register(ListGetTool::of_kind(client.clone(), ListKind::Sprint));
    registry.register(ListListTool::of_kind(client.clone(), ListKind::Release));
    registry.register(ListGetTool::of_kind(client.clone(), ListKind::Release));

    registry.register(EpicListTool::new(client.clone()));
    registry.register(EpicGetTool::new(client.clone()));
    registry.register(EpicCountTool::new(client.clone()));

    registry.register(PersonListTool::new(client.clone()));
    registry.register(PersonGetTool::new(client.clone()));
    registry.register(PersonCountTool::new(client.clone()));
    registry.register(PersonCurrentTool::new(client.clone()));

    registry.register(DocumentListTool::new(client.clone()));
    registry.register(DocumentGetTool::new(client.clone()));
    registry.register(DocumentCountTool::new(client.clone()));
    registry.register(DocumentCreateTool::new(client.clone()));
    registry.register(DocumentUpdateTool::new(client.clone()));
    registry.register(DocumentDeleteTool::new(client.clone()));

    registry.register(CommentListTool::new(client.clone()));
    registry.register(CommentGetTool::new(client.clone()));
    registry.register(CommentCountTool::new(client.clone()));
    registry.register(CommentCreateTool::new(client.clone()));
    registry.register(CommentUpdateTool::new(client.clone()));
    registry.register(CommentDeleteTool::new(client.clone()));

    registry.register(TimeLogListTool::new(client.clone()));
    registry.register(TimeLogGetTool::new(client.clone()));
    registry.register(TimeLogCountTool::new(client.clone()));
    registry.register(TimeLogCreateTool::new(client.clone()));
    registry.register(TimeLogUpdateTool::new(client.clone()));
    registry.register(TimeLogDeleteTool::new(client.clone()));

    registry.register(TaskLinkListTool::new(client.clone()));
    registry.register(TaskLinkGetTool::new(client.clone()));
    registry.register(TaskLinkCountTool::new(client.clone()));
    registry.register(TaskLinkCreateTool::new(client.clone()));
    registry.register(TaskLinkDeleteTool::new(client.clone()));

    registry.register(StatusHistoryListTool::new(client.clone()));
    registry.register(StatusHistoryGetTool::new(client.clone()));
    registry.register(StatusHistoryCountTool::new(client.clone()));

    registry.register(ProjectStatsTool::new(client.clone()));
    registry.register(SprintStatsTool::new(client));

    registry
}

/// Input of `*_get` tools: a code or a full id.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LookupInput {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl LookupInput {
    /// Single-object query on `entity`, by code when given, else by id.
    pub fn to_query(&self, operation: &str, entity: Entity) -> Result<QueryBuilder> {
        let (field, value) = match (non_empty(&self.code), non_empty(&self.id)) {
            (Some(code), _) => ("code", code),
            (None, Some(id)) => ("id", id),
            (None, None) => {
                return Err(ToolError::invalid_input(operation, "code or id is required"));
            }
        };
        Ok(QueryBuilder::new()
            .select(self.fields.iter().cloned())
            .from(entity)
            .filter(Predicate::eq(field, value))
            .limit(1))
    }
}

/// Input of tools that act on one object id.
#[derive(Debug, Deserialize)]
pub(crate) struct IdInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl IdInput {
    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }
}

/// Input of `*_update` tools.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub updates: Map<String, Value>,
}

pub(crate) fn id_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {"id": {"type": "string", "description": description}},
        "required": ["id"]
    })
}

/// Like [`id_schema`], with an optional projection.
pub(crate) fn id_fields_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "string", "description": description},
            "fields": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["id"]
    })
}

pub(crate) fn update_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "string", "description": description},
            "updates": {"type": "object", "description": "Fields to change"}
        },
        "required": ["id", "updates"]
    })
}

/// Unwrap a single-object lookup, reporting a missing object as `NotFound`.
pub(crate) fn found<T>(operation: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| ToolError::NotFound {
        operation: operation.to_string(),
    })
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Fail with `InvalidInput` unless `value` is non-empty.
pub(crate) fn required<'a>(operation: &str, name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        Err(ToolError::invalid_input(operation, format!("{} is required", name)))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_registry_names() {
        let client = EvaClient::builder()
            .base_url("https://eva.example.com")
            .api_token("tok")
            .build()
            .unwrap();
        let registry = default_registry(client);

        assert_eq!(registry.len(), 62);
        for name in [
            "eva_task_list",
            "eva_task_get",
            "eva_task_count",
            "eva_task_create",
            "eva_task_update",
            "eva_task_update_status",
            "eva_task_delete",
            "eva_task_archive",
            "eva_project_list",
            "eva_project_get",
            "eva_project_count",
            "eva_project_create",
            "eva_project_update",
            "eva_project_delete",
            "eva_project_add_executor",
            "eva_project_remove_executor",
            "eva_list_list",
            "eva_list_get",
            "eva_list_count",
            "eva_list_create",
            "eva_list_update",
            "eva_list_close",
            "eva_list_delete",
            "eva_sprint_list",
            "eva_sprint_get",
            "eva_release_list",
            "eva_release_get",
            "eva_epic_list",
            "eva_epic_get",
            "eva_epic_count",
            "eva_person_list",
            "eva_person_get",
            "eva_person_count",
            "eva_person_current",
            "eva_document_list",
            "eva_document_get",
            "eva_document_count",
            "eva_document_create",
            "eva_document_update",
            "eva_document_delete",
            "eva_comment_list",
            "eva_comment_get",
            "eva_comment_count",
            "eva_comment_create",
            "eva_comment_update",
            "eva_comment_delete",
            "eva_timelog_list",
            "eva_timelog_get",
            "eva_timelog_count",
            "eva_timelog_create",
            "eva_timelog_update",
            "eva_timelog_delete",
            "eva_tasklink_list",
            "eva_tasklink_get",
            "eva_tasklink_count",
            "eva_tasklink_create",
            "eva_tasklink_delete",
            "eva_statushistory_list",
            "eva_statushistory_get",
            "eva_statushistory_count",
            "eva_stats_project",
            "eva_stats_sprint",
        ] {
            assert!(registry.contains(name), "missing {}", name);
        }
        for def in registry.definitions() {
            assert_eq!(def.input_schema.as_ref().unwrap()["type"], json!("object"));
        }
    }

    #[test]
    fn test_lookup_prefers_code() {
        let input = LookupInput {
            code: Some("PROJ-1".into()),
            id: Some("CmfTask:1".into()),
            fields: vec![],
        };
        let q = input.to_query("task_get", Entity::Task).unwrap();
        assert_eq!(
            serde_json::to_value(q.to_kwargs()).unwrap(),
            json!({"filter": ["code", "==", "PROJ-1"], "slice": [0, 1]})
        );
    }

    #[test]
    fn test_lookup_requires_code_or_id() {
        let input = LookupInput {
            code: Some(String::new()),
            ..Default::default()
        };
        let err = input.to_query("task_get", Entity::Task).unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
    }
}
