use serde::{Deserialize, Serialize};

/// One status transition (`CmfStatusHistory`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusHistory {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Object whose status changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status_id: Option<String>,
    /// Person who made the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_modified_at: Option<String>,
}
