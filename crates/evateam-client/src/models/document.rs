use serde::{Deserialize, Serialize};

/// A wiki document (`CmfDocument`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Body (HTML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_status_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_modified_at: Option<String>,
    #[serde(default)]
    pub cmf_deleted: bool,
}
