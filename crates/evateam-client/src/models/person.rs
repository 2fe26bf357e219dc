use serde::{Deserialize, Serialize};

/// A user (`CmfPerson`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_vacation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_work: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_created_at: Option<String>,
}

impl Person {
    /// Neither on vacation nor marked as no longer working.
    pub fn is_available(&self) -> bool {
        !self.on_vacation.unwrap_or(false) && !self.does_not_work.unwrap_or(false)
    }
}
