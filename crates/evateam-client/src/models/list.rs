use serde::{Deserialize, Serialize};

use super::Ref;

/// Code prefix of sprints.
pub const SPRINT_CODE_PREFIX: &str = "SPR-";
/// Code prefix of releases.
pub const RELEASE_CODE_PREFIX: &str = "REL-";

/// A sprint or release (`CmfList`).
///
/// Both share one class; the code prefix tells them apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_status_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_members_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_days: Option<String>,
    /// Owning project, id or embedded object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmf_owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub system: bool,
}

impl List {
    pub fn is_sprint(&self) -> bool {
        self.has_prefix(SPRINT_CODE_PREFIX)
    }

    pub fn is_release(&self) -> bool {
        self.has_prefix(RELEASE_CODE_PREFIX)
    }

    /// Whether the list is still open.
    pub fn is_open(&self) -> bool {
        self.cache_status_type.as_deref() == Some(crate::entity::status::OPEN)
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.code.as_deref().is_some_and(|c| c.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sprint_or_release_by_code() {
        let list: List = serde_json::from_value(json!({
            "id": "CmfList:1",
            "code": "SPR-001543",
            "cache_status_type": "OPEN",
            "parent": {"id": "CmfProject:1", "name": "Core"}
        }))
        .unwrap();
        assert!(list.is_sprint());
        assert!(!list.is_release());
        assert!(list.is_open());
        assert_eq!(list.parent.as_ref().map(Ref::id), Some("CmfProject:1"));

        let list = List {
            code: Some("REL-001641".into()),
            ..List::default()
        };
        assert!(list.is_release());
        assert!(!List::default().is_sprint());
    }
}
