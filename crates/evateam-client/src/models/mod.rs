//! Response models.
//!
//! Every field except `id` is optional or defaulted: the server returns only
//! the projected fields, so a `list` with a narrow projection must still
//! deserialize into the same structs a full `get` does.

mod comment;
mod document;
mod list;
mod meta;
mod person;
mod project;
mod stats;
mod status_history;
mod task;
mod task_link;
mod time_log;

pub use comment::Comment;
pub use document::Document;
pub use list::{List, RELEASE_CODE_PREFIX, SPRINT_CODE_PREFIX};
pub use meta::{ClassMeta, FieldMeta, Meta};
pub use person::Person;
pub use project::Project;
pub use stats::{ProjectStats, SprintStats};
pub use status_history::StatusHistory;
pub use task::Task;
pub use task_link::TaskLink;
pub use time_log::TimeLog;

use serde::{Deserialize, Serialize};

/// A reference to another object.
///
/// Relations come back as a bare id with the basic projection (`*`) and as
/// an embedded object when relations are expanded (`**`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref {
    /// Object id, e.g. `CmfPerson:0a1b...`.
    Id(String),
    /// Embedded summary of the referenced object.
    Object(RefObject),
}

/// Embedded summary of a related object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RefObject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Ref {
    /// Id of the referenced object.
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Object(obj) => &obj.id,
        }
    }

    /// Display name, when the object was expanded.
    pub fn name(&self) -> Option<&str> {
        match self {
            Ref::Id(_) => None,
            Ref::Object(obj) => obj.name.as_deref(),
        }
    }
}
