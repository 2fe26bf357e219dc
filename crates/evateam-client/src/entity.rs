//! Entity names and default projections.

use std::collections::HashMap;
use std::fmt;

/// Business object types exposed by the API.
///
/// The string form is the remote class name and the prefix of every method
/// in the entity's family (`CmfTask.list`, `CmfTask.get`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Project,
    Task,
    Document,
    /// Sprints and releases.
    List,
    Person,
    TimeLog,
    Comment,
    /// Task links.
    Relation,
    File,
    Audit,
    StatusHistory,
}

impl Entity {
    /// Remote class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Project => "CmfProject",
            Entity::Task => "CmfTask",
            Entity::Document => "CmfDocument",
            Entity::List => "CmfList",
            Entity::Person => "CmfPerson",
            Entity::TimeLog => "CmfTimeTrackerHistory",
            Entity::Comment => "Comment",
            Entity::Relation => "CmfRelationOption",
            Entity::File => "CmfRFile",
            Entity::Audit => "CmfAudit",
            Entity::StatusHistory => "CmfStatusHistory",
        }
    }

    /// All known entities.
    pub fn all() -> &'static [Entity] {
        &[
            Entity::Project,
            Entity::Task,
            Entity::Document,
            Entity::List,
            Entity::Person,
            Entity::TimeLog,
            Entity::Comment,
            Entity::Relation,
            Entity::File,
            Entity::Audit,
            Entity::StatusHistory,
        ]
    }

    /// Look up an entity by class name or by a short lowercase alias
    /// (`task`, `project`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(e) = Self::all().iter().find(|e| e.as_str() == s) {
            return Some(*e);
        }
        let e = match s.to_ascii_lowercase().as_str() {
            "project" | "projects" => Entity::Project,
            "task" | "tasks" => Entity::Task,
            "document" | "documents" => Entity::Document,
            "list" | "lists" | "sprint" | "sprints" => Entity::List,
            "person" | "persons" | "people" => Entity::Person,
            "timelog" | "time_log" => Entity::TimeLog,
            "comment" | "comments" => Entity::Comment,
            "relation" | "link" | "task_link" => Entity::Relation,
            "file" => Entity::File,
            "audit" => Entity::Audit,
            "status_history" => Entity::StatusHistory,
            _ => return None,
        };
        Some(e)
    }

    /// Remote method name for `verb` in this entity's family.
    pub fn method(&self, verb: &str) -> String {
        format!("{}.{}", self.as_str(), verb)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Entity> for String {
    fn from(e: Entity) -> Self {
        e.as_str().to_string()
    }
}

/// Values of `cache_status_type`.
pub mod status {
    pub const OPEN: &str = "OPEN";
    pub const IN_PROGRESS: &str = "IN_PROGRESS";
    pub const CLOSED: &str = "CLOSED";
}

/// Task logic types.
pub mod logic_type {
    /// Filter field holding the logic type code.
    pub const CODE_FIELD: &str = "logic_type.code";
    pub const EPIC: &str = "task.epic";
}

/// Field names and projection presets.
pub mod fields {
    /// All basic fields.
    pub const ALL_BASIC: &str = "*";
    /// Basic fields plus relations.
    pub const ALL_WITH_RELATIONS: &str = "**";
    /// Basic fields, relations and many-to-many relations.
    pub const ALL_WITH_M2M: &str = "***";

    pub const ID: &str = "id";
    pub const CLASS_NAME: &str = "class_name";
    pub const CODE: &str = "code";
    pub const NAME: &str = "name";
    pub const TEXT: &str = "text";
    pub const PROJECT_ID: &str = "project_id";
    pub const PARENT_ID: &str = "parent_id";
    pub const CACHE_STATUS_TYPE: &str = "cache_status_type";
    pub const PRIORITY: &str = "priority";
    pub const DEADLINE: &str = "deadline";
    pub const RESPONSIBLE: &str = "responsible";
    pub const RESPONSIBLE_ID: &str = "responsible_id";
    pub const EXECUTORS: &str = "executors";
    pub const LISTS: &str = "lists";
    pub const EPIC: &str = "epic";
    pub const EPIC_ID: &str = "epic_id";
    pub const TAGS: &str = "tags";
    pub const CMF_OWNER_ID: &str = "cmf_owner_id";
    pub const CMF_CREATED_AT: &str = "cmf_created_at";
    pub const CMF_MODIFIED_AT: &str = "cmf_modified_at";
    pub const CMF_DELETED: &str = "cmf_deleted";
    pub const CMF_AUTHOR_ID: &str = "cmf_author_id";
    pub const TASK_ID: &str = "task_id";
    pub const AGILE_STORY_POINTS: &str = "agile_story_points";
    pub const SOURCE_ID: &str = "source_id";
    pub const TARGET_ID: &str = "target_id";
    pub const TIME_SPENT: &str = "time_spent";
    /// Project of the parent object, e.g. the task a time log belongs to.
    pub const PARENT_PROJECT_ID: &str = "parent.project_id";

    pub(crate) const TASK: &[&str] = &[
        ID,
        CODE,
        NAME,
        TEXT,
        PROJECT_ID,
        LISTS,
        CMF_OWNER_ID,
        RESPONSIBLE,
        CACHE_STATUS_TYPE,
        PRIORITY,
        DEADLINE,
        EPIC,
        TAGS,
        EXECUTORS,
        "waiting_for",
        PARENT_ID,
        "fix_versions",
        AGILE_STORY_POINTS,
        "components",
        "logic_type",
    ];

    pub(crate) const TASK_LIST: &[&str] = &[
        ID,
        CODE,
        NAME,
        PROJECT_ID,
        CACHE_STATUS_TYPE,
        PRIORITY,
        DEADLINE,
        RESPONSIBLE_ID,
        EPIC_ID,
        AGILE_STORY_POINTS,
    ];

    pub(crate) const PROJECT: &[&str] = &[
        ID,
        CLASS_NAME,
        CODE,
        NAME,
        CACHE_STATUS_TYPE,
        "workflow_type",
        PARENT_ID,
        PROJECT_ID,
        CMF_OWNER_ID,
        "workflow_id",
        "system",
        "is_template",
    ];

    pub(crate) const PROJECT_LIST: &[&str] = &[
        ID,
        CLASS_NAME,
        CODE,
        NAME,
        CACHE_STATUS_TYPE,
        CMF_OWNER_ID,
        "workflow_id",
        "system",
    ];

    pub(crate) const PERSON: &[&str] = &[
        ID,
        NAME,
        CODE,
        "login",
        "email",
        "on_vacation",
        "does_not_work",
        CMF_CREATED_AT,
    ];

    pub(crate) const PERSON_LIST: &[&str] =
        &[ID, NAME, CODE, "login", "email", "on_vacation", "does_not_work"];

    pub(crate) const DOCUMENT: &[&str] = &[
        ID,
        CLASS_NAME,
        CODE,
        NAME,
        TEXT,
        PROJECT_ID,
        CACHE_STATUS_TYPE,
        CMF_CREATED_AT,
        CMF_MODIFIED_AT,
    ];

    pub(crate) const DOCUMENT_LIST: &[&str] = &[
        ID,
        CODE,
        NAME,
        PROJECT_ID,
        CACHE_STATUS_TYPE,
        CMF_CREATED_AT,
    ];

    pub(crate) const COMMENT: &[&str] = &[ID, TEXT, CMF_AUTHOR_ID, CMF_CREATED_AT];

    pub(crate) const LIST: &[&str] = &[
        ID,
        CLASS_NAME,
        CODE,
        NAME,
        CACHE_STATUS_TYPE,
        "cache_members_count",
        "limit_days",
        "parent",
        PARENT_ID,
        PROJECT_ID,
        CMF_OWNER_ID,
        "workflow_id",
        "start_date",
        "end_date",
        "goal",
        TEXT,
        "system",
    ];

    pub(crate) const LIST_LIST: &[&str] = &[
        ID,
        CODE,
        NAME,
        CACHE_STATUS_TYPE,
        PARENT_ID,
        "start_date",
        "end_date",
    ];

    pub(crate) const TIME_LOG: &[&str] = &[
        ID,
        CODE,
        PARENT_ID,
        TIME_SPENT,
        CMF_OWNER_ID,
        CMF_CREATED_AT,
        CMF_MODIFIED_AT,
    ];

    pub(crate) const STATUS_HISTORY: &[&str] = &[
        ID,
        CODE,
        NAME,
        PARENT_ID,
        PROJECT_ID,
        "old_status",
        "new_status",
        "old_status_id",
        "new_status_id",
        CMF_OWNER_ID,
        CMF_CREATED_AT,
    ];

    pub(crate) const STATUS_HISTORY_LIST: &[&str] = &[
        ID,
        PARENT_ID,
        "old_status",
        "new_status",
        CMF_OWNER_ID,
        CMF_CREATED_AT,
    ];

    pub(crate) const TASK_LINK: &[&str] =
        &[ID, CODE, NAME, SOURCE_ID, TARGET_ID, "link_type", CMF_CREATED_AT];
}

/// Whether a projection is for a single object or a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// Full projection for `get` calls.
    Single,
    /// Lighter projection for `list` calls.
    List,
}

/// Read-only table of default projections, keyed by entity.
///
/// Façades consult it when a query selected no columns. Built once when the
/// client is constructed; overrides are applied through
/// [`ClientBuilder::default_fields`](crate::ClientBuilder::default_fields).
#[derive(Debug, Clone)]
pub struct FieldDefaults {
    table: HashMap<(Entity, Projection), Vec<String>>,
}

impl FieldDefaults {
    /// Built-in projections.
    pub fn builtin() -> Self {
        let mut table: HashMap<(Entity, Projection), Vec<String>> = HashMap::new();
        let mut put = |entity, projection, names: &[&str]| {
            table.insert(
                (entity, projection),
                names.iter().map(|f| f.to_string()).collect(),
            );
        };
        put(Entity::Task, Projection::Single, fields::TASK);
        put(Entity::Task, Projection::List, fields::TASK_LIST);
        put(Entity::Project, Projection::Single, fields::PROJECT);
        put(Entity::Project, Projection::List, fields::PROJECT_LIST);
        put(Entity::Person, Projection::Single, fields::PERSON);
        put(Entity::Person, Projection::List, fields::PERSON_LIST);
        put(Entity::Document, Projection::Single, fields::DOCUMENT);
        put(Entity::Document, Projection::List, fields::DOCUMENT_LIST);
        put(Entity::Comment, Projection::Single, fields::COMMENT);
        put(Entity::Comment, Projection::List, fields::COMMENT);
        put(Entity::List, Projection::Single, fields::LIST);
        put(Entity::List, Projection::List, fields::LIST_LIST);
        put(Entity::TimeLog, Projection::Single, fields::TIME_LOG);
        put(Entity::TimeLog, Projection::List, fields::TIME_LOG);
        put(Entity::StatusHistory, Projection::Single, fields::STATUS_HISTORY);
        put(Entity::StatusHistory, Projection::List, fields::STATUS_HISTORY_LIST);
        put(Entity::Relation, Projection::Single, fields::TASK_LINK);
        put(Entity::Relation, Projection::List, fields::TASK_LINK);
        Self { table }
    }

    /// Replace the projection for an entity.
    pub(crate) fn set(&mut self, entity: Entity, projection: Projection, fields: Vec<String>) {
        self.table.insert((entity, projection), fields);
    }

    /// Default projection, or `*` for entities without one.
    pub fn get(&self, entity: Entity, projection: Projection) -> Vec<String> {
        self.table
            .get(&(entity, projection))
            .cloned()
            .unwrap_or_else(|| vec![fields::ALL_BASIC.to_string()])
    }
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}
