//! Per-entity API façades.
//!
//! Each façade is a thin composition over [`EvaClient::call`]: it builds a
//! query, fills in the default projection when the caller selected none,
//! and decodes the result into the entity's model.
//!
//! Single-object lookups (`get`, `query`) return `Option<T>`: the server
//! answers a lookup that matches nothing with `"result": null`, which is
//! not an error.

mod comments;
mod documents;
mod epics;
mod lists;
mod persons;
mod projects;
mod stats;
mod status_history;
mod task_links;
mod tasks;
mod time_logs;

pub use comments::CommentsApi;
pub use documents::{DocumentCreate, DocumentsApi};
pub use epics::EpicsApi;
pub use lists::{ListCreate, ListKind, ListsApi};
pub use persons::PersonsApi;
pub use projects::{ProjectCreate, ProjectsApi};
pub use stats::StatsApi;
pub use status_history::StatusHistoryApi;
pub use task_links::{LinkDirection, TaskLinksApi};
pub use tasks::{TaskCreate, TasksApi};
pub use time_logs::{TimeLogCreate, TimeLogsApi};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::EvaClient;
use crate::entity::{Entity, Projection};
use crate::error::{Error, Result};
use crate::query::{Kwargs, QueryBuilder};

/// Query kwargs with the entity's default projection filled in.
pub(crate) fn kwargs_with_defaults(
    client: &EvaClient,
    query: &QueryBuilder,
    entity: Entity,
    projection: Projection,
) -> Kwargs {
    let mut kwargs = query.to_kwargs();
    kwargs.default_fields(|| client.field_defaults().get(entity, projection));
    kwargs
}

/// List method for `query`, using `entity` when the query has none.
pub(crate) fn list_method(query: &QueryBuilder, entity: Entity) -> Result<String> {
    match query.entity() {
        None => Ok(entity.method("list")),
        Some(_) => query.to_method(),
    }
}

/// Single-object lookup by one field, limited to the first match.
pub(crate) fn lookup(entity: Entity, field: &str, value: &str, columns: &[&str]) -> QueryBuilder {
    QueryBuilder::new()
        .select(columns.iter().copied())
        .from(entity)
        .filter(crate::Predicate::eq(field, value))
        .limit(1)
}

/// Flatten a parameter struct into create/update kwargs.
pub(crate) fn params_kwargs(params: &impl Serialize) -> Result<Kwargs> {
    match serde_json::to_value(params).map_err(Error::Encode)? {
        Value::Object(extra) => Ok(Kwargs {
            extra,
            ..Kwargs::default()
        }),
        _ => Ok(Kwargs::default()),
    }
}

/// Kwargs for `<Entity>.update`: the object id plus the changed fields.
pub(crate) fn update_kwargs(id: &str, changes: Map<String, Value>) -> Kwargs {
    let mut kwargs = Kwargs::new().with("id", id);
    kwargs.extra.extend(changes);
    kwargs
}
