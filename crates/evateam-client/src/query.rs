//! Query builder.
//!
//! [`QueryBuilder`] collects a SQL-like description of a list query and
//! translates it straight into the API's keyword arguments:
//!
//! ```
//! use evateam_client::{Entity, Predicate, QueryBuilder};
//!
//! let kwargs = QueryBuilder::new()
//!     .select(["id", "name"])
//!     .from(Entity::Task)
//!     .filter(Predicate::eq("code", "PROJ-1"))
//!     .limit(1)
//!     .to_kwargs();
//!
//! assert_eq!(
//!     serde_json::to_value(&kwargs).unwrap(),
//!     serde_json::json!({
//!         "fields": ["id", "name"],
//!         "filter": ["code", "==", "PROJ-1"],
//!         "slice": [0, 1]
//!     })
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::predicate::{Condition, Filter, Predicate};

/// Keyword arguments sent as the RPC payload.
///
/// Query keys are typed; anything else (`id`, `name`, ... for create and
/// update calls) goes into `extra` and is flattened into the same object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kwargs {
    /// Filter triple or list of triples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Projection. Absent means the server default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Sort keys, `-` prefix for descending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<String>>,
    /// `[start, end]` absolute indices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice: Option<[u64; 2]>,
    /// Include archived/deleted objects.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_archived: bool,
    /// Ask the server to omit `meta` in the response.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_meta: bool,
    /// Non-query arguments.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Kwargs {
    /// Empty kwargs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a non-query argument.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a non-query argument, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Set `fields` only if no projection was chosen.
    pub fn default_fields(&mut self, fields: impl FnOnce() -> Vec<String>) {
        if self.fields.is_none() {
            self.fields = Some(fields());
        }
    }

    /// Check whether nothing would be sent.
    pub fn is_empty(&self) -> bool {
        self.filter.is_none()
            && self.fields.is_none()
            && self.order_by.is_none()
            && self.slice.is_none()
            && !self.include_archived
            && !self.no_meta
            && self.extra.is_empty()
    }
}

/// Builder for list queries.
///
/// Every setter consumes and returns the builder so calls chain. The
/// terminal translators ([`to_kwargs`](Self::to_kwargs),
/// [`to_method`](Self::to_method), [`validate`](Self::validate)) only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    entity: Option<String>,
    columns: Vec<String>,
    conditions: Vec<Condition>,
    order_by: Vec<String>,
    offset: Option<u64>,
    limit: Option<u64>,
    include_archived: bool,
    no_meta: bool,
}

impl QueryBuilder {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append projection columns. An empty list keeps the default projection.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Set the source entity (`CmfTask`, [`Entity::Task`](crate::Entity::Task), ...).
    pub fn from(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// AND a predicate onto the filter.
    pub fn filter(mut self, predicate: impl Into<Predicate>) -> Self {
        predicate.into().flatten_into(&mut self.conditions);
        self
    }

    /// Alias of [`filter`](Self::filter).
    pub fn r#where(self, predicate: impl Into<Predicate>) -> Self {
        self.filter(predicate)
    }

    /// Append sort keys. Prefix a key with `-` for descending order.
    pub fn order_by<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Skip the first `n` results.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Return at most `n` results.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Include archived/deleted objects.
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Skip `meta` in the response.
    pub fn no_meta(mut self) -> Self {
        self.no_meta = true;
        self
    }

    /// Entity set by [`from`](Self::from).
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Selected columns, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Accumulated filter conditions, in order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// `[offset, offset + limit]`, if pagination was requested.
    ///
    /// The end index is computed even when the limit is 0, which yields an
    /// empty `[offset, offset]` window.
    pub fn slice(&self) -> Option<[u64; 2]> {
        if self.offset.is_none() && self.limit.is_none() {
            return None;
        }
        let start = self.offset.unwrap_or(0);
        let end = start.saturating_add(self.limit.unwrap_or(0));
        Some([start, end])
    }

    /// Translate into keyword arguments.
    pub fn to_kwargs(&self) -> Kwargs {
        Kwargs {
            filter: Filter::from_conditions(self.conditions.clone()),
            fields: (!self.columns.is_empty()).then(|| self.columns.clone()),
            order_by: (!self.order_by.is_empty()).then(|| self.order_by.clone()),
            slice: self.slice(),
            include_archived: self.include_archived,
            no_meta: self.no_meta,
            extra: Map::new(),
        }
    }

    /// Method name for `verb` on the query's entity, e.g. `CmfTask.get`.
    pub fn method(&self, verb: &str) -> Result<String> {
        match self.entity.as_deref() {
            Some(entity) if !entity.is_empty() => Ok(format!("{}.{}", entity, verb)),
            _ => Err(Error::MissingEntity),
        }
    }

    /// List method for the query's entity, e.g. `CmfTask.list`.
    pub fn to_method(&self) -> Result<String> {
        self.method("list")
    }

    /// Check that the query can be sent.
    ///
    /// Only the presence of an entity is checked; unknown fields and bad
    /// values are reported by the server.
    pub fn validate(&self) -> Result<()> {
        self.method("list").map(|_| ())
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: Vec<String> = self
            .conditions
            .iter()
            .map(|c| format!("{} {} {}", c.field(), c.op(), c.value()))
            .collect();
        write!(
            f,
            "QueryBuilder{{entity={}, fields={:?}, filter=[{}], order_by={:?}, slice={:?}, includeArch={}, noMeta={}}}",
            self.entity.as_deref().unwrap_or("<none>"),
            self.columns,
            filters.join(" AND "),
            self.order_by,
            self.slice(),
            self.include_archived,
            self.no_meta,
        )
    }
}
