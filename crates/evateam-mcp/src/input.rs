//! Shared tool inputs and outputs.
//!
//! List tools accept a [`QueryInput`], a JSON-friendly rendition of
//! [`QueryBuilder`], and answer with a [`ListResult`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use evateam_client::{Entity, Operator, Predicate, QueryBuilder};

use crate::error::{Result, ToolError};

/// Page size used when only an offset is given.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// One `[field, operator, value]` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterInput {
    pub field: String,
    /// `==`, `!=`, `>`, `>=`, `<`, `<=`, `LIKE` or `contains`.
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

/// Common parameters of list tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryInput {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterInput>,
    /// `-field` sorts descending.
    #[serde(default)]
    pub order_by: Vec<String>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub include_archived: bool,
}

impl QueryInput {
    /// Effective page size, if the result is paginated.
    pub fn page_limit(&self) -> Option<u64> {
        match (self.offset.unwrap_or(0), self.limit.unwrap_or(0)) {
            (_, limit) if limit > 0 => Some(limit),
            (offset, _) if offset > 0 => Some(DEFAULT_PAGE_LIMIT),
            _ => None,
        }
    }
}

/// Translate a [`QueryInput`] into a query on `entity`.
///
/// Zero offsets and limits count as unset. An offset without a limit pages
/// by [`DEFAULT_PAGE_LIMIT`].
pub fn build_query(operation: &str, entity: Entity, input: &QueryInput) -> Result<QueryBuilder> {
    let mut query = QueryBuilder::new().from(entity);

    if !input.fields.is_empty() {
        query = query.select(input.fields.iter().cloned());
    }

    for f in &input.filters {
        let op = Operator::parse(&f.operator).ok_or_else(|| {
            ToolError::invalid_input(operation, format!("unsupported operator: {}", f.operator))
        })?;
        query = query.filter(evateam_client::Condition::new(
            f.field.clone(),
            op,
            f.value.clone(),
        ));
    }

    if !input.order_by.is_empty() {
        query = query.order_by(input.order_by.iter().cloned());
    }

    if let Some(limit) = input.page_limit() {
        query = query.limit(limit);
    }
    if let Some(offset) = input.offset.filter(|o| *o > 0) {
        query = query.offset(offset);
    }

    if input.include_archived {
        query = query.include_archived();
    }

    Ok(query)
}

/// Add `field == value` when `value` is present and non-empty.
pub fn filter_eq(query: QueryBuilder, field: &str, value: Option<&str>) -> QueryBuilder {
    match value {
        Some(v) if !v.is_empty() => query.filter(Predicate::eq(field, v)),
        _ => query,
    }
}

/// Output of list tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    /// A full page came back, so there may be more.
    pub has_more: bool,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, limit: Option<u64>) -> Self {
        let has_more = matches!(limit, Some(l) if l > 0 && items.len() as u64 == l);
        Self { items, has_more }
    }
}

/// Output of count tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    pub count: u64,
}

/// JSON Schema of the [`QueryInput`] properties, merged with `extra`.
pub fn query_schema(extra: Value) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "fields".into(),
        json!({"type": "array", "items": {"type": "string"}, "description": "Fields to return"}),
    );
    properties.insert(
        "filters".into(),
        json!({
            "type": "array",
            "description": "Conditions, all of which must hold",
            "items": {
                "type": "object",
                "properties": {
                    "field": {"type": "string"},
                    "operator": {
                        "type": "string",
                        "enum": ["==", "!=", ">", ">=", "<", "<=", "LIKE", "contains"]
                    },
                    "value": {}
                },
                "required": ["field", "operator", "value"]
            }
        }),
    );
    properties.insert(
        "order_by".into(),
        json!({"type": "array", "items": {"type": "string"}, "description": "Sort keys, '-field' for descending"}),
    );
    properties.insert("offset".into(), json!({"type": "integer", "minimum": 0}));
    properties.insert("limit".into(), json!({"type": "integer", "minimum": 0}));
    properties.insert(
        "include_archived".into(),
        json!({"type": "boolean", "description": "Include archived records"}),
    );

    if let Value::Object(extra) = extra {
        properties.extend(extra);
    }

    json!({"type": "object", "properties": properties})
}

/// JSON Schema for a lookup by `code` or `id`.
pub fn lookup_schema(code_example: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "code": {"type": "string", "description": format!("Code, e.g. '{}'", code_example)},
            "id": {"type": "string", "description": "Full object id"},
            "fields": {"type": "array", "items": {"type": "string"}}
        }
    })
}
