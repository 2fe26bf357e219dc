//! Person tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use evateam_client::{EvaClient, Entity, Predicate, QueryBuilder};

use super::{found, required};
use crate::error::{Result, ToolError};
use crate::input::{CountResult, ListResult, QueryInput, build_query, query_schema};
use crate::tool::{Tool, ToolResult, parse_params};

/// List persons.
#[derive(Clone)]
pub struct PersonListTool {
    client: EvaClient,
}

impl PersonListTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for PersonListTool {
    fn name(&self) -> &str {
        "eva_person_list"
    }

    fn description(&self) -> &str {
        "List persons (users)"
    }

    fn parameters(&self) -> Value {
        query_schema(json!({}))
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "person_list";
        let input: QueryInput = parse_params(OP, params)?;
        let persons = self
            .client
            .persons()
            .list(build_query(OP, Entity::Person, &input)?)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &ListResult::new(persons.result, input.page_limit()))
    }
}

#[derive(Debug, Deserialize)]
struct PersonGetInput {
    #[serde(default)]
    id: String,
    #[serde(default)]
    fields: Vec<String>,
}

/// Get one person by id.
#[derive(Clone)]
pub struct PersonGetTool {
    client: EvaClient,
}

impl PersonGetTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for PersonGetTool {
    fn name(&self) -> &str {
        "eva_person_get"
    }

    fn description(&self) -> &str {
        "Get a single person by ID"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "string", "description": "Person id (CmfPerson:<uuid>)"},
                "fields": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "person_get";
        let input: PersonGetInput = parse_params(OP, params)?;
        let id = required(OP, "id", &input.id)?;
        let columns: Vec<&str> = input.fields.iter().map(String::as_str).collect();

        let person = self
            .client
            .persons()
            .get(id, &columns)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &found(OP, person.result)?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PersonCurrentInput {
    #[serde(default)]
    fields: Vec<String>,
}

/// The person the token belongs to.
#[derive(Clone)]
pub struct PersonCurrentTool {
    client: EvaClient,
}

impl PersonCurrentTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for PersonCurrentTool {
    fn name(&self) -> &str {
        "eva_person_current"
    }

    fn description(&self) -> &str {
        "Get the current authenticated user"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"fields": {"type": "array", "items": {"type": "string"}}}
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "person_current";
        let input: PersonCurrentInput = parse_params(OP, params)?;
        let columns: Vec<&str> = input.fields.iter().map(String::as_str).collect();

        let person = self
            .client
            .persons()
            .current(&columns)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &person.result)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PersonCountInput {
    #[serde(default)]
    on_vacation: Option<bool>,
    #[serde(default)]
    does_not_work: Option<bool>,
}

/// Count persons.
#[derive(Clone)]
pub struct PersonCountTool {
    client: EvaClient,
}

impl PersonCountTool {
    pub fn new(client: EvaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for PersonCountTool {
    fn name(&self) -> &str {
        "eva_person_count"
    }

    fn description(&self) -> &str {
        "Count persons, optionally by vacation or employment flag"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "on_vacation": {"type": "boolean"},
                "does_not_work": {"type": "boolean", "description": "Former employees"}
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        const OP: &str = "person_count";
        let input: PersonCountInput = parse_params(OP, params)?;
        let mut query = QueryBuilder::new().from(Entity::Person);
        if let Some(v) = input.on_vacation {
            query = query.filter(Predicate::eq("on_vacation", v));
        }
        if let Some(v) = input.does_not_work {
            query = query.filter(Predicate::eq("does_not_work", v));
        }

        let count = self
            .client
            .persons()
            .count(query)
            .await
            .map_err(|e| ToolError::wrap(OP, e))?;
        ToolResult::from_serialize(OP, &CountResult { count })
    }
}
