//! `evateam query`: run a list query against one entity.

use anyhow::{Context as _, Result, anyhow};
use clap::Args;
use serde_json::{Value, json};

use evateam_client::{Condition, Entity, Operator, QueryBuilder, RpcRequest};

use super::Context;

/// Arguments for `evateam query`.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Entity alias (`task`, `project`, ...) or class name (`CmfTask`)
    pub entity: String,

    /// Fields to return (repeatable, or comma separated)
    #[arg(long, short, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Condition as "field op value", e.g. "cache_status_type == OPEN"
    #[arg(long = "where", short = 'w')]
    pub conditions: Vec<String>,

    /// Sort keys, `-field` for descending
    #[arg(long, value_delimiter = ',')]
    pub order_by: Vec<String>,

    /// Skip the first N results
    #[arg(long)]
    pub offset: Option<u64>,

    /// Return at most N results
    #[arg(long)]
    pub limit: Option<u64>,

    /// Include archived records
    #[arg(long)]
    pub include_archived: bool,

    /// Print the request that would be sent and exit
    #[arg(long)]
    pub kwargs_only: bool,
}

impl QueryArgs {
    /// Build the query described by the arguments.
    pub fn to_query(&self) -> Result<QueryBuilder> {
        let entity = Entity::parse(&self.entity)
            .ok_or_else(|| anyhow!("unknown entity: {}", self.entity))?;

        let mut query = QueryBuilder::new()
            .select(self.select.iter().cloned())
            .from(entity)
            .order_by(self.order_by.iter().cloned());

        for raw in &self.conditions {
            query = query.filter(parse_condition(raw)?);
        }
        if let Some(offset) = self.offset {
            query = query.offset(offset);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if self.include_archived {
            query = query.include_archived();
        }
        Ok(query)
    }
}

/// Run `evateam query`.
pub async fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    let query = args.to_query()?;
    tracing::debug!(%query, "built query");

    if args.kwargs_only {
        let request = RpcRequest::new(query.to_method()?, query.to_kwargs());
        return ctx.print_json(&json!({
            "method": request.method,
            "kwargs": request.kwargs,
        }));
    }

    let client = ctx.client()?;
    let response = client
        .query::<Vec<Value>>("cli::query", &query)
        .await
        .context("query failed")?;

    if ctx.verbose {
        eprintln!("{} result(s)", response.result.len());
    }
    ctx.print_json(&Value::Array(response.result))
}

/// Parse `"field op value"`.
///
/// The value is read as JSON when it parses (`3`, `true`, `"x"`), otherwise
/// taken as a plain string.
pub fn parse_condition(raw: &str) -> Result<Condition> {
    let malformed = || anyhow!("condition must be \"field op value\", got {:?}", raw);
    let (field, rest) = raw.trim().split_once(char::is_whitespace).ok_or_else(malformed)?;
    let (op, value) = rest.trim_start().split_once(char::is_whitespace).ok_or_else(malformed)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(malformed());
    }
    let op = Operator::parse(op).ok_or_else(|| anyhow!("unsupported operator: {}", op))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok(Condition::new(field, op, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(entity: &str) -> QueryArgs {
        QueryArgs {
            entity: entity.to_string(),
            select: vec![],
            conditions: vec![],
            order_by: vec![],
            offset: None,
            limit: None,
            include_archived: false,
            kwargs_only: true,
        }
    }

    #[test]
    fn test_parse_condition() {
        let c = parse_condition("cache_status_type == OPEN").unwrap();
        assert_eq!(c.field(), "cache_status_type");
        assert_eq!(c.op(), Operator::Eq);
        assert_eq!(c.value(), &json!("OPEN"));

        let c = parse_condition("priority >= 3").unwrap();
        assert_eq!(c.value(), &json!(3));

        let c = parse_condition("name LIKE %login page%").unwrap();
        assert_eq!(c.value(), &json!("%login page%"));
    }

    #[test]
    fn test_parse_condition_repeated_whitespace() {
        let c = parse_condition("a  ==  b").unwrap();
        assert_eq!(c.field(), "a");
        assert_eq!(c.op(), Operator::Eq);
        assert_eq!(c.value(), &json!("b"));

        let c = parse_condition("  name\tLIKE   %login  page%  ").unwrap();
        assert_eq!(c.op(), Operator::Like);
        assert_eq!(c.value(), &json!("%login  page%"));
    }

    #[test]
    fn test_parse_condition_errors() {
        assert!(parse_condition("name ==").is_err());
        assert!(parse_condition("name ==   ").is_err());
        assert!(parse_condition("name").is_err());
        assert!(parse_condition("name ~ x").is_err());
    }

    #[test]
    fn test_to_query() {
        let mut a = args("tasks");
        a.select = vec!["id".into(), "code".into()];
        a.conditions = vec!["project_id == CmfProject:1".into()];
        a.offset = Some(10);
        a.limit = Some(5);

        let q = a.to_query().unwrap();
        assert_eq!(q.to_method().unwrap(), "CmfTask.list");
        assert_eq!(
            serde_json::to_value(q.to_kwargs()).unwrap(),
            json!({
                "fields": ["id", "code"],
                "filter": ["project_id", "==", "CmfProject:1"],
                "slice": [10, 15]
            })
        );
    }

    #[test]
    fn test_unknown_entity() {
        assert!(args("widgets").to_query().is_err());
    }
}
