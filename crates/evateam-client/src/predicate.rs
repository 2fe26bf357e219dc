//! Filter predicates.
//!
//! The API accepts a flat conjunction of `[field, operator, value]` triples.
//! [`Predicate`] is the closed set of conditions that can be expressed in that
//! shape; there is no OR and no nesting on the wire, so `And` children are
//! flattened when a query is translated.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operator understood by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "LIKE")]
    Like,
    /// Membership test on array fields (sprints, executors, tags).
    #[serde(rename = "contains")]
    Contains,
}

impl Operator {
    /// Wire representation of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::Contains => "contains",
        }
    }

    /// Parse an operator, accepting the common SQL spellings as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "==" | "=" => Some(Operator::Eq),
            "!=" | "<>" => Some(Operator::NotEq),
            ">" => Some(Operator::Gt),
            ">=" => Some(Operator::Gte),
            "<" => Some(Operator::Lt),
            "<=" => Some(Operator::Lte),
            "LIKE" | "like" => Some(Operator::Like),
            "contains" => Some(Operator::Contains),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `[field, operator, value]` filter triple.
///
/// Serializes as a 3-element JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition(pub String, pub Operator, pub Value);

impl Condition {
    /// Create a condition.
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self(field.into(), op, value.into())
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.0
    }

    /// Operator.
    pub fn op(&self) -> Operator {
        self.1
    }

    /// Compared value.
    pub fn value(&self) -> &Value {
        &self.2
    }
}

/// A filter predicate: one condition or a conjunction of predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A single comparison.
    Condition(Condition),
    /// All children must hold.
    And(Vec<Predicate>),
}

impl Predicate {
    fn compare(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Predicate::Condition(Condition::new(field, op, value))
    }

    /// `field == value`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Eq, value)
    }

    /// `field != value`
    pub fn not_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::NotEq, value)
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Gt, value)
    }

    /// `field >= value`
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Gte, value)
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Lt, value)
    }

    /// `field <= value`
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Lte, value)
    }

    /// `field LIKE pattern` (`%` wildcards).
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(field, Operator::Like, pattern.into())
    }

    /// `value` is an element of the array field.
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Contains, value)
    }

    /// Conjunction of predicates. An empty conjunction adds no filter.
    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::And(predicates.into_iter().collect())
    }

    /// Inclusive range: `from <= field <= to`.
    pub fn between(
        field: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        let field = field.into();
        Predicate::And(vec![
            Self::gte(field.clone(), from),
            Self::lte(field, to),
        ])
    }

    /// Append the flattened conditions of this predicate to `out`.
    pub(crate) fn flatten_into(self, out: &mut Vec<Condition>) {
        match self {
            Predicate::Condition(c) => out.push(c),
            Predicate::And(children) => {
                for child in children {
                    child.flatten_into(out);
                }
            }
        }
    }

    /// Flattened conditions in declaration order.
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

impl From<Condition> for Predicate {
    fn from(c: Condition) -> Self {
        Predicate::Condition(c)
    }
}

/// The wire `filter` value: a bare triple or a list of triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// Exactly one condition.
    Single(Condition),
    /// Two or more conditions, implicitly ANDed.
    All(Vec<Condition>),
}

impl Filter {
    /// Build the wire filter for a list of conditions; `None` when empty.
    pub fn from_conditions(mut conditions: Vec<Condition>) -> Option<Self> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop().map(Filter::Single),
            _ => Some(Filter::All(conditions)),
        }
    }

    /// Conditions carried by this filter.
    pub fn conditions(&self) -> &[Condition] {
        match self {
            Filter::Single(c) => std::slice::from_ref(c),
            Filter::All(cs) => cs,
        }
    }

    /// Convert back to a flat list of conditions.
    pub fn into_conditions(self) -> Vec<Condition> {
        match self {
            Filter::Single(c) => vec![c],
            Filter::All(cs) => cs,
        }
    }
}
