//! Field projection (masking) of JSON values.
//!
//! A projection expression such as `"id,title,author(name,email)"` is parsed
//! into a tree of [`FieldSelector`]s and then applied to a JSON value:
//!
//! - objects keep only the requested fields that are present
//! - arrays are projected element-wise
//! - scalars and `null` pass through unchanged
//!
//! Requested fields that are absent are omitted, never inserted as `null`.
//! A field selected more than once keeps the union of its selections, so
//! `"author(name),author(email)"` keeps both `author.name` and `author.email`.
//! Applying a projection never mutates its input, and applying the same
//! projection twice yields the same result as applying it once.

mod parser;

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure to parse a projection expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("Malformed projection '{expression}': unbalanced parenthesis at offset {offset}")]
    UnbalancedParenthesis { expression: String, offset: usize },

    #[error("Malformed projection '{expression}': empty field name at offset {offset}")]
    EmptyFieldName { expression: String, offset: usize },

    #[error("Malformed projection '{expression}': unexpected '{found}' at offset {offset}")]
    UnexpectedCharacter {
        expression: String,
        offset: usize,
        found: char,
    },
}

impl ProjectionError {
    pub fn expression(&self) -> &str {
        match self {
            ProjectionError::UnbalancedParenthesis { expression, .. }
            | ProjectionError::EmptyFieldName { expression, .. }
            | ProjectionError::UnexpectedCharacter { expression, .. } => expression,
        }
    }
}

/// Name component of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldName {
    Named(String),
    /// `*`: every key at this level
    Wildcard,
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Named(name) => write!(f, "{}", name),
            FieldName::Wildcard => write!(f, "*"),
        }
    }
}

/// One node of a parsed projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// Keep the field as-is.
    Field(FieldName),
    /// Keep the field, projecting its value with the nested selectors.
    WithChildren(FieldName, Vec<FieldSelector>),
}

impl FieldSelector {
    pub fn name(&self) -> &FieldName {
        match self {
            FieldSelector::Field(name) | FieldSelector::WithChildren(name, _) => name,
        }
    }

    fn apply_to(&self, value: &Value) -> Value {
        match self {
            FieldSelector::Field(_) => value.clone(),
            FieldSelector::WithChildren(_, children) => apply_selectors(children, value),
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSelector::Field(name) => write!(f, "{}", name),
            FieldSelector::WithChildren(name, children) => {
                write!(f, "{}(", name)?;
                write_list(f, children)?;
                write!(f, ")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, selectors: &[FieldSelector]) -> fmt::Result {
    for (i, selector) in selectors.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", selector)?;
    }
    Ok(())
}

/// A parsed projection expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    selectors: Vec<FieldSelector>,
}

impl Projection {
    pub fn parse(expression: &str) -> Result<Self, ProjectionError> {
        Ok(Self {
            selectors: parser::Parser::new(expression).parse()?,
        })
    }

    /// Project `value`, returning a new value.
    pub fn apply(&self, value: &Value) -> Value {
        apply_selectors(&self.selectors, value)
    }
}

impl FromStr for Projection {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Normalized textual form, e.g. `a,b(x,y)`.
impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.selectors)
    }
}

/// Parse `expression` and apply it to `value`.
pub fn project(value: &Value, expression: &str) -> Result<Value, ProjectionError> {
    Ok(Projection::parse(expression)?.apply(value))
}

fn apply_selectors(selectors: &[FieldSelector], value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| apply_selectors(selectors, item))
                .collect(),
        ),
        Value::Object(object) => {
            let mut projected = Map::new();
            for selector in selectors {
                match selector.name() {
                    FieldName::Named(name) => {
                        if let Some(field) = object.get(name) {
                            insert_merged(&mut projected, name, selector.apply_to(field));
                        }
                    }
                    FieldName::Wildcard => {
                        for (key, field) in object {
                            insert_merged(&mut projected, key, selector.apply_to(field));
                        }
                    }
                }
            }
            Value::Object(projected)
        }
        scalar => scalar.clone(),
    }
}

fn insert_merged(target: &mut Map<String, Value>, key: &str, value: Value) {
    match target.get_mut(key) {
        Some(existing) => merge(existing, value),
        None => {
            target.insert(key.to_string(), value);
        }
    }
}

/// Union of two projections of the same source value.
fn merge(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(current), Value::Object(more)) => {
            for (key, value) in more {
                insert_merged(current, &key, value);
            }
        }
        (Value::Array(current), Value::Array(more)) if current.len() == more.len() => {
            for (slot, value) in current.iter_mut().zip(more) {
                merge(slot, value);
            }
        }
        (slot, other) => *slot = other,
    }
}
