//! Response shaping rules.
//!
//! Each operation declares how much of the upstream response is returned to
//! the caller. Rules are data, so the catalogue stays a declarative table.

use crate::projection::{Projection, ProjectionError};
use serde_json::{Map, Value};

/// Key of the result collection in paginated list responses.
pub const RESULTS_KEY: &str = "results";

/// Pagination metadata carried by list responses.
pub const PAGINATION_KEYS: [&str; 4] = ["page", "limit", "totalPages", "totalResults"];

/// How an upstream response is reduced before it reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapingRule {
    /// Return the response unchanged, unless the caller supplied a
    /// projection: then each element of `results` is projected and every
    /// other top-level key is left alone.
    Passthrough,
    /// Return only `{ success, <entity>: { id } }`.
    MinimalCreate { entity: String },
    /// Return the response unchanged. Caller projections are ignored.
    Identity,
    /// Project each element of `results` with a fixed expression and keep
    /// only the listed top-level keys beside it.
    FixedProjection {
        expression: String,
        keep: Vec<String>,
    },
}

impl ShapingRule {
    pub fn minimal_create(entity: impl Into<String>) -> Self {
        ShapingRule::MinimalCreate {
            entity: entity.into(),
        }
    }

    /// Fixed projection over `results` that keeps the pagination metadata.
    pub fn paginated_projection(expression: impl Into<String>) -> Self {
        ShapingRule::FixedProjection {
            expression: expression.into(),
            keep: PAGINATION_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether a caller-supplied projection has any effect under this rule.
    pub fn accepts_projection(&self) -> bool {
        matches!(self, ShapingRule::Passthrough)
    }

    /// Shape `response`. `projection` is the caller's projection, already
    /// parsed; only [`ShapingRule::Passthrough`] consults it.
    pub fn apply(
        &self,
        response: Value,
        projection: Option<&Projection>,
    ) -> Result<Value, ProjectionError> {
        match self {
            ShapingRule::Identity => Ok(response),
            ShapingRule::Passthrough => Ok(match projection {
                Some(projection) => project_results(response, projection),
                None => response,
            }),
            ShapingRule::MinimalCreate { entity } => Ok(minimal_confirmation(&response, entity)),
            ShapingRule::FixedProjection { expression, keep } => {
                let projection = Projection::parse(expression)?;
                let mut shaped = Map::new();
                shaped.insert(
                    RESULTS_KEY.to_string(),
                    projected_collection(response.get(RESULTS_KEY), &projection),
                );
                for key in keep {
                    if let Some(value) = response.get(key) {
                        shaped.insert(key.clone(), value.clone());
                    }
                }
                Ok(Value::Object(shaped))
            }
        }
    }
}

fn project_results(response: Value, projection: &Projection) -> Value {
    match response {
        Value::Object(mut object) => {
            let results = projected_collection(object.get(RESULTS_KEY), projection);
            object.insert(RESULTS_KEY.to_string(), results);
            Value::Object(object)
        }
        // Not a paginated envelope: project the value itself.
        other => projection.apply(&other),
    }
}

/// A missing or null collection becomes `[]`.
fn projected_collection(results: Option<&Value>, projection: &Projection) -> Value {
    match results {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(value) => projection.apply(value),
    }
}

fn minimal_confirmation(response: &Value, entity: &str) -> Value {
    let mut confirmation = Map::new();
    if let Some(success) = response.get("success") {
        confirmation.insert("success".to_string(), success.clone());
    }

    let mut reference = Map::new();
    if let Some(id) = response.get(entity).and_then(|e| e.get("id")) {
        reference.insert("id".to_string(), id.clone());
    }
    confirmation.insert(entity.to_string(), Value::Object(reference));
    Value::Object(confirmation)
}
