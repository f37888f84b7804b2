//! Query-string serialization for filter objects.
//!
//! A [`FilterSpec`] is an ordered list of `key → value` pairs. Serialization
//! follows a few fixed rules:
//!
//! - absent values are skipped entirely (no `key=` is ever emitted for them)
//! - a list produces one `key=value` pair per element, in order
//! - an empty list produces nothing
//! - keys appear in insertion order
//!
//! ```
//! use featurebase_domain::query::{FilterSpec, FilterValue};
//!
//! let spec = FilterSpec::new()
//!     .with("q", "dark mode")
//!     .with("status", FilterValue::list(["open", "planned"]))
//!     .with("page", FilterValue::Absent);
//!
//! assert_eq!(spec.to_query_string(), "q=dark%20mode&status=open&status=planned");
//! assert_eq!(spec.append_to("/posts"), "/posts?q=dark%20mode&status=open&status=planned");
//! ```

use serde_json::{Map, Number, Value};
use tracing::debug;

/// A single query value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Scalar {
    /// Canonical textual form: decimal numbers, `true`/`false`.
    pub fn render(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Value stored under one filter key.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Absent,
}

impl FilterValue {
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Convert a JSON argument into a filter value.
    ///
    /// `null` becomes [`FilterValue::Absent`]. Objects have no query-string
    /// representation and yield `None`. Non-scalar array elements are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FilterValue::Absent),
            Value::Array(items) => Some(FilterValue::List(
                items.iter().filter_map(Scalar::from_json).collect(),
            )),
            Value::Object(_) => None,
            other => Scalar::from_json(other).map(FilterValue::Scalar),
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(value: Scalar) -> Self {
        FilterValue::Scalar(value)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Scalar(s.into())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Scalar(s.into())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Scalar(n.into())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Scalar(b.into())
    }
}

/// Ordered filter object destined for a query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Build a filter from a JSON object, taking only `keys` in the given order.
    pub fn from_json_object(object: &Map<String, Value>, keys: &[&str]) -> Self {
        let mut spec = Self::new();
        for key in keys {
            let Some(raw) = object.get(*key) else {
                continue;
            };
            match FilterValue::from_json(raw) {
                Some(value) => spec.push(*key, value),
                None => debug!(key = *key, "Skipping non-serializable filter value"),
            }
        }
        spec
    }

    /// True when serialization would produce an empty string.
    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }

    /// Flatten into the `(key, value)` pairs that will be emitted.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries.iter().flat_map(|(key, value)| {
            let rendered: Vec<String> = match value {
                FilterValue::Scalar(s) => vec![s.render()],
                FilterValue::List(items) => items.iter().map(Scalar::render).collect(),
                FilterValue::Absent => Vec::new(),
            };
            rendered.into_iter().map(move |v| (key.as_str(), v))
        })
    }

    pub fn to_query_string(&self) -> String {
        self.pairs()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Append the serialized query to `path`. No `?` is added when empty.
    pub fn append_to(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }
}
