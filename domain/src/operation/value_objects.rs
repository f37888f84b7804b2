//! Operation value objects

use super::entities::{HttpMethod, Origin};
use crate::query::FilterSpec;
use serde_json::Value;
use thiserror::Error;

/// Arguments travelling with a request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    None,
    Query(FilterSpec),
    Body(Value),
}

/// A fully-resolved outbound request, relative to its origin
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub origin: Origin,
    pub payload: RequestPayload,
    /// Extra headers. They never replace the transport's own headers.
    pub headers: Vec<(String, String)>,
    /// Name of the operation that produced this request, for diagnostics
    pub operation: Option<String>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>, origin: Origin) -> Self {
        Self {
            method,
            path: path.into(),
            origin,
            payload: RequestPayload::None,
            headers: Vec::new(),
            operation: None,
        }
    }

    pub fn for_operation(mut self, name: impl Into<String>) -> Self {
        self.operation = Some(name.into());
        self
    }

    pub fn with_query(mut self, query: FilterSpec) -> Self {
        self.payload = RequestPayload::Query(query);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.payload = RequestPayload::Body(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Path with the serialized query string appended, if any.
    pub fn path_and_query(&self) -> String {
        match &self.payload {
            RequestPayload::Query(query) => query.append_to(&self.path),
            _ => self.path.clone(),
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match &self.payload {
            RequestPayload::Body(body) => Some(body),
            _ => None,
        }
    }
}

/// Argument validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required argument '{argument}' for tool '{operation}'")]
    MissingArgument { operation: String, argument: String },
}
