//! Operation domain entities

use super::value_objects::ApiRequest;
use crate::query::FilterSpec;
use crate::shaping::ShapingRule;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// HTTP method of a transport call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the forwarded arguments travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Serialized into the query string
    Query,
    /// Sent as a JSON body
    Body,
}

/// Which origin a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The authenticated REST API (`X-API-Key`)
    Api,
    /// The organization's public site, no credentials
    Public,
}

/// Shape of the single HTTP call an operation makes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportCall {
    pub method: HttpMethod,
    pub path: String,
    pub placement: Placement,
    pub origin: Origin,
}

impl TransportCall {
    fn new(method: HttpMethod, path: impl Into<String>, placement: Placement) -> Self {
        Self {
            method,
            path: path.into(),
            placement,
            origin: Origin::Api,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, Placement::Query)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path, Placement::Body)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path, Placement::Body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, Placement::Body)
    }

    pub fn on_public_origin(mut self) -> Self {
        self.origin = Origin::Public;
        self
    }
}

/// Declared shape of an input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    String,
    Number,
    Boolean,
    StringArray,
    Object,
    /// String restricted to the listed values
    Enum(Vec<String>),
}

impl InputKind {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputKind::Enum(values.into_iter().map(Into::into).collect())
    }
}

/// Declared input of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub kind: InputKind,
    /// Filled in when the caller omits the field
    pub default: Option<Value>,
}

impl InputField {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            kind: InputKind::String,
            default: None,
        }
    }

    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, true)
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, false)
    }

    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// One named, schema-described unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    pub name: String,
    pub description: String,
    pub inputs: Vec<InputField>,
    pub call: TransportCall,
    pub shaping: ShapingRule,
    /// Name of the input carrying the caller's projection. Never forwarded.
    pub projection_input: Option<String>,
}

impl OperationDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        call: TransportCall,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            inputs: Vec::new(),
            call,
            shaping: ShapingRule::Identity,
            projection_input: None,
        }
    }

    pub fn with_input(mut self, input: InputField) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_shaping(mut self, shaping: ShapingRule) -> Self {
        self.shaping = shaping;
        self
    }

    /// Declare an optional string input that carries a projection expression.
    pub fn with_projection_input(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.inputs.push(InputField::optional(name.clone(), description));
        self.projection_input = Some(name);
        self
    }

    /// Inputs sent upstream, in declaration order.
    pub fn forwarded_inputs(&self) -> impl Iterator<Item = &InputField> {
        self.inputs
            .iter()
            .filter(|i| Some(&i.name) != self.projection_input.as_ref())
    }

    /// Projection expression supplied by the caller, if any. A blank
    /// expression means "all fields" and counts as absent.
    pub fn projection_argument<'a>(&self, arguments: &'a Map<String, Value>) -> Option<&'a str> {
        let name = self.projection_input.as_deref()?;
        arguments
            .get(name)
            .and_then(Value::as_str)
            .filter(|expression| !expression.trim().is_empty())
    }

    /// Build the outbound request from validated arguments.
    ///
    /// Only declared, non-projection inputs are forwarded. Missing or `null`
    /// arguments fall back to the declared default, if any.
    pub fn build_request(&self, arguments: &Map<String, Value>) -> ApiRequest {
        let mut forwarded = Map::new();
        let mut keys = Vec::new();
        for input in self.forwarded_inputs() {
            let value = match arguments.get(&input.name) {
                Some(Value::Null) | None => input.default.clone(),
                Some(value) => Some(value.clone()),
            };
            if let Some(value) = value {
                forwarded.insert(input.name.clone(), value);
                keys.push(input.name.as_str());
            }
        }

        let request = ApiRequest::new(self.call.method, self.call.path.clone(), self.call.origin)
            .for_operation(&self.name);
        match self.call.placement {
            Placement::Query => request.with_query(FilterSpec::from_json_object(&forwarded, &keys)),
            Placement::Body => request.with_body(Value::Object(forwarded)),
        }
    }
}

/// Registry of available operations
#[derive(Debug, Clone, Default)]
pub struct OperationCatalogue {
    operations: HashMap<String, OperationDefinition>,
}

impl OperationCatalogue {
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    pub fn register(mut self, operation: OperationDefinition) -> Self {
        self.operations.insert(operation.name.clone(), operation);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OperationDefinition> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.operations.values()
    }

    /// Operation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::value_objects::RequestPayload;
    use serde_json::json;

    fn list_posts() -> OperationDefinition {
        OperationDefinition::new("list_posts", "List posts", TransportCall::get("/posts"))
            .with_input(InputField::optional("q", "Search"))
            .with_input(
                InputField::optional("status", "Statuses").with_kind(InputKind::StringArray),
            )
            .with_input(
                InputField::optional("limit", "Page size")
                    .with_kind(InputKind::Number)
                    .with_default(10),
            )
            .with_projection_input("select", "Fields to return")
            .with_shaping(ShapingRule::Passthrough)
    }

    #[test]
    fn test_build_query_request_skips_projection_and_applies_defaults() {
        let args = json!({"status": ["open", "planned"], "select": "id", "q": "dark"});
        let request = list_posts().build_request(args.as_object().unwrap());

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.origin, Origin::Api);
        assert_eq!(request.path_and_query(), "/posts?q=dark&status=open&status=planned&limit=10");
    }

    #[test]
    fn test_build_query_request_ignores_undeclared_arguments() {
        let args = json!({"bogus": "x"});
        let request = list_posts().build_request(args.as_object().unwrap());
        assert_eq!(request.path_and_query(), "/posts?limit=10");
    }

    #[test]
    fn test_build_body_request() {
        let op = OperationDefinition::new("delete_post", "Delete", TransportCall::delete("/posts"))
            .with_input(InputField::required("id", "Post id"));
        let args = json!({"id": "p1", "extra": true});
        let request = op.build_request(args.as_object().unwrap());

        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path_and_query(), "/posts");
        assert_eq!(request.payload, RequestPayload::Body(json!({"id": "p1"})));
        assert_eq!(request.operation.as_deref(), Some("delete_post"));
    }

    #[test]
    fn test_null_argument_uses_default() {
        let args = json!({"limit": null});
        let request = list_posts().build_request(args.as_object().unwrap());
        assert_eq!(request.path_and_query(), "/posts?limit=10");
    }

    #[test]
    fn test_projection_argument() {
        let op = list_posts();
        let args = json!({"select": "id,title"});
        assert_eq!(op.projection_argument(args.as_object().unwrap()), Some("id,title"));
        assert_eq!(op.projection_argument(&Map::new()), None);
        let blank = json!({"select": "  "});
        assert_eq!(op.projection_argument(blank.as_object().unwrap()), None);
    }

    #[test]
    fn test_public_origin() {
        let call = TransportCall::get("/api/v1/submission").on_public_origin();
        assert_eq!(call.origin, Origin::Public);
        assert_eq!(call.placement, Placement::Query);
    }

    #[test]
    fn test_catalogue_registry() {
        let catalogue = OperationCatalogue::new()
            .register(list_posts())
            .register(OperationDefinition::new(
                "delete_post",
                "Delete",
                TransportCall::delete("/posts"),
            ));

        assert_eq!(catalogue.len(), 2);
        assert!(catalogue.contains("list_posts"));
        assert!(catalogue.get("nope").is_none());
        assert_eq!(catalogue.names(), vec!["delete_post", "list_posts"]);
    }
}
