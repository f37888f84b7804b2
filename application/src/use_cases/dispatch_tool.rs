//! Dispatch Tool use case.
//!
//! Turns `(tool name, arguments)` into a shaped result:
//!
//! 1. Look the operation up in the catalogue (unknown → [`DispatchError::UnknownOperation`])
//! 2. Validate required inputs
//! 3. Parse the caller's projection, if the operation accepts one
//! 4. Build and send the single upstream request
//! 5. Apply the operation's [`ShapingRule`](featurebase_domain::ShapingRule)
//!
//! Every failure keeps its own variant here; flattening to protocol error
//! codes happens in the presentation layer.

use crate::ports::transport::{FeedbackTransport, TransportError};
use featurebase_domain::{
    ArgumentValidator, OperationCatalogue, Projection, ProjectionError, RequiredInputValidator,
    ValidationError,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur while dispatching a tool call.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    #[error("Invalid arguments for tool '{operation}': expected a JSON object")]
    InvalidArguments { operation: String },

    #[error(transparent)]
    MissingArgument(#[from] ValidationError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl DispatchError {
    pub fn is_unknown_operation(&self) -> bool {
        matches!(self, DispatchError::UnknownOperation(_))
    }
}

/// Use case for dispatching a single tool call.
///
/// Stateless apart from the shared, immutable catalogue and transport, so
/// any number of calls may run concurrently on one instance.
#[derive(Clone)]
pub struct DispatchToolUseCase {
    catalogue: Arc<OperationCatalogue>,
    transport: Arc<dyn FeedbackTransport>,
    validator: Arc<dyn ArgumentValidator + Send + Sync>,
}

impl DispatchToolUseCase {
    pub fn new(catalogue: Arc<OperationCatalogue>, transport: Arc<dyn FeedbackTransport>) -> Self {
        Self {
            catalogue,
            transport,
            validator: Arc::new(RequiredInputValidator),
        }
    }

    pub fn catalogue(&self) -> &OperationCatalogue {
        &self.catalogue
    }

    /// Dispatch one call. `arguments` may be absent or `null`, which is
    /// treated as an empty object.
    pub async fn execute(
        &self,
        name: &str,
        arguments: Option<&Value>,
    ) -> Result<Value, DispatchError> {
        let definition = self
            .catalogue
            .get(name)
            .ok_or_else(|| DispatchError::UnknownOperation(name.to_string()))?;

        let empty = Map::new();
        let arguments = match arguments {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(DispatchError::InvalidArguments {
                    operation: name.to_string(),
                });
            }
        };

        self.validator.validate(arguments, definition)?;

        let projection = match definition.projection_argument(arguments) {
            Some(expression) if definition.shaping.accepts_projection() => {
                Some(Projection::parse(expression)?)
            }
            _ => None,
        };

        let request = definition.build_request(arguments);
        debug!(
            tool = name,
            method = %request.method,
            path = %request.path_and_query(),
            "Dispatching tool call"
        );

        let started = Instant::now();
        let response = self.transport.send(&request).await?;
        let shaped = definition.shaping.apply(response, projection.as_ref())?;

        info!(
            tool = name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tool call completed"
        );
        trace!(tool = name, result = %shaped, "Shaped result");
        Ok(shaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use featurebase_domain::{
        ApiRequest, HttpMethod, InputField, InputKind, OperationDefinition, Origin,
        RequestPayload, ShapingRule, TransportCall,
    };
    use serde_json::json;
    use std::sync::Mutex;

    // ==================== Mock Transport ====================

    enum Canned {
        Json(Value),
        Failure(u16, String),
    }

    struct MockTransport {
        response: Canned,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        fn returning(value: Value) -> Self {
            Self {
                response: Canned::Json(value),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16, message: &str) -> Self {
            Self {
                response: Canned::Failure(status, message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FeedbackTransport for MockTransport {
        async fn send(&self, request: &ApiRequest) -> Result<Value, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.response {
                Canned::Json(value) => Ok(value.clone()),
                Canned::Failure(status, message) => Err(TransportError::TransportFailure {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    fn catalogue() -> Arc<OperationCatalogue> {
        Arc::new(
            OperationCatalogue::new()
                .register(
                    OperationDefinition::new(
                        "list_posts",
                        "List posts",
                        TransportCall::get("/posts"),
                    )
                    .with_input(
                        InputField::optional("status", "Statuses")
                            .with_kind(InputKind::StringArray),
                    )
                    .with_projection_input("select", "Fields")
                    .with_shaping(ShapingRule::Passthrough),
                )
                .register(
                    OperationDefinition::new("create_post", "Create", TransportCall::post("/posts"))
                        .with_input(InputField::required("title", "Title"))
                        .with_input(InputField::required("category", "Board"))
                        .with_shaping(ShapingRule::minimal_create("submission")),
                )
                .register(
                    OperationDefinition::new(
                        "resolve_post_slug",
                        "Resolve",
                        TransportCall::get("/api/v1/submission").on_public_origin(),
                    )
                    .with_input(InputField::required("slug", "Slug")),
                ),
        )
    }

    fn use_case(transport: Arc<MockTransport>) -> DispatchToolUseCase {
        DispatchToolUseCase::new(catalogue(), transport)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_unknown_operation_is_rejected_without_io() {
        let transport = Arc::new(MockTransport::returning(json!({})));
        let err = use_case(transport.clone())
            .execute("nope", None)
            .await
            .unwrap_err();

        assert!(err.is_unknown_operation());
        assert_eq!(err.to_string(), "Unknown tool: nope");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let transport = Arc::new(MockTransport::returning(json!({})));
        let args = json!({"title": "Dark mode"});
        let err = use_case(transport.clone())
            .execute("create_post", Some(&args))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::MissingArgument(_)));
        assert!(!err.is_unknown_operation());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_arguments_are_rejected() {
        let transport = Arc::new(MockTransport::returning(json!({})));
        let args = json!(["title"]);
        let err = use_case(transport)
            .execute("create_post", Some(&args))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_passthrough_with_projection() {
        let transport = Arc::new(MockTransport::returning(json!({
            "results": [{"id": "p1", "title": "A", "content": "long"}],
            "page": 1,
            "totalResults": 1
        })));
        let args = json!({"status": ["open"], "select": "id,title"});
        let result = use_case(transport.clone())
            .execute("list_posts", Some(&args))
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({"results": [{"id": "p1", "title": "A"}], "page": 1, "totalResults": 1})
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path_and_query(), "/posts?status=open");
    }

    #[tokio::test]
    async fn test_blank_select_returns_full_response() {
        let body = json!({"results": [{"id": "p1", "title": "A"}], "page": 1});
        for select in ["", "   "] {
            let transport = Arc::new(MockTransport::returning(body.clone()));
            let args = json!({ "select": select });
            let result = use_case(transport)
                .execute("list_posts", Some(&args))
                .await
                .unwrap();
            assert_eq!(result, body);
        }
    }

    #[tokio::test]
    async fn test_malformed_projection_fails_before_request() {
        let transport = Arc::new(MockTransport::returning(json!({"results": []})));
        let args = json!({"select": "id,author(name"});
        let err = use_case(transport.clone())
            .execute("list_posts", Some(&args))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Projection(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_minimal_create_and_body_placement() {
        let transport = Arc::new(MockTransport::returning(json!({
            "success": true,
            "submission": {"id": "new-id", "title": "Dark mode", "upvotes": 0}
        })));
        let args = json!({"title": "Dark mode", "category": "Ideas"});
        let result = use_case(transport.clone())
            .execute("create_post", Some(&args))
            .await
            .unwrap();

        assert_eq!(result, json!({"success": true, "submission": {"id": "new-id"}}));
        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(
            requests[0].payload,
            RequestPayload::Body(json!({"title": "Dark mode", "category": "Ideas"}))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_preserved() {
        let transport = Arc::new(MockTransport::failing(404, r#"{"message":"not found"}"#));
        let args = json!({"slug": "missing"});
        let err = use_case(transport)
            .execute("resolve_post_slug", Some(&args))
            .await
            .unwrap_err();

        match err {
            DispatchError::Transport(TransportError::TransportFailure { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, r#"{"message":"not found"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_public_origin_request() {
        let transport = Arc::new(MockTransport::returning(json!({"id": "p1"})));
        let args = json!({"slug": "dark-mode"});
        use_case(transport.clone())
            .execute("resolve_post_slug", Some(&args))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].origin, Origin::Public);
        assert_eq!(requests[0].path_and_query(), "/api/v1/submission?slug=dark-mode");
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let transport = Arc::new(MockTransport::returning(json!({
            "results": [{"id": "p1", "title": "A"}]
        })));
        let use_case = use_case(transport.clone());

        let with_select = json!({"select": "id"});
        let without_select = json!({});
        let (a, b) = futures::join!(
            use_case.execute("list_posts", Some(&with_select)),
            use_case.execute("list_posts", Some(&without_select)),
        );

        assert_eq!(a.unwrap(), json!({"results": [{"id": "p1"}]}));
        assert_eq!(b.unwrap(), json!({"results": [{"id": "p1", "title": "A"}]}));
        assert_eq!(transport.requests().len(), 2);
    }
}
