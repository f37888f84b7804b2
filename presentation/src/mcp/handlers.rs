//! MCP method handlers.
//!
//! Routes each JSON-RPC request to its handler and flattens
//! [`DispatchError`] into the two error codes tool callers see.

use super::protocol::{
    CallToolParams, CallToolResult, JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse,
    PROTOCOL_VERSION, RequestId, RpcError, SERVER_NAME, methods,
};
use featurebase_application::{DispatchError, DispatchToolUseCase, ToolSchemaPort};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handles MCP methods on behalf of the stdio server.
#[derive(Clone)]
pub struct McpHandlers {
    dispatcher: DispatchToolUseCase,
    schema: Arc<dyn ToolSchemaPort>,
    server_version: String,
}

impl McpHandlers {
    pub fn new(dispatcher: DispatchToolUseCase, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            dispatcher,
            schema,
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_server_version(mut self, version: impl Into<String>) -> Self {
        self.server_version = version.into();
        self
    }

    /// Handle one message. Returns `None` for notifications.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                Some(id),
                RpcError::invalid_request(format!(
                    "Unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            ));
        }

        debug!(id = %id, method = %request.method, "Request received");
        let response = match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(id),
            methods::PING => JsonRpcResponse::success(Some(id), json!({})),
            methods::TOOLS_LIST => self.handle_tools_list(id),
            methods::TOOLS_CALL => self.handle_tools_call(id, request.params).await,
            other => JsonRpcResponse::error(
                Some(id),
                RpcError::method_not_found(format!("Method not found: {}", other)),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: RequestId) -> JsonRpcResponse {
        JsonRpcResponse::success(
            Some(id),
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": self.server_version,
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: RequestId) -> JsonRpcResponse {
        let tools = self.schema.all_tools_schema(self.dispatcher.catalogue());
        JsonRpcResponse::success(Some(id), json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    Some(id),
                    RpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                );
            }
            None => {
                return JsonRpcResponse::error(
                    Some(id),
                    RpcError::invalid_params("Missing tools/call params"),
                );
            }
        };

        match self
            .dispatcher
            .execute(&params.name, params.arguments.as_ref())
            .await
        {
            Ok(result) => match tool_result(&result) {
                Ok(content) => JsonRpcResponse::success(Some(id), content),
                Err(e) => JsonRpcResponse::error(
                    Some(id),
                    RpcError::internal_error(format!("Failed to serialize result: {}", e)),
                ),
            },
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                JsonRpcResponse::error(Some(id), dispatch_error_to_rpc(&e))
            }
        }
    }
}

/// Wrap a shaped result as a single text content block.
fn tool_result(result: &Value) -> Result<Value, serde_json::Error> {
    let text = serde_json::to_string(result)?;
    serde_json::to_value(CallToolResult::text(text))
}

/// Unknown tools map to method-not-found; every other failure is reported
/// as an internal error carrying the underlying message.
pub fn dispatch_error_to_rpc(error: &DispatchError) -> RpcError {
    if error.is_unknown_operation() {
        RpcError::method_not_found(error.to_string())
    } else {
        RpcError::internal_error(format!("Featurebase API error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::error_codes;
    use async_trait::async_trait;
    use featurebase_application::{FeedbackTransport, TransportError};
    use featurebase_domain::{
        ApiRequest, InputField, OperationCatalogue, OperationDefinition, ShapingRule,
        TransportCall,
    };

    struct StaticTransport(Result<Value, (u16, &'static str)>);

    #[async_trait]
    impl FeedbackTransport for StaticTransport {
        async fn send(&self, _request: &ApiRequest) -> Result<Value, TransportError> {
            self.0
                .clone()
                .map_err(|(status, message)| TransportError::TransportFailure {
                    status,
                    message: message.to_string(),
                })
        }
    }

    struct NamesOnly;

    impl ToolSchemaPort for NamesOnly {
        fn tool_to_schema(&self, operation: &OperationDefinition) -> Value {
            json!({ "name": operation.name })
        }

        fn all_tools_schema(&self, catalogue: &OperationCatalogue) -> Vec<Value> {
            catalogue
                .names()
                .into_iter()
                .map(|name| json!({ "name": name }))
                .collect()
        }
    }

    fn handlers(response: Result<Value, (u16, &'static str)>) -> McpHandlers {
        let catalogue = OperationCatalogue::new()
            .register(
                OperationDefinition::new("list_items", "List items", TransportCall::get("/items"))
                    .with_projection_input("select", "Fields to return")
                    .with_shaping(ShapingRule::Passthrough),
            )
            .register(
                OperationDefinition::new("get_item", "Get item", TransportCall::get("/item"))
                    .with_input(InputField::required("id", "Item ID")),
            );
        let dispatcher = DispatchToolUseCase::new(
            Arc::new(catalogue),
            Arc::new(StaticTransport(response)),
        );
        McpHandlers::new(dispatcher, Arc::new(NamesOnly)).with_server_version("9.9.9")
    }

    fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(RequestId::Number(id)),
            method: method.to_string(),
            params,
        }
    }

    fn error_of(response: &JsonRpcResponse) -> &RpcError {
        response.error.as_ref().expect("expected an error response")
    }

    #[tokio::test]
    async fn test_initialize() {
        let h = handlers(Ok(json!({})));
        let resp = h.handle(request(1, "initialize", Some(json!({})))).await.unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"], json!({"tools": {}}));
        assert_eq!(result["serverInfo"]["name"], "featurebase-mcp");
        assert_eq!(result["serverInfo"]["version"], "9.9.9");
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let h = handlers(Ok(json!({})));
        let notification = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: methods::INITIALIZED.to_string(),
            params: None,
        };
        assert!(h.handle(notification).await.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let h = handlers(Ok(json!({})));
        let resp = h.handle(request(2, "ping", None)).await.unwrap();
        assert_eq!(resp.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let h = handlers(Ok(json!({})));
        let resp = h.handle(request(3, "tools/list", None)).await.unwrap();
        assert_eq!(
            resp.result.unwrap(),
            json!({"tools": [{"name": "get_item"}, {"name": "list_items"}]})
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let h = handlers(Ok(json!({})));
        let resp = h.handle(request(4, "resources/list", None)).await.unwrap();
        assert_eq!(error_of(&resp).code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let h = handlers(Ok(json!({})));
        let mut req = request(5, "ping", None);
        req.jsonrpc = "1.0".to_string();
        let resp = h.handle(req).await.unwrap();
        assert_eq!(error_of(&resp).code, error_codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_tools_call_returns_serialized_text() {
        let h = handlers(Ok(json!({
            "results": [{"id": "a", "title": "x"}],
            "page": 1
        })));
        let params = json!({"name": "list_items", "arguments": {"select": "id"}});
        let resp = h.handle(request(6, "tools/call", Some(params))).await.unwrap();

        let result = resp.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        let text = result["content"][0]["text"].as_str().unwrap();
        let shaped: Value = serde_json::from_str(text).unwrap();
        assert_eq!(shaped, json!({"results": [{"id": "a"}], "page": 1}));
    }

    #[test]
    fn test_tool_result_wraps_serialized_json() {
        let content = tool_result(&json!({"results": [], "page": 2})).unwrap();
        assert_eq!(content["content"].as_array().unwrap().len(), 1);
        assert_eq!(content["content"][0]["type"], "text");
        let text = content["content"][0]["text"].as_str().unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(text).unwrap(),
            json!({"results": [], "page": 2})
        );
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let h = handlers(Ok(json!({})));
        let params = json!({"name": "nope", "arguments": {}});
        let resp = h.handle(request(7, "tools/call", Some(params))).await.unwrap();
        let err = error_of(&resp);
        assert_eq!(err.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(err.message, "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_tools_call_upstream_failure() {
        let h = handlers(Err((404, r#"{"message":"not found"}"#)));
        let params = json!({"name": "get_item", "arguments": {"id": "x"}});
        let resp = h.handle(request(8, "tools/call", Some(params))).await.unwrap();
        let err = error_of(&resp);
        assert_eq!(err.code, error_codes::INTERNAL_ERROR);
        assert_eq!(
            err.message,
            r#"Featurebase API error: HTTP 404: {"message":"not found"}"#
        );
    }

    #[tokio::test]
    async fn test_tools_call_missing_argument_is_internal_error() {
        let h = handlers(Ok(json!({})));
        let params = json!({"name": "get_item"});
        let resp = h.handle(request(9, "tools/call", Some(params))).await.unwrap();
        let err = error_of(&resp);
        assert_eq!(err.code, error_codes::INTERNAL_ERROR);
        assert!(err.message.contains("Missing required argument 'id'"));
    }

    #[tokio::test]
    async fn test_tools_call_malformed_projection() {
        let h = handlers(Ok(json!({"results": []})));
        let params = json!({"name": "list_items", "arguments": {"select": "id,(title"}});
        let resp = h.handle(request(10, "tools/call", Some(params))).await.unwrap();
        let err = error_of(&resp);
        assert_eq!(err.code, error_codes::INTERNAL_ERROR);
        assert!(err.message.contains("Malformed projection"));
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let h = handlers(Ok(json!({})));
        let resp = h.handle(request(11, "tools/call", None)).await.unwrap();
        assert_eq!(error_of(&resp).code, error_codes::INVALID_PARAMS);

        let resp = h
            .handle(request(12, "tools/call", Some(json!({"arguments": {}}))))
            .await
            .unwrap();
        assert_eq!(error_of(&resp).code, error_codes::INVALID_PARAMS);
    }
}
