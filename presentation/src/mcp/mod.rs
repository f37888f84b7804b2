//! MCP (Model Context Protocol) server
//!
//! - [`protocol`]: JSON-RPC 2.0 message types and error codes
//! - [`handlers`]: `initialize`, `ping`, `tools/list`, `tools/call`
//! - [`server`]: newline-delimited stdio transport

pub mod handlers;
pub mod protocol;
pub mod server;

pub use handlers::{McpHandlers, dispatch_error_to_rpc};
pub use protocol::{JsonRpcRequest, JsonRpcResponse, RequestId, RpcError};
pub use server::McpServer;
