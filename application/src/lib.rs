//! Application layer for featurebase-mcp
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use ports::{
    tool_schema::ToolSchemaPort,
    transport::{FeedbackTransport, TransportError},
};
pub use use_cases::dispatch_tool::{DispatchError, DispatchToolUseCase};
