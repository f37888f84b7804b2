//! Presentation layer for featurebase-mcp
//!
//! This crate contains the CLI definition and the MCP stdio server.

pub mod cli;
pub mod mcp;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use mcp::{McpHandlers, McpServer};
