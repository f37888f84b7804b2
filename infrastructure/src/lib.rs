//! Infrastructure layer for featurebase-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the reqwest HTTP transport, configuration
//! file loading, the operation catalogue and the tool schema converter.

pub mod catalogue;
pub mod config;
pub mod http;
pub mod tools;

// Re-export commonly used types
pub use catalogue::default_catalogue;
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use http::{HttpTransport, TransportSetupError, failure_message};
pub use tools::JsonSchemaToolConverter;
