//! Domain layer for featurebase-mcp
//!
//! This crate contains the pure request/response shaping logic. It performs
//! no I/O and knows nothing about HTTP clients or the MCP wire format.
//!
//! # Core Concepts
//!
//! - **Query serialization** ([`query`]): filter objects become deterministic
//!   query strings with repeated keys for lists.
//! - **Field projection** ([`projection`]): expressions like
//!   `"id,author(name)"` reduce JSON values to the requested fields.
//! - **Operations** ([`operation`]): declared inputs, one transport call and
//!   a [`ShapingRule`] per named tool.

pub mod operation;
pub mod projection;
pub mod query;
pub mod shaping;
pub mod util;

// Re-export commonly used types
pub use operation::{
    ApiRequest, ArgumentValidator, HttpMethod, InputField, InputKind, OperationCatalogue,
    OperationDefinition, Origin, Placement, RequestPayload, RequiredInputValidator,
    TransportCall, ValidationError,
};
pub use projection::{FieldName, FieldSelector, Projection, ProjectionError, project};
pub use query::{FilterSpec, FilterValue, Scalar};
pub use shaping::ShapingRule;
