//! Operation domain
//!
//! An operation is one named unit of work exposed to callers: its declared
//! inputs, the single HTTP call it makes and the rule that shapes the
//! response.

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{
    HttpMethod, InputField, InputKind, OperationCatalogue, OperationDefinition, Origin, Placement,
    TransportCall,
};
pub use traits::{ArgumentValidator, RequiredInputValidator};
pub use value_objects::{ApiRequest, RequestPayload, ValidationError};
