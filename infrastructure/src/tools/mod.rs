//! Tool descriptors for the calling protocol
//!
//! Converts catalogue operations into the JSON Schema tool listing returned
//! by `tools/list`.

mod schema;

pub use schema::JsonSchemaToolConverter;
