//! Tool schema conversion port.
//!
//! Separates "which operations exist" (domain) from "how they are described
//! to the calling protocol" (infrastructure). The domain defines
//! [`OperationDefinition`] and [`OperationCatalogue`]; this port turns them
//! into the JSON Schema tool listing.

use featurebase_domain::{OperationCatalogue, OperationDefinition};

/// Port for converting operation definitions to tool descriptors.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single operation to a tool descriptor with JSON Schema input.
    fn tool_to_schema(&self, operation: &OperationDefinition) -> serde_json::Value;

    /// Convert every operation in the catalogue (sorted by name).
    fn all_tools_schema(&self, catalogue: &OperationCatalogue) -> Vec<serde_json::Value>;
}
