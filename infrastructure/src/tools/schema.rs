//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing MCP tool
//! descriptors: `{ name, description, inputSchema }`.

use featurebase_application::ToolSchemaPort;
use featurebase_domain::{InputField, InputKind, OperationCatalogue, OperationDefinition};
use serde_json::{Map, Value, json};

/// Default implementation producing MCP tool descriptors.
///
/// Handles [`InputKind`] → JSON Schema mapping:
/// - `String` → `"string"`
/// - `Number` → `"number"`
/// - `Boolean` → `"boolean"`
/// - `StringArray` → `"array"` of `"string"` items
/// - `Object` → `"object"`
/// - `Enum` → `"string"` with an `enum` list
pub struct JsonSchemaToolConverter;

fn property_schema(input: &InputField) -> Value {
    let mut prop = Map::new();
    match &input.kind {
        InputKind::String => {
            prop.insert("type".to_string(), json!("string"));
        }
        InputKind::Number => {
            prop.insert("type".to_string(), json!("number"));
        }
        InputKind::Boolean => {
            prop.insert("type".to_string(), json!("boolean"));
        }
        InputKind::Object => {
            prop.insert("type".to_string(), json!("object"));
        }
        InputKind::StringArray => {
            prop.insert("type".to_string(), json!("array"));
            prop.insert("items".to_string(), json!({ "type": "string" }));
        }
        InputKind::Enum(values) => {
            prop.insert("type".to_string(), json!("string"));
            prop.insert("enum".to_string(), json!(values));
        }
    }
    prop.insert("description".to_string(), json!(input.description));
    if let Some(default) = &input.default {
        prop.insert("default".to_string(), default.clone());
    }
    Value::Object(prop)
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, operation: &OperationDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for input in &operation.inputs {
            properties.insert(input.name.clone(), property_schema(input));
            if input.required {
                required.push(json!(input.name));
            }
        }

        json!({
            "name": operation.name,
            "description": operation.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, catalogue: &OperationCatalogue) -> Vec<Value> {
        let mut operations: Vec<&OperationDefinition> = catalogue.all().collect();
        operations.sort_by_key(|op| &op.name);
        operations
            .into_iter()
            .map(|op| self.tool_to_schema(op))
            .collect()
    }
}
