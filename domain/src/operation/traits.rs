//! Operation domain traits
//!
//! Pure validation of call arguments against an operation's declared inputs.
//! The async transport port lives in the application layer.

use super::entities::OperationDefinition;
use super::value_objects::ValidationError;
use serde_json::{Map, Value};

/// Validator for operation arguments
pub trait ArgumentValidator {
    fn validate(
        &self,
        arguments: &Map<String, Value>,
        definition: &OperationDefinition,
    ) -> Result<(), ValidationError>;
}

/// Checks that every required input is present and non-null.
///
/// Types are not coerced or checked; unknown arguments are tolerated and
/// simply never forwarded.
#[derive(Debug, Clone, Default)]
pub struct RequiredInputValidator;

impl ArgumentValidator for RequiredInputValidator {
    fn validate(
        &self,
        arguments: &Map<String, Value>,
        definition: &OperationDefinition,
    ) -> Result<(), ValidationError> {
        let missing = definition
            .inputs
            .iter()
            .filter(|input| input.required)
            .find(|input| matches!(arguments.get(&input.name), None | Some(Value::Null)));

        match missing {
            Some(input) => Err(ValidationError::MissingArgument {
                operation: definition.name.clone(),
                argument: input.name.clone(),
            }),
            None => Ok(()),
        }
    }
}
