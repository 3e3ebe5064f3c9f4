// Method descriptors.
//
// Exposed name is snake_case(method). A leading virtual marker (`x_` after
// snake-casing, so `X_Ready` and `x_ready` alike) is stripped and flags the
// method as an override of a host virtual hook, so `x_ready` becomes the
// virtual `ready`. Argument slots are positional placeholders `arg0..argN`,
// one per logical parameter.

use serde::Serialize;

use crate::config::WrapConfig;
use crate::error::PrepareError;
use crate::shape::{ClassShape, MethodShape};
use crate::wrapper::naming::to_snake;

/// Canonical description of one bound method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub exposed_name: String,
    /// Method name as declared on the class.
    pub accessor: String,
    pub args: Vec<String>,
    pub is_virtual: bool,
}

/// Resolve the descriptor for one candidate method.
pub fn resolve_method(
    shape: &ClassShape,
    method: &MethodShape,
    config: &WrapConfig,
) -> Result<MethodDescriptor, PrepareError> {
    let snake = to_snake(&method.name);
    let (exposed_name, is_virtual) = match snake.strip_prefix(&config.virtual_prefix) {
        Some(rest) if !config.virtual_prefix.is_empty() => (rest.to_string(), true),
        _ => (snake.clone(), false),
    };

    if exposed_name.is_empty() {
        return Err(PrepareError::Shape {
            class: shape.name.clone(),
            reason: format!("method {:?} has an empty exposed name", method.name),
        });
    }

    Ok(MethodDescriptor {
        exposed_name,
        accessor: method.name.clone(),
        args: (0..method.params).map(|i| format!("arg{i}")).collect(),
        is_virtual,
    })
}
