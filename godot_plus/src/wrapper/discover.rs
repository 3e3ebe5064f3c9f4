// Member discovery in one pass over a class manifest.
//
// Partitions the manifest into:
// - `embedded_names`: every exported method reachable through an embedded
//   base capability (`#[godot(base)]`). These belong to the base class the
//   host already knows about and must never be re-registered as the outer
//   class's own members.
// - `data_fields`: exported, non-embedded fields in declaration order.
//   Signals are still in here; the classifier separates them later.
// - `methods`: the class's exported methods minus anything claimed by an
//   embedded base or listed as a reserved lifecycle hook.
//
// A method the outer class declares under the same name as a base method is
// excluded as well: the base's implementation is what the host binds.
//
// Names in `embedded_names` and the reserved list are compared in
// snake_case form, so `SetPosition` and `set_position` are the same member.

use std::collections::BTreeSet;

use crate::config::WrapConfig;
use crate::error::PrepareError;
use crate::shape::{ClassShape, FieldShape, MethodShape, TypeKind};
use crate::wrapper::naming::to_snake;

/// Result of partitioning one class manifest.
#[derive(Debug)]
pub struct Discovery<'a> {
    /// Snake-cased names of members provided by embedded bases.
    pub embedded_names: BTreeSet<String>,
    pub data_fields: Vec<&'a FieldShape>,
    pub methods: Vec<&'a MethodShape>,
}

impl Discovery<'_> {
    /// True if `name` is provided by an embedded base.
    pub fn is_embedded(&self, name: &str) -> bool {
        self.embedded_names.contains(&to_snake(name))
    }
}

/// Partition `shape` into embedded names, data fields and candidate methods.
pub fn discover<'a>(
    shape: &'a ClassShape,
    config: &WrapConfig,
) -> Result<Discovery<'a>, PrepareError> {
    check_shape(shape)?;

    let mut embedded_names = BTreeSet::new();
    let mut data_fields = Vec::with_capacity(shape.fields.len());

    for field in &shape.fields {
        if field.embedded {
            let TypeKind::Base(surface) = &field.ty.kind else {
                return Err(PrepareError::Shape {
                    class: shape.name.clone(),
                    reason: format!(
                        "embedded field {:?} of type {} is not a base capability",
                        field.name, field.ty.name
                    ),
                });
            };
            embedded_names.extend(
                surface
                    .methods
                    .iter()
                    .filter(|m| m.exported)
                    .map(|m| to_snake(&m.name)),
            );
            continue;
        }
        if field.exported {
            data_fields.push(field);
        }
    }

    let reserved: BTreeSet<String> = config.reserved_methods.iter().map(|m| to_snake(m)).collect();
    let methods = shape
        .methods
        .iter()
        .filter(|m| m.exported)
        .filter(|m| {
            let snake = to_snake(&m.name);
            !embedded_names.contains(&snake) && !reserved.contains(&snake)
        })
        .collect();

    Ok(Discovery {
        embedded_names,
        data_fields,
        methods,
    })
}

/// Reject manifests that cannot describe a class at all.
fn check_shape(shape: &ClassShape) -> Result<(), PrepareError> {
    let shape_error = |reason: String| PrepareError::Shape {
        class: shape.name.clone(),
        reason,
    };

    if !is_identifier(&shape.name) {
        return Err(shape_error(
            "class name must be a non-empty identifier".to_string(),
        ));
    }

    let mut seen = BTreeSet::new();
    for field in &shape.fields {
        if !is_identifier(&field.name) {
            return Err(shape_error(format!(
                "field name {:?} is not an identifier",
                field.name
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(shape_error(format!(
                "field {:?} is declared twice",
                field.name
            )));
        }
    }
    for method in &shape.methods {
        if !is_identifier(&method.name) {
            return Err(shape_error(format!(
                "method name {:?} is not an identifier",
                method.name
            )));
        }
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
