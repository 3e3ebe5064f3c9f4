// Class descriptor builder.
//
// `prepare` runs the whole pipeline for one constructor:
//
//   constructor → instance → ClassShape
//     → discover (embedded names, data fields, candidate methods)
//     → per data field: signal descriptor or property descriptor
//     → per remaining candidate method: method descriptor
//     → conflict checks → ClassInfo
//
// The first failure aborts; no partial descriptor escapes. The result is a
// pure function of the class's manifest, so preparing the same constructor
// twice yields equal descriptors.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::WrapConfig;
use crate::error::{MemberKind, PrepareError};
use crate::shape::{ClassConstructor, ClassShape};
use crate::wrapper::classify::is_signal_type;
use crate::wrapper::discover::{Discovery, discover};
use crate::wrapper::method::{MethodDescriptor, resolve_method};
use crate::wrapper::naming::same_member;
use crate::wrapper::property::{PropertyDescriptor, resolve_property};
use crate::wrapper::signal::{SignalDescriptor, resolve_signal};
use crate::wrapper::tag::parse_tag;

/// Immutable registration manifest for one class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub name: String,
    /// Host class of the embedded base capability, if any.
    pub parent: Option<String>,
    /// In field declaration order.
    pub properties: Vec<PropertyDescriptor>,
    /// In method-set order.
    pub methods: Vec<MethodDescriptor>,
    /// In field declaration order.
    pub signals: Vec<SignalDescriptor>,
}

/// Build the descriptor for the class `ctor` produces.
///
/// Invokes the constructor once to obtain the instance whose manifest is
/// introspected.
pub fn prepare(ctor: &ClassConstructor, config: &WrapConfig) -> Result<ClassInfo, PrepareError> {
    let instance = ctor.create();
    let shape = instance.class_shape();
    build(&shape, config)
}

/// Build a descriptor directly from a manifest.
pub fn build(shape: &ClassShape, config: &WrapConfig) -> Result<ClassInfo, PrepareError> {
    let discovery = discover(shape, config)?;

    let mut properties = Vec::new();
    let mut signals = Vec::new();
    let mut consumed: Vec<&str> = Vec::new();

    for field in &discovery.data_fields {
        let tag = parse_tag(&field.tag);
        if is_signal_type(&field.ty) {
            signals.push(resolve_signal(shape, field, tag.as_ref())?);
            continue;
        }
        let property = resolve_property(shape, field, tag.as_ref(), config)?;
        tracing::trace!(
            class = %shape.name,
            property = %property.exposed_name,
            getter = %property.getter,
            "resolved property"
        );
        properties.push(property);
    }
    for property in &properties {
        consumed.push(&property.getter);
        if let Some(setter) = &property.setter {
            consumed.push(setter);
        }
    }

    let methods = discovery
        .methods
        .iter()
        .filter(|m| !consumed.iter().any(|c| same_member(&m.name, c)))
        .map(|m| resolve_method(shape, m, config))
        .collect::<Result<Vec<_>, _>>()?;

    let info = ClassInfo {
        name: shape.name.clone(),
        parent: shape.parent().map(str::to_string),
        properties,
        methods,
        signals,
    };
    check_conflicts(&info, &discovery)?;
    Ok(info)
}

/// Exposed names must be unique per list, and no member may reuse a name
/// the embedded base already provides.
fn check_conflicts(info: &ClassInfo, discovery: &Discovery<'_>) -> Result<(), PrepareError> {
    let lists: [(MemberKind, Vec<&str>); 3] = [
        (
            MemberKind::Property,
            info.properties.iter().map(|p| p.exposed_name.as_str()).collect(),
        ),
        (
            MemberKind::Method,
            info.methods.iter().map(|m| m.exposed_name.as_str()).collect(),
        ),
        (
            MemberKind::Signal,
            info.signals.iter().map(|s| s.exposed_name.as_str()).collect(),
        ),
    ];

    for (kind, names) in &lists {
        let mut seen = BTreeSet::new();
        for name in names {
            if !seen.insert(*name) {
                return Err(PrepareError::DuplicateName {
                    class: info.name.clone(),
                    kind: *kind,
                    name: name.to_string(),
                });
            }
            if discovery.is_embedded(name) {
                return Err(PrepareError::BaseCollision {
                    class: info.name.clone(),
                    name: name.to_string(),
                });
            }
        }
    }
    Ok(())
}
