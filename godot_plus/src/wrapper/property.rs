// Property resolution: accessors, signatures and bridge names.
//
// For one data field:
// 1. Exposed name: snake_case(field), or the annotation's `name`.
// 2. Getter: `<getter_prefix>_<snake field>` (prefix snake-cased, so `Get`
//    and `get_` agree) or the annotation's `get`. Must
//    exist among the class's exported methods and take 0 arguments and
//    return exactly 1 result.
// 3. Setter: `<setter_prefix>_<snake field>` or the annotation's `set`. The
//    read-only sentinel (`set=nil`) removes the setter and its bridge name.
//    When present it must take exactly 1 argument and return nothing.
// 4. Bridge names: `<getter_bridge_prefix><exposed>` and
//    `<setter_bridge_prefix><exposed>`. The host only ever sees these, so
//    renaming a Rust accessor never changes the host-visible API.
//
// The resolved accessor names are reported back to the caller so the method
// resolver can skip them; an accessor is never also registered as a plain
// method.

use serde::Serialize;

use crate::config::WrapConfig;
use crate::error::{AccessorRole, PrepareError};
use crate::shape::{ClassShape, FieldShape, MethodShape};
use crate::variant::VariantType;
use crate::wrapper::classify::map_to_variant_type;
use crate::wrapper::naming::{same_member, to_snake};
use crate::wrapper::tag::TagData;

/// Canonical description of one property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    /// Host-visible property name.
    pub exposed_name: String,
    #[serde(with = "crate::variant::serde_variant")]
    pub ty: VariantType,
    /// Host-facing getter bridge name.
    pub getter_bridge: String,
    /// Host-facing setter bridge name; `None` for read-only properties.
    pub setter_bridge: Option<String>,
    /// Getter accessor as declared on the class.
    pub getter: String,
    /// Setter accessor as declared on the class; `None` for read-only.
    pub setter: Option<String>,
    /// Argument names of the setter bridge.
    pub setter_args: Vec<String>,
}

impl PropertyDescriptor {
    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }
}

/// Resolve the property descriptor for a non-signal data field.
pub fn resolve_property(
    shape: &ClassShape,
    field: &FieldShape,
    tag: Option<&TagData>,
    config: &WrapConfig,
) -> Result<PropertyDescriptor, PrepareError> {
    let field_snake = to_snake(&field.name);
    let exposed_name = tag
        .and_then(|t| t.name.clone())
        .unwrap_or_else(|| field_snake.clone());

    let ty = map_to_variant_type(&field.ty).ok_or_else(|| PrepareError::UnsupportedType {
        class: shape.name.clone(),
        field: field.name.clone(),
        type_name: field.ty.name.clone(),
    })?;

    let wanted_getter = tag
        .and_then(|t| t.getter.clone())
        .unwrap_or_else(|| config.default_getter(&field_snake));
    let getter = find_accessor(shape, &wanted_getter, AccessorRole::Getter)?;
    check_signature(shape, getter, AccessorRole::Getter)?;

    let wanted_setter = match tag.and_then(|t| t.setter.as_deref()) {
        Some(sentinel) if sentinel == config.read_only_sentinel => None,
        Some(custom) => Some(custom.to_string()),
        None => Some(config.default_setter(&field_snake)),
    };
    let setter = match wanted_setter {
        Some(wanted) => {
            let setter = find_accessor(shape, &wanted, AccessorRole::Setter)?;
            check_signature(shape, setter, AccessorRole::Setter)?;
            Some(setter.name.clone())
        }
        None => None,
    };

    Ok(PropertyDescriptor {
        getter_bridge: format!("{}{exposed_name}", config.getter_bridge_prefix),
        setter_bridge: setter
            .as_ref()
            .map(|_| format!("{}{exposed_name}", config.setter_bridge_prefix)),
        getter: getter.name.clone(),
        setter,
        setter_args: vec![config.setter_arg_name.clone()],
        exposed_name,
        ty,
    })
}

/// Find an exported method by exact or snake-cased name.
fn find_accessor<'a>(
    shape: &'a ClassShape,
    wanted: &str,
    role: AccessorRole,
) -> Result<&'a MethodShape, PrepareError> {
    let exported = || shape.methods.iter().filter(|m| m.exported);
    exported()
        .find(|m| m.name == wanted)
        .or_else(|| exported().find(|m| same_member(&m.name, wanted)))
        .ok_or_else(|| PrepareError::MissingAccessor {
            class: shape.name.clone(),
            role,
            accessor: wanted.to_string(),
        })
}

fn check_signature(
    shape: &ClassShape,
    method: &MethodShape,
    role: AccessorRole,
) -> Result<(), PrepareError> {
    let (params, returns, expected) = match role {
        AccessorRole::Getter => (0, 1, "0 arguments and 1 result"),
        AccessorRole::Setter => (1, 0, "1 argument and no result"),
    };
    if method.params == params && method.returns == returns {
        return Ok(());
    }
    Err(PrepareError::SignatureMismatch {
        class: shape.name.clone(),
        role,
        accessor: method.name.clone(),
        expected,
        params: method.params,
        returns: method.returns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::Vector2;
    use crate::shape::{Reflect, TypeShape};
    use crate::wrapper::tag::parse_tag;

    fn resolve(shape: &ClassShape, field: usize) -> Result<PropertyDescriptor, PrepareError> {
        let field = &shape.fields[field];
        let tag = parse_tag(&field.tag);
        resolve_property(shape, field, tag.as_ref(), &WrapConfig::default())
    }

    #[test]
    fn convention_accessors_in_rust_spelling() {
        let shape = ClassShape::new("Ship")
            .field(FieldShape::exported("max_speed", f64::type_shape()))
            .method(MethodShape::new("get_max_speed", 0, 1))
            .method(MethodShape::new("set_max_speed", 1, 0));
        let prop = resolve(&shape, 0).unwrap();
        assert_eq!(
            prop,
            PropertyDescriptor {
                exposed_name: "max_speed".into(),
                ty: VariantType::FLOAT,
                getter_bridge: "get_property_max_speed".into(),
                setter_bridge: Some("set_property_max_speed".into()),
                getter: "get_max_speed".into(),
                setter: Some("set_max_speed".into()),
                setter_args: vec!["value".into()],
            }
        );
    }

    #[test]
    fn camel_case_prefix_finds_snake_accessors() {
        let config = WrapConfig {
            getter_prefix: "Get".into(),
            setter_prefix: "Set".into(),
            ..WrapConfig::default()
        };
        let shape = ClassShape::new("Ship")
            .field(FieldShape::exported("Speed", i64::type_shape()))
            .method(MethodShape::new("get_speed", 0, 1))
            .method(MethodShape::new("set_speed", 1, 0));
        let field = &shape.fields[0];
        let prop = resolve_property(&shape, field, None, &config).unwrap();
        assert_eq!(prop.getter, "get_speed");
        assert_eq!(prop.setter.as_deref(), Some("set_speed"));
    }

    #[test]
    fn name_override_keeps_camel_accessors() {
        let shape = ClassShape::new("MyNode2D")
            .field(FieldShape::exported("Speed", i64::type_shape()).with_tag("name=speed2"))
            .method(MethodShape::new("SetSpeed", 1, 0))
            .method(MethodShape::new("GetSpeed", 0, 1));
        let prop = resolve(&shape, 0).unwrap();
        assert_eq!(prop.exposed_name, "speed2");
        assert_eq!(prop.getter, "GetSpeed");
        assert_eq!(prop.setter.as_deref(), Some("SetSpeed"));
        assert_eq!(prop.getter_bridge, "get_property_speed2");
        assert_eq!(prop.setter_bridge.as_deref(), Some("set_property_speed2"));
    }

    #[test]
    fn read_only_sentinel_drops_setter_and_bridge() {
        let shape = ClassShape::new("MyNode2D")
            .field(
                FieldShape::exported("Direction", Vector2::type_shape())
                    .with_tag("get=MyDirection,set=nil"),
            )
            .method(MethodShape::new("MyDirection", 0, 1));
        let prop = resolve(&shape, 0).unwrap();
        assert_eq!(prop.exposed_name, "direction");
        assert_eq!(prop.getter, "MyDirection");
        assert!(prop.is_read_only());
        assert_eq!(prop.setter_bridge, None);
        assert_eq!(prop.ty, VariantType::VECTOR2);
    }

    #[test]
    fn custom_setter_override() {
        let shape = ClassShape::new("Door")
            .field(FieldShape::exported("open", bool::type_shape()).with_tag("set=toggle_to"))
            .method(MethodShape::new("get_open", 0, 1))
            .method(MethodShape::new("toggle_to", 1, 0));
        let prop = resolve(&shape, 0).unwrap();
        assert_eq!(prop.setter.as_deref(), Some("toggle_to"));
    }

    #[test]
    fn missing_getter_names_class_and_accessor() {
        let shape = ClassShape::new("Door")
            .field(FieldShape::exported("open", bool::type_shape()))
            .method(MethodShape::new("set_open", 1, 0));
        let err = resolve(&shape, 0).unwrap_err();
        assert_eq!(
            err,
            PrepareError::MissingAccessor {
                class: "Door".into(),
                role: AccessorRole::Getter,
                accessor: "get_open".into(),
            }
        );
    }

    #[test]
    fn missing_setter_is_an_error_unless_disabled() {
        let shape = ClassShape::new("Door")
            .field(FieldShape::exported("open", bool::type_shape()))
            .method(MethodShape::new("get_open", 0, 1));
        let err = resolve(&shape, 0).unwrap_err();
        assert!(matches!(
            err,
            PrepareError::MissingAccessor {
                role: AccessorRole::Setter,
                ..
            }
        ));
    }

    #[test]
    fn private_accessor_is_not_found() {
        let shape = ClassShape::new("Door")
            .field(FieldShape::exported("open", bool::type_shape()).with_tag("set=nil"))
            .method(MethodShape::private("get_open", 0, 1));
        assert!(matches!(
            resolve(&shape, 0),
            Err(PrepareError::MissingAccessor { .. })
        ));
    }

    #[test]
    fn getter_with_two_results_is_a_signature_mismatch() {
        let shape = ClassShape::new("MyNode2D")
            .field(
                FieldShape::exported("Direction", Vector2::type_shape())
                    .with_tag("get=MyDirection,set=nil"),
            )
            .method(MethodShape::new("MyDirection", 0, 2));
        let err = resolve(&shape, 0).unwrap_err();
        assert!(matches!(
            &err,
            PrepareError::SignatureMismatch { class, role: AccessorRole::Getter, accessor, .. }
                if class == "MyNode2D" && accessor == "MyDirection"
        ));
    }

    #[test]
    fn setter_with_result_is_a_signature_mismatch() {
        let shape = ClassShape::new("Door")
            .field(FieldShape::exported("open", bool::type_shape()))
            .method(MethodShape::new("get_open", 0, 1))
            .method(MethodShape::new("set_open", 1, 1));
        let err = resolve(&shape, 0).unwrap_err();
        assert!(matches!(
            err,
            PrepareError::SignatureMismatch {
                role: AccessorRole::Setter,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_field_type() {
        let shape = ClassShape::new("Cache")
            .field(FieldShape::exported("entries", TypeShape::opaque("HashMap<u32, Entry>")))
            .method(MethodShape::new("get_entries", 0, 1));
        let err = resolve(&shape, 0).unwrap_err();
        assert!(err.to_string().contains("HashMap<u32, Entry>"), "{err}");
    }

    #[test]
    fn exact_name_wins_over_snake_match() {
        let shape = ClassShape::new("Odd")
            .field(FieldShape::exported("hp", i64::type_shape()).with_tag("set=nil"))
            .method(MethodShape::new("GetHp", 0, 1))
            .method(MethodShape::new("get_hp", 0, 1));
        assert_eq!(resolve(&shape, 0).unwrap().getter, "get_hp");
    }
}
