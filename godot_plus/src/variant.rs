// The host's variant-type taxonomy.
//
// `VariantType` is the engine's own enumeration, taken from
// `godot::builtin`, so a descriptor can be handed to the native layer
// without translation. This module adds what registration needs on top of
// it: the script spelling of each type (`variant_name`), a case-insensitive
// lookup used by signal argument declarations (`variant_from_name`), and
// serde glue (`serde_variant`) so descriptors holding a `VariantType` can be
// dumped to JSON by name.

pub use godot::builtin::VariantType;

/// Every variant type the host stores, in ordinal order, with its script
/// spelling.
const NAMES: [(VariantType, &str); 39] = [
    (VariantType::NIL, "Nil"),
    (VariantType::BOOL, "bool"),
    (VariantType::INT, "int"),
    (VariantType::FLOAT, "float"),
    (VariantType::STRING, "String"),
    (VariantType::VECTOR2, "Vector2"),
    (VariantType::VECTOR2I, "Vector2i"),
    (VariantType::RECT2, "Rect2"),
    (VariantType::RECT2I, "Rect2i"),
    (VariantType::VECTOR3, "Vector3"),
    (VariantType::VECTOR3I, "Vector3i"),
    (VariantType::TRANSFORM2D, "Transform2D"),
    (VariantType::VECTOR4, "Vector4"),
    (VariantType::VECTOR4I, "Vector4i"),
    (VariantType::PLANE, "Plane"),
    (VariantType::QUATERNION, "Quaternion"),
    (VariantType::AABB, "AABB"),
    (VariantType::BASIS, "Basis"),
    (VariantType::TRANSFORM3D, "Transform3D"),
    (VariantType::PROJECTION, "Projection"),
    (VariantType::COLOR, "Color"),
    (VariantType::STRING_NAME, "StringName"),
    (VariantType::NODE_PATH, "NodePath"),
    (VariantType::RID, "RID"),
    (VariantType::OBJECT, "Object"),
    (VariantType::CALLABLE, "Callable"),
    (VariantType::SIGNAL, "Signal"),
    (VariantType::DICTIONARY, "Dictionary"),
    (VariantType::ARRAY, "Array"),
    (VariantType::PACKED_BYTE_ARRAY, "PackedByteArray"),
    (VariantType::PACKED_INT32_ARRAY, "PackedInt32Array"),
    (VariantType::PACKED_INT64_ARRAY, "PackedInt64Array"),
    (VariantType::PACKED_FLOAT32_ARRAY, "PackedFloat32Array"),
    (VariantType::PACKED_FLOAT64_ARRAY, "PackedFloat64Array"),
    (VariantType::PACKED_STRING_ARRAY, "PackedStringArray"),
    (VariantType::PACKED_VECTOR2_ARRAY, "PackedVector2Array"),
    (VariantType::PACKED_VECTOR3_ARRAY, "PackedVector3Array"),
    (VariantType::PACKED_COLOR_ARRAY, "PackedColorArray"),
    (VariantType::PACKED_VECTOR4_ARRAY, "PackedVector4Array"),
];

/// The type name as the engine spells it in scripts (`int`, `Vector2`,
/// `PackedStringArray`, ...). `None` for ordinals outside the table.
pub fn variant_name(ty: VariantType) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(candidate, _)| *candidate == ty)
        .map(|(_, name)| *name)
}

/// Look up a type by its script name. Case-insensitive, so `int`, `Int` and
/// `INT` all resolve; `Variant` and `any` resolve to `NIL`.
pub fn variant_from_name(name: &str) -> Option<VariantType> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("variant") || name.eq_ignore_ascii_case("any") {
        return Some(VariantType::NIL);
    }
    NAMES
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
        .map(|(ty, _)| *ty)
}

/// Serialize a `VariantType` as its script name. Use with
/// `#[serde(with = "crate::variant::serde_variant")]`.
pub mod serde_variant {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{VariantType, variant_from_name, variant_name};

    pub fn serialize<S: Serializer>(ty: &VariantType, serializer: S) -> Result<S::Ok, S::Error> {
        let name = variant_name(*ty)
            .ok_or_else(|| S::Error::custom(format!("no script name for {ty:?}")))?;
        serializer.serialize_str(name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<VariantType, D::Error> {
        let name = String::deserialize(deserializer)?;
        variant_from_name(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown variant type `{name}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use godot::obj::EngineEnum;
    use serde::{Deserialize, Serialize};

    #[test]
    fn table_follows_engine_order() {
        for (i, (ty, name)) in NAMES.iter().enumerate() {
            assert_eq!(ty.ord(), i as i32, "{name} out of order");
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(variant_from_name("int"), Some(VariantType::INT));
        assert_eq!(variant_from_name("BOOL"), Some(VariantType::BOOL));
        assert_eq!(variant_from_name("vector2"), Some(VariantType::VECTOR2));
        assert_eq!(variant_from_name(" aabb "), Some(VariantType::AABB));
        assert_eq!(variant_from_name("stringname"), Some(VariantType::STRING_NAME));
    }

    #[test]
    fn variant_and_any_mean_nil() {
        assert_eq!(variant_from_name("Variant"), Some(VariantType::NIL));
        assert_eq!(variant_from_name("any"), Some(VariantType::NIL));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(variant_from_name("Spaceship"), None);
        assert_eq!(variant_from_name(""), None);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Typed {
        #[serde(with = "serde_variant")]
        ty: VariantType,
    }

    #[test]
    fn serializes_by_script_name() {
        let json = serde_json::to_string(&Typed {
            ty: VariantType::PACKED_STRING_ARRAY,
        })
        .unwrap();
        assert_eq!(json, r#"{"ty":"PackedStringArray"}"#);
        let back: Typed = serde_json::from_str(r#"{"ty":"float"}"#).unwrap();
        assert_eq!(back.ty, VariantType::FLOAT);
        assert!(serde_json::from_str::<Typed>(r#"{"ty":"Spaceship"}"#).is_err());
    }
}
