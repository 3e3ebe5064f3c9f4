// Field type classification.
//
// A field's `TypeShape` decides what it becomes: a signal declaration
// (nominal `Signal` marker, regardless of any data shape), an ordinary
// property with a host variant type, or (when embedded) a base capability
// that the discoverer handles separately.

use crate::shape::{TypeKind, TypeShape};
use crate::variant::VariantType;

/// True iff the field declares a signal rather than data.
pub fn is_signal_type(ty: &TypeShape) -> bool {
    matches!(ty.kind, TypeKind::Signal)
}

/// Map a data type to the host's variant taxonomy. `None` means the type
/// has no variant equivalent (signals and base capabilities included).
pub fn map_to_variant_type(ty: &TypeShape) -> Option<VariantType> {
    match &ty.kind {
        TypeKind::Variant(variant) => Some(*variant),
        TypeKind::Signal | TypeKind::Base(_) | TypeKind::Opaque => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{Signal, Vector2};
    use crate::shape::{BaseSurface, Reflect};

    #[test]
    fn signal_marker_is_a_signal() {
        assert!(is_signal_type(&Signal::type_shape()));
        assert!(!is_signal_type(&i64::type_shape()));
    }

    #[test]
    fn data_types_map_to_variants() {
        assert_eq!(map_to_variant_type(&i64::type_shape()), Some(VariantType::INT));
        assert_eq!(
            map_to_variant_type(&Vector2::type_shape()),
            Some(VariantType::VECTOR2)
        );
        assert_eq!(
            map_to_variant_type(&String::type_shape()),
            Some(VariantType::STRING)
        );
    }

    #[test]
    fn non_data_types_have_no_variant() {
        assert_eq!(map_to_variant_type(&Signal::type_shape()), None);
        assert_eq!(map_to_variant_type(&TypeShape::opaque("HashMap<u8, u8>")), None);
        let base = TypeShape::base(BaseSurface {
            class_name: "Node".into(),
            methods: Vec::new(),
        });
        assert_eq!(map_to_variant_type(&base), None);
    }
}
