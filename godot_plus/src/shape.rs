// Class manifests: the structural description the pipeline introspects.
//
// Rust has no runtime reflection, so every registrable class describes
// itself through a `ClassShape`: its fields (name, type, annotation tag,
// visibility, embedded-or-not) and its methods (name, logical arity,
// number of results, visibility). `#[derive(Class)]` and `#[methods]`
// generate the manifest at compile time; hand-written manifests are
// equally valid and are what the unit tests use.
//
// Traits:
// - `Object`:       implemented by every registrable class; hands out the
//                    manifest for an instance and binds its signal handles.
// - `Reflect`:      maps a field's Rust type onto a `TypeShape`.
// - `ClassMethods`: a type's own methods (generated by `#[methods]`).
// - `BaseClass`:    marks a type usable as an embedded base capability
//                    (`#[godot(base)]`). Its method surface is what the
//                    discoverer excludes from the outer class.
//
// See also: `wrapper/discover.rs` for how the manifest is partitioned,
// `variant.rs` for the variant taxonomy.

use serde::Serialize;

use crate::builtin::{
    Color, GString, PackedVector3Array, Signal, SignalBinder, StringName, Vector2, Vector2i,
    Vector3, Vector3i,
};
use crate::variant::VariantType;

// ---------------------------------------------------------------------------
// Manifest model
// ---------------------------------------------------------------------------

/// Structural description of one class.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassShape {
    /// Derived type name, also the class name the host sees.
    pub name: String,
    /// Fields in declaration order, embedded base fields included.
    pub fields: Vec<FieldShape>,
    /// The class's method set, in enumeration order.
    pub methods: Vec<MethodShape>,
}

impl ClassShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodShape) -> Self {
        self.methods.push(method);
        self
    }

    /// Class name of the first embedded base capability, if any. Passed to
    /// the host as the registered parent class.
    pub fn parent(&self) -> Option<&str> {
        self.fields
            .iter()
            .filter(|f| f.embedded)
            .find_map(|f| match &f.ty.kind {
                TypeKind::Base(surface) => Some(surface.class_name.as_str()),
                _ => None,
            })
    }
}

/// One field of a class.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldShape {
    pub name: String,
    pub ty: TypeShape,
    /// Raw annotation string, e.g. `name=speed2,set=nil`. Empty when the
    /// field carries no annotation.
    pub tag: String,
    /// `pub` fields are exported; everything else is invisible to the host.
    pub exported: bool,
    /// Embedded base capability (`#[godot(base)]`).
    pub embedded: bool,
}

impl FieldShape {
    pub fn exported(name: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            exported: true,
            embedded: false,
        }
    }

    pub fn private(name: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            exported: false,
            ..Self::exported(name, ty)
        }
    }

    pub fn embedded(name: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            embedded: true,
            ..Self::exported(name, ty)
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// A field's declared type as the pipeline sees it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeShape {
    /// Rust spelling of the type, used in error messages.
    pub name: String,
    pub kind: TypeKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TypeKind {
    /// Ordinary data with a host variant equivalent.
    Variant(#[serde(with = "crate::variant::serde_variant")] VariantType),
    /// Signal declaration (`Signal` marker).
    Signal,
    /// Embedded base capability and its method surface.
    Base(BaseSurface),
    /// No host equivalent.
    Opaque,
}

impl TypeShape {
    pub fn variant(name: impl Into<String>, ty: VariantType) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Variant(ty),
        }
    }

    pub fn signal() -> Self {
        Self {
            name: "Signal".into(),
            kind: TypeKind::Signal,
        }
    }

    pub fn base(surface: BaseSurface) -> Self {
        Self {
            name: surface.class_name.clone(),
            kind: TypeKind::Base(surface),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Opaque,
        }
    }

    pub fn of<T: Reflect>() -> Self {
        T::type_shape()
    }
}

/// Method surface of an embedded base capability.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaseSurface {
    /// Host class the capability stands for (e.g. `Node2D`).
    pub class_name: String,
    pub methods: Vec<MethodShape>,
}

/// One method of a class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodShape {
    pub name: String,
    /// Logical parameters, receiver excluded.
    pub params: usize,
    /// Number of results: 0 for unit, n for an n-tuple, 1 otherwise.
    pub returns: usize,
    pub exported: bool,
}

impl MethodShape {
    pub fn new(name: impl Into<String>, params: usize, returns: usize) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            exported: true,
        }
    }

    pub fn private(name: impl Into<String>, params: usize, returns: usize) -> Self {
        Self {
            exported: false,
            ..Self::new(name, params, returns)
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A registrable class instance.
pub trait Object: 'static {
    fn class_shape(&self) -> ClassShape;

    /// Hand each `Signal` field to `binder`. Classes without signals keep
    /// the default.
    fn bind_signals(&mut self, _binder: &SignalBinder<'_>) {}
}

/// Maps a Rust field type to its `TypeShape`.
pub trait Reflect {
    fn type_shape() -> TypeShape;
}

/// A type's own methods, in declaration order.
pub trait ClassMethods {
    fn method_shapes() -> Vec<MethodShape> {
        Vec::new()
    }
}

/// A type that can be embedded as a base capability.
pub trait BaseClass: ClassMethods {
    /// Host class name this capability provides.
    const CLASS_NAME: &'static str;

    fn base_shape() -> TypeShape {
        TypeShape::base(BaseSurface {
            class_name: Self::CLASS_NAME.to_string(),
            methods: Self::method_shapes(),
        })
    }
}

macro_rules! reflect_variant {
    ($variant:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_shape() -> TypeShape {
                    TypeShape::variant(stringify!($ty), $variant)
                }
            }
        )+
    };
}

reflect_variant!(VariantType::BOOL => bool);
reflect_variant!(VariantType::INT => i8, i16, i32, i64, u8, u16, u32);
reflect_variant!(VariantType::FLOAT => f32, f64);
reflect_variant!(VariantType::STRING => String, GString);
reflect_variant!(VariantType::STRING_NAME => StringName);
reflect_variant!(VariantType::VECTOR2 => Vector2);
reflect_variant!(VariantType::VECTOR2I => Vector2i);
reflect_variant!(VariantType::VECTOR3 => Vector3);
reflect_variant!(VariantType::VECTOR3I => Vector3i);
reflect_variant!(VariantType::COLOR => Color);
reflect_variant!(VariantType::PACKED_VECTOR3_ARRAY => PackedVector3Array);

impl<T: Reflect> Reflect for Vec<T> {
    fn type_shape() -> TypeShape {
        TypeShape::variant(format!("Vec<{}>", T::type_shape().name), VariantType::ARRAY)
    }
}

impl Reflect for Signal {
    fn type_shape() -> TypeShape {
        TypeShape::signal()
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Zero-argument factory for one registrable class.
///
/// Invoked once during preparation to obtain an instance whose manifest is
/// introspected, and again whenever the host needs a fresh instance.
#[derive(Clone, Copy, Debug)]
pub struct ClassConstructor {
    name: &'static str,
    create: fn() -> Box<dyn Object>,
}

impl ClassConstructor {
    pub fn new(name: &'static str, create: fn() -> Box<dyn Object>) -> Self {
        Self { name, create }
    }

    /// Constructor for a `Default`-constructible class. The name is the
    /// type's path with module prefix and generic arguments stripped.
    pub fn of<T: Object + Default>() -> Self {
        Self::new(short_type_name::<T>(), create_default::<T>)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn create(&self) -> Box<dyn Object> {
        (self.create)()
    }
}

fn create_default<T: Object + Default>() -> Box<dyn Object> {
    Box::new(T::default())
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Gauge;

    impl Object for Gauge {
        fn class_shape(&self) -> ClassShape {
            ClassShape::new("Gauge").field(FieldShape::exported("speed", TypeShape::of::<i64>()))
        }
    }

    enum Node2DImpl {}

    impl ClassMethods for Node2DImpl {
        fn method_shapes() -> Vec<MethodShape> {
            vec![MethodShape::new("set_position", 1, 0)]
        }
    }

    impl BaseClass for Node2DImpl {
        const CLASS_NAME: &'static str = "Node2D";
    }

    #[test]
    fn constructor_name_strips_module_path() {
        let ctor = ClassConstructor::of::<Gauge>();
        assert_eq!(ctor.name(), "Gauge");
        assert_eq!(ctor.create().class_shape().name, "Gauge");
    }

    #[test]
    fn reflect_maps_primitives() {
        assert_eq!(i32::type_shape().kind, TypeKind::Variant(VariantType::INT));
        assert_eq!(f64::type_shape().kind, TypeKind::Variant(VariantType::FLOAT));
        assert_eq!(bool::type_shape().kind, TypeKind::Variant(VariantType::BOOL));
        assert_eq!(
            Vec::<String>::type_shape(),
            TypeShape::variant("Vec<String>", VariantType::ARRAY)
        );
        assert_eq!(Signal::type_shape().kind, TypeKind::Signal);
    }

    #[test]
    fn reflect_maps_godot_builtins() {
        assert_eq!(
            Vector2::type_shape(),
            TypeShape::variant("Vector2", VariantType::VECTOR2)
        );
        assert_eq!(
            Vector3i::type_shape().kind,
            TypeKind::Variant(VariantType::VECTOR3I)
        );
        assert_eq!(GString::type_shape().kind, TypeKind::Variant(VariantType::STRING));
        assert_eq!(
            StringName::type_shape().kind,
            TypeKind::Variant(VariantType::STRING_NAME)
        );
        assert_eq!(Color::type_shape().kind, TypeKind::Variant(VariantType::COLOR));
    }

    #[test]
    fn parent_comes_from_first_embedded_base() {
        let shape = ClassShape::new("MyNode")
            .field(FieldShape::exported("speed", TypeShape::of::<i64>()))
            .field(FieldShape::embedded("base", Node2DImpl::base_shape()));
        assert_eq!(shape.parent(), Some("Node2D"));
        assert_eq!(ClassShape::new("Bare").parent(), None);
    }

    #[test]
    fn base_shape_carries_method_surface() {
        let TypeKind::Base(surface) = Node2DImpl::base_shape().kind else {
            panic!("expected a base capability");
        };
        assert_eq!(surface.class_name, "Node2D");
        assert_eq!(surface.methods, vec![MethodShape::new("set_position", 1, 0)]);
    }
}
