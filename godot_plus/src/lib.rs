// godot_plus: manifest-driven class registration for Godot extensions.
//
// User classes are plain Rust structs. Instead of runtime reflection, each
// class describes itself through a `ClassShape` manifest (generated by
// `#[derive(Class)]` and `#[methods]`, or written by hand). The `wrapper`
// pipeline turns that manifest into an immutable `ClassInfo` descriptor
// (properties, methods and signals) and binds it to the host's registration
// API in a fixed order.
//
// Module overview:
// - `shape.rs`:     The class manifest model (`ClassShape`, `FieldShape`,
//                   `MethodShape`, `TypeShape`) and the traits that produce
//                   it (`Object`, `Reflect`, `BaseClass`, `ClassMethods`).
// - `variant.rs`:   The engine's `VariantType` (from `godot::builtin`) plus
//                   script names and serde glue.
// - `builtin.rs`:   Engine value types re-exported from `godot::builtin`
//                   (`Vector2`, `Vector3`, `Color`, ...) and the `Signal`
//                   handle with its `SignalBinder`.
// - `class_db.rs`:  The opaque host registration API (`ClassDb`), the
//                   `SignalSink` emission seam, and `RecordingClassDb`, a
//                   dry-run host that records both.
// - `wrapper/`:     The preparation pipeline and the registrar.
// - `registry.rs`:  Explicit, ordered registry of class constructors.
// - `entry.rs`:     `Extension`, which wraps every registered class and drives
//                   initialize/terminate from the host's init levels.
// - `config.rs`:    `WrapConfig`, the naming conventions, loadable from JSON.
// - `error.rs`:     `PrepareError`, `LifecycleError`, `ConfigError`.
//
// The pipeline is single-threaded and runs once per class during extension
// initialization. One broken class never prevents the others from loading:
// preparation errors are logged and the class is skipped.

extern crate self as godot_plus;

pub mod builtin;
pub mod class_db;
pub mod config;
pub mod entry;
pub mod error;
pub mod registry;
pub mod shape;
pub mod variant;
pub mod wrapper;

pub use builtin::{
    Color, GString, PackedVector3Array, Signal, SignalBinder, StringName, Vector2, Vector2i,
    Vector3, Vector3i,
};
pub use class_db::{
    ClassDb, ClassId, EmittedSignal, NativeClassInfo, PropertyInfo, RecordingClassDb,
    RegistrationCall, ReturnSpec, SignalParam, SignalSink,
};
pub use config::WrapConfig;
pub use entry::{Extension, InitLevel, LoadFailure};
pub use error::{ConfigError, LifecycleError, PrepareError};
pub use godot_plus_derive::{Class, methods};
pub use registry::Registry;
pub use shape::{
    BaseClass, BaseSurface, ClassConstructor, ClassMethods, ClassShape, FieldShape, MethodShape,
    Object, Reflect, TypeKind, TypeShape,
};
pub use variant::{VariantType, variant_from_name, variant_name};
pub use wrapper::{ClassInfo, ClassRegister, ClassWrapper, RegistrarState, prepare, wrap};
