// Class preparation pipeline and registrar.
//
// Turns a class constructor into an immutable `ClassInfo` descriptor and
// binds that descriptor to the host's registration API.
//
// Pipeline (leaves first):
// - `naming.rs`:     snake_case conversion and accessor name matching.
// - `tag.rs`:        parses a field's annotation string (`name=`, `get=`,
//                    `set=`, `args=`) into `TagData`. Permissive on purpose.
// - `classify.rs`:   signal-vs-data classification and variant mapping.
// - `discover.rs`:   partitions the manifest into embedded-base names,
//                    data fields and candidate methods.
// - `property.rs`:   resolves getter/setter accessors and bridge names.
// - `signal.rs`:     builds signal descriptors and their argument shapes.
// - `method.rs`:     exposed names, virtual markers, argument slots.
// - `class_info.rs`: aggregates everything into `ClassInfo` (`prepare`).
// - `wrap.rs`:       `ClassRegister`, the initialize/terminate registrar.
//
// Everything up to `class_info.rs` is pure: preparing the same constructor
// twice yields equal descriptors.

pub mod class_info;
pub mod classify;
pub mod discover;
pub mod method;
pub mod naming;
pub mod property;
pub mod signal;
pub mod tag;
pub mod wrap;

pub use class_info::{ClassInfo, prepare};
pub use method::MethodDescriptor;
pub use property::PropertyDescriptor;
pub use signal::SignalDescriptor;
pub use wrap::{ClassRegister, ClassWrapper, RegistrarState, wrap};
