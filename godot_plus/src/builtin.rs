// Builtin types that user classes expose, plus signal emission.
//
// Value types (`Vector2`, `Vector3`, `Color`, ...) are the engine's own,
// re-exported from `godot::builtin`; `Reflect` in `shape.rs` maps them onto
// the variant taxonomy.
//
// `Signal` is not a value at all: a field of this type declares a signal on
// the class rather than a property. Once an instance is bound to a host
// (`SignalBinder`, usually through `ClassRegister::bind_signals`), `emit`
// forwards to the host's `SignalSink` under the signal's exposed name.
// Emitting an unbound signal is logged and dropped, which is what happens
// to instances created outside any host (plain `Default::default()`).

use std::fmt;
use std::rc::Rc;

pub use godot::builtin::{
    Color, GString, PackedVector3Array, StringName, Vector2, Vector2i, Vector3, Vector3i,
};

use crate::class_db::SignalSink;
use crate::wrapper::ClassInfo;

/// Signal declaration and emission handle.
///
/// A `pub` field of this type registers a signal named after the field
/// (snake-cased, overridable with `#[godot(name = "...")]`). Argument shapes
/// are declared with `#[godot(args = "name:type|name:type")]`.
#[derive(Clone, Default)]
pub struct Signal {
    binding: Option<SignalBinding>,
}

#[derive(Clone)]
struct SignalBinding {
    class: String,
    exposed_name: String,
    params: usize,
    sink: Rc<dyn SignalSink>,
}

impl Signal {
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Exposed name this handle emits under, once bound.
    pub fn exposed_name(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.exposed_name.as_str())
    }

    /// Emit the signal with `args` through the bound host.
    pub fn emit(&self, args: &[serde_json::Value]) {
        let Some(binding) = &self.binding else {
            tracing::warn!(args = args.len(), "signal emitted before binding; dropped");
            return;
        };
        if args.len() != binding.params {
            tracing::warn!(
                class = %binding.class,
                signal = %binding.exposed_name,
                expected = binding.params,
                got = args.len(),
                "signal argument count mismatch"
            );
        }
        tracing::trace!(class = %binding.class, signal = %binding.exposed_name, "emit");
        binding
            .sink
            .emit_signal(&binding.class, &binding.exposed_name, args);
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Some(b) => write!(f, "Signal({}::{})", b.class, b.exposed_name),
            None => f.write_str("Signal(unbound)"),
        }
    }
}

/// Connects an instance's `Signal` fields to a host sink, using the names
/// resolved in the class's descriptor.
pub struct SignalBinder<'a> {
    info: &'a ClassInfo,
    sink: Rc<dyn SignalSink>,
}

impl<'a> SignalBinder<'a> {
    pub fn new(info: &'a ClassInfo, sink: Rc<dyn SignalSink>) -> Self {
        Self { info, sink }
    }

    /// Bind the handle stored in field `field`. Returns false (leaving the
    /// handle untouched) when the descriptor has no signal for that field.
    pub fn bind(&self, field: &str, signal: &mut Signal) -> bool {
        let Some(descriptor) = self.info.signals.iter().find(|s| s.field == field) else {
            tracing::debug!(class = %self.info.name, field, "no signal registered for field");
            return false;
        };
        signal.binding = Some(SignalBinding {
            class: self.info.name.clone(),
            exposed_name: descriptor.exposed_name.clone(),
            params: descriptor.args.len(),
            sink: Rc::clone(&self.sink),
        });
        true
    }
}
