// The host's class registration API, as seen by the registrar.
//
// The native interface (ABI, variant marshaling, instance bindings) lives
// outside this crate. The registrar only needs five operations, modeled by
// the object-safe `ClassDb` trait:
//
// - `register_class`: declares a class and runs a callback in which the
//   class's members are bound. The callback receives the `ClassDb` back so
//   binding calls can be made against the freshly registered class.
// - `bind_method` / `bind_virtual_method`: exposes an accessor under a
//   host-visible name.
// - `add_property`: declares a property by its getter/setter bridge names.
// - `add_signal`: declares a signal with its argument shape.
//
// Getter bridges carry a `ReturnSpec` naming the property's variant type;
// ordinary methods pass `None` and the host infers their return shape.
//
// Signal emission is the other host-facing seam: a bound `Signal` handle
// forwards `emit` to a `SignalSink` the host provides.
//
// `RecordingClassDb` implements both by recording each call. It is the
// dry-run host used by tests and by `Extension::dry_run`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::shape::ClassConstructor;
use crate::variant::VariantType;

/// Handle for a class registered with the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ClassId(pub String);

impl ClassId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Native type metadata handed to the host when registering a class.
#[derive(Clone, Copy, Debug)]
pub struct NativeClassInfo<'a> {
    pub name: &'a str,
    /// Lets the host create fresh instances on demand.
    pub constructor: ClassConstructor,
}

/// One entry of the class-level property info list passed to
/// `register_class`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(with = "crate::variant::serde_variant")]
    pub ty: VariantType,
}

/// One argument of a signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignalParam {
    pub name: String,
    #[serde(with = "crate::variant::serde_variant")]
    pub ty: VariantType,
}

/// Return value shape for a bound method. `None` lets the host infer it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReturnSpec {
    #[serde(with = "crate::variant::serde_variant")]
    pub ty: VariantType,
}

/// Callback run by `register_class` to bind a class's members.
pub type BindCallback<'a> = dyn FnMut(&mut dyn ClassDb, &ClassId) + 'a;

/// The host's class registration API.
pub trait ClassDb {
    fn register_class(
        &mut self,
        info: &NativeClassInfo<'_>,
        property_infos: &[PropertyInfo],
        parent: Option<&str>,
        bind: &mut BindCallback<'_>,
    );

    fn bind_method(
        &mut self,
        class: &ClassId,
        accessor: &str,
        exposed: &str,
        args: &[String],
        ret: Option<ReturnSpec>,
    );

    fn bind_virtual_method(
        &mut self,
        class: &ClassId,
        accessor: &str,
        exposed: &str,
        args: &[String],
        ret: Option<ReturnSpec>,
    );

    fn add_property(
        &mut self,
        class: &ClassId,
        ty: VariantType,
        exposed: &str,
        setter_bridge: &str,
        getter_bridge: &str,
    );

    fn add_signal(&mut self, class: &ClassId, exposed: &str, args: &[SignalParam]);
}

/// Receives signals emitted by bound instances.
pub trait SignalSink {
    fn emit_signal(&self, class: &str, signal: &str, args: &[serde_json::Value]);
}

// ---------------------------------------------------------------------------
// Recording host
// ---------------------------------------------------------------------------

/// One call made against a `RecordingClassDb`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RegistrationCall {
    RegisterClass {
        class: String,
        parent: Option<String>,
        property_infos: Vec<PropertyInfo>,
    },
    BindMethod {
        class: String,
        accessor: String,
        exposed: String,
        args: Vec<String>,
        ret: Option<ReturnSpec>,
    },
    BindVirtualMethod {
        class: String,
        accessor: String,
        exposed: String,
        args: Vec<String>,
        ret: Option<ReturnSpec>,
    },
    AddProperty {
        class: String,
        #[serde(with = "crate::variant::serde_variant")]
        ty: VariantType,
        exposed: String,
        setter_bridge: String,
        getter_bridge: String,
    },
    AddSignal {
        class: String,
        exposed: String,
        args: Vec<SignalParam>,
    },
}

/// One signal emission received by a `RecordingClassDb`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmittedSignal {
    pub class: String,
    pub signal: String,
    pub args: Vec<serde_json::Value>,
}

#[derive(Debug, Default)]
struct EmissionLog {
    emitted: RefCell<Vec<EmittedSignal>>,
}

impl SignalSink for EmissionLog {
    fn emit_signal(&self, class: &str, signal: &str, args: &[serde_json::Value]) {
        self.emitted.borrow_mut().push(EmittedSignal {
            class: class.to_string(),
            signal: signal.to_string(),
            args: args.to_vec(),
        });
    }
}

/// A `ClassDb` that records every call in order instead of talking to an
/// engine.
#[derive(Debug, Default)]
pub struct RecordingClassDb {
    calls: Vec<RegistrationCall>,
    constructors: Vec<(String, ClassConstructor)>,
    emissions: Rc<EmissionLog>,
}

impl RecordingClassDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RegistrationCall] {
        &self.calls
    }

    /// Calls that target the given class, in order.
    pub fn calls_for<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a RegistrationCall> {
        self.calls.iter().filter(move |call| call.class() == class)
    }

    /// Names of registered classes, in registration order.
    pub fn registered_classes(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RegistrationCall::RegisterClass { class, .. } => Some(class.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Constructor handed over when `class` was registered.
    pub fn constructor(&self, class: &str) -> Option<ClassConstructor> {
        self.constructors
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, ctor)| *ctor)
    }

    /// Sink that records emissions into this host.
    pub fn signal_sink(&self) -> Rc<dyn SignalSink> {
        self.emissions.clone()
    }

    /// Signals emitted through `signal_sink`, in order.
    pub fn emitted(&self) -> Vec<EmittedSignal> {
        self.emissions.emitted.borrow().clone()
    }
}

impl RegistrationCall {
    pub fn class(&self) -> &str {
        match self {
            Self::RegisterClass { class, .. }
            | Self::BindMethod { class, .. }
            | Self::BindVirtualMethod { class, .. }
            | Self::AddProperty { class, .. }
            | Self::AddSignal { class, .. } => class,
        }
    }
}

impl ClassDb for RecordingClassDb {
    fn register_class(
        &mut self,
        info: &NativeClassInfo<'_>,
        property_infos: &[PropertyInfo],
        parent: Option<&str>,
        bind: &mut BindCallback<'_>,
    ) {
        self.calls.push(RegistrationCall::RegisterClass {
            class: info.name.to_string(),
            parent: parent.map(str::to_string),
            property_infos: property_infos.to_vec(),
        });
        self.constructors
            .push((info.name.to_string(), info.constructor));
        let id = ClassId(info.name.to_string());
        bind(self, &id);
    }

    fn bind_method(
        &mut self,
        class: &ClassId,
        accessor: &str,
        exposed: &str,
        args: &[String],
        ret: Option<ReturnSpec>,
    ) {
        self.calls.push(RegistrationCall::BindMethod {
            class: class.0.clone(),
            accessor: accessor.to_string(),
            exposed: exposed.to_string(),
            args: args.to_vec(),
            ret,
        });
    }

    fn bind_virtual_method(
        &mut self,
        class: &ClassId,
        accessor: &str,
        exposed: &str,
        args: &[String],
        ret: Option<ReturnSpec>,
    ) {
        self.calls.push(RegistrationCall::BindVirtualMethod {
            class: class.0.clone(),
            accessor: accessor.to_string(),
            exposed: exposed.to_string(),
            args: args.to_vec(),
            ret,
        });
    }

    fn add_property(
        &mut self,
        class: &ClassId,
        ty: VariantType,
        exposed: &str,
        setter_bridge: &str,
        getter_bridge: &str,
    ) {
        self.calls.push(RegistrationCall::AddProperty {
            class: class.0.clone(),
            ty,
            exposed: exposed.to_string(),
            setter_bridge: setter_bridge.to_string(),
            getter_bridge: getter_bridge.to_string(),
        });
    }

    fn add_signal(&mut self, class: &ClassId, exposed: &str, args: &[SignalParam]) {
        self.calls.push(RegistrationCall::AddSignal {
            class: class.0.clone(),
            exposed: exposed.to_string(),
            args: args.to_vec(),
        });
    }
}
