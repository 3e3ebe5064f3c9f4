// The registrar: binds a prepared `ClassInfo` to the host.
//
// `ClassRegister` is a small state machine:
//
//   Unregistered --initialize--> Registered --terminate--> Terminated
//
// Both transitions are one-shot. Calling `initialize` twice would register
// the class with the host twice, so the second call is refused with a
// `LifecycleError` and makes no host calls at all; `terminate` is likewise
// only valid once, after a successful `initialize`.
//
// The class is registered with one `PropertyInfo` per property. Member
// registration order inside the host callback is fixed and significant:
// 1. every method (virtual-flagged ones through the virtual-bind path),
// 2. every property: getter bridge (returning the property's variant
//    type), setter bridge (if any), then the property itself, which refers
//    to the bridges by name,
// 3. every signal with its argument shape.
//
// `terminate` makes no host calls; the host has no unregistration API the
// registrar needs today.

use std::rc::Rc;

use crate::builtin::SignalBinder;
use crate::class_db::{ClassDb, ClassId, NativeClassInfo, PropertyInfo, ReturnSpec, SignalSink};
use crate::config::WrapConfig;
use crate::error::{LifecycleError, PrepareError};
use crate::shape::{ClassConstructor, Object};
use crate::wrapper::class_info::{ClassInfo, prepare};

/// Lifecycle of one class's registration.
pub trait ClassWrapper {
    fn class_name(&self) -> &str;

    /// Register the class and all of its members with the host.
    fn initialize(&mut self, db: &mut dyn ClassDb) -> Result<(), LifecycleError>;

    /// Release registration-time resources.
    fn terminate(&mut self) -> Result<(), LifecycleError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrarState {
    Unregistered,
    Registered,
    Terminated,
}

/// Registrar for one prepared class.
#[derive(Debug)]
pub struct ClassRegister {
    ctor: ClassConstructor,
    info: ClassInfo,
    state: RegistrarState,
}

/// Prepare the class `ctor` produces and wrap it in a registrar.
pub fn wrap(ctor: ClassConstructor, config: &WrapConfig) -> Result<ClassRegister, PrepareError> {
    let info = prepare(&ctor, config)?;
    Ok(ClassRegister {
        ctor,
        info,
        state: RegistrarState::Unregistered,
    })
}

impl ClassRegister {
    pub fn info(&self) -> &ClassInfo {
        &self.info
    }

    pub fn state(&self) -> RegistrarState {
        self.state
    }

    pub fn constructor(&self) -> ClassConstructor {
        self.ctor
    }

    /// A fresh instance of the wrapped class.
    pub fn create_instance(&self) -> Box<dyn Object> {
        self.ctor.create()
    }

    /// Connect `object`'s signal handles to `sink` under their exposed
    /// names.
    pub fn bind_signals(&self, object: &mut dyn Object, sink: Rc<dyn SignalSink>) {
        object.bind_signals(&SignalBinder::new(&self.info, sink));
    }
}

impl ClassWrapper for ClassRegister {
    fn class_name(&self) -> &str {
        &self.info.name
    }

    fn initialize(&mut self, db: &mut dyn ClassDb) -> Result<(), LifecycleError> {
        match self.state {
            RegistrarState::Unregistered => {}
            RegistrarState::Registered => {
                return Err(LifecycleError::AlreadyInitialized(self.info.name.clone()));
            }
            RegistrarState::Terminated => {
                return Err(LifecycleError::AlreadyTerminated(self.info.name.clone()));
            }
        }

        let info = &self.info;
        let native = NativeClassInfo {
            name: &info.name,
            constructor: self.ctor,
        };
        tracing::debug!(class = %info.name, parent = ?info.parent, "registering class");
        let property_infos: Vec<PropertyInfo> = info
            .properties
            .iter()
            .map(|p| PropertyInfo {
                name: p.exposed_name.clone(),
                ty: p.ty,
            })
            .collect();
        let mut bind = |db: &mut dyn ClassDb, class: &ClassId| bind_members(info, db, class);
        db.register_class(&native, &property_infos, info.parent.as_deref(), &mut bind);

        self.state = RegistrarState::Registered;
        Ok(())
    }

    fn terminate(&mut self) -> Result<(), LifecycleError> {
        match self.state {
            RegistrarState::Registered => {
                tracing::debug!(class = %self.info.name, "terminating class");
                self.state = RegistrarState::Terminated;
                Ok(())
            }
            RegistrarState::Unregistered => {
                Err(LifecycleError::NotInitialized(self.info.name.clone()))
            }
            RegistrarState::Terminated => {
                Err(LifecycleError::AlreadyTerminated(self.info.name.clone()))
            }
        }
    }
}

/// Bind methods, then properties, then signals.
fn bind_members(info: &ClassInfo, db: &mut dyn ClassDb, class: &ClassId) {
    for method in &info.methods {
        tracing::debug!(class = %info.name, method = %method.accessor, "registering method");
        if method.is_virtual {
            db.bind_virtual_method(class, &method.accessor, &method.exposed_name, &method.args, None);
        } else {
            db.bind_method(class, &method.accessor, &method.exposed_name, &method.args, None);
        }
    }

    for prop in &info.properties {
        tracing::debug!(class = %info.name, property = %prop.exposed_name, "registering property");
        let ret = ReturnSpec { ty: prop.ty };
        db.bind_method(class, &prop.getter, &prop.getter_bridge, &[], Some(ret));
        if let (Some(setter), Some(bridge)) = (&prop.setter, &prop.setter_bridge) {
            db.bind_method(class, setter, bridge, &prop.setter_args, None);
        }
        db.add_property(
            class,
            prop.ty,
            &prop.exposed_name,
            prop.setter_bridge.as_deref().unwrap_or(""),
            &prop.getter_bridge,
        );
    }

    for signal in &info.signals {
        tracing::debug!(class = %info.name, signal = %signal.exposed_name, "registering signal");
        db.add_signal(class, &signal.exposed_name, &signal.args);
    }
}
