// Extension entry point lifecycle.
//
// The host initializes an extension in levels (core, servers, scene,
// editor) and tears it down in reverse. User classes are registered at the
// scene level:
//
// - `Extension::load` prepares every class in the registry. A class that
//   fails preparation is logged and skipped; the rest still load.
// - `on_level_init(InitLevel::Scene, db)` initializes every wrapper.
// - `on_level_deinit(InitLevel::Scene)` terminates them, in reverse
//   registration order.
//
// All other levels are no-ops. Lifecycle misuse on one class (e.g. a second
// scene init) is logged and does not affect the other classes.

use crate::class_db::{ClassDb, RecordingClassDb, RegistrationCall};
use crate::config::WrapConfig;
use crate::error::PrepareError;
use crate::registry::Registry;
use crate::wrapper::{ClassInfo, ClassRegister, ClassWrapper, wrap};

/// Host initialization levels, in the order the host runs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InitLevel {
    Core,
    Servers,
    Scene,
    Editor,
}

/// A class that could not be prepared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadFailure {
    /// Constructor name.
    pub class: String,
    pub error: PrepareError,
}

/// Every successfully prepared class of one extension.
#[derive(Debug)]
pub struct Extension {
    config: WrapConfig,
    wrappers: Vec<ClassRegister>,
    failures: Vec<LoadFailure>,
}

impl Extension {
    /// Prepare every class in `registry`, logging and skipping failures.
    pub fn load(registry: &Registry, config: WrapConfig) -> Self {
        let mut wrappers = Vec::with_capacity(registry.len());
        let mut failures = Vec::new();

        for ctor in registry.iter() {
            match wrap(*ctor, &config) {
                Ok(wrapper) => {
                    tracing::debug!(class = ctor.name(), "prepared class");
                    wrappers.push(wrapper);
                }
                Err(error) => {
                    tracing::error!(class = ctor.name(), %error, "error wrapping class");
                    failures.push(LoadFailure {
                        class: ctor.name().to_string(),
                        error,
                    });
                }
            }
        }

        Self {
            config,
            wrappers,
            failures,
        }
    }

    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    pub fn wrappers(&self) -> &[ClassRegister] {
        &self.wrappers
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Descriptors of every prepared class, in registration order.
    pub fn class_infos(&self) -> impl Iterator<Item = &ClassInfo> {
        self.wrappers.iter().map(ClassRegister::info)
    }

    /// Called by the host when it enters an initialization level.
    pub fn on_level_init(&mut self, level: InitLevel, db: &mut dyn ClassDb) {
        if level != InitLevel::Scene {
            return;
        }
        for wrapper in &mut self.wrappers {
            if let Err(error) = wrapper.initialize(db) {
                tracing::warn!(%error, "skipping class initialization");
            }
        }
    }

    /// Called by the host when it leaves an initialization level.
    pub fn on_level_deinit(&mut self, level: InitLevel) {
        if level != InitLevel::Scene {
            return;
        }
        for wrapper in self.wrappers.iter_mut().rev() {
            if let Err(error) = wrapper.terminate() {
                tracing::warn!(%error, "skipping class termination");
            }
        }
    }

    /// Pretty JSON dump of every prepared descriptor.
    pub fn manifest_json(&self) -> serde_json::Result<String> {
        let infos: Vec<&ClassInfo> = self.class_infos().collect();
        serde_json::to_string_pretty(&infos)
    }

    /// The host calls scene-level initialization would produce, without
    /// touching this extension's registrars.
    pub fn dry_run(&self) -> Vec<RegistrationCall> {
        let mut db = RecordingClassDb::new();
        for wrapper in &self.wrappers {
            let mut fresh = match wrap_again(wrapper, &self.config) {
                Some(fresh) => fresh,
                None => continue,
            };
            if let Err(error) = fresh.initialize(&mut db) {
                tracing::warn!(%error, "dry run failed for class");
            }
        }
        db.calls().to_vec()
    }
}

/// A new, unregistered registrar for the same class.
fn wrap_again(wrapper: &ClassRegister, config: &WrapConfig) -> Option<ClassRegister> {
    match wrap(wrapper.constructor(), config) {
        Ok(fresh) => Some(fresh),
        Err(error) => {
            tracing::error!(class = wrapper.class_name(), %error, "class no longer prepares");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ClassShape, FieldShape, MethodShape, Object, Reflect};
    use crate::wrapper::RegistrarState;

    #[derive(Default)]
    struct Good;

    #[derive(Default)]
    struct Broken;

    impl Object for Good {
        fn class_shape(&self) -> ClassShape {
            ClassShape::new("Good")
                .field(FieldShape::exported("hp", i64::type_shape()).with_tag("set=nil"))
                .method(MethodShape::new("get_hp", 0, 1))
        }
    }

    impl Object for Broken {
        fn class_shape(&self) -> ClassShape {
            // Getter missing entirely.
            ClassShape::new("Broken").field(FieldShape::exported("hp", i64::type_shape()))
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_class::<Broken>().register_class::<Good>();
        registry
    }

    #[test]
    fn broken_class_does_not_block_others() {
        let ext = Extension::load(&registry(), WrapConfig::default());
        assert_eq!(ext.wrappers().len(), 1);
        assert_eq!(ext.failures().len(), 1);
        assert_eq!(ext.failures()[0].class, "Broken");
        assert!(matches!(
            ext.failures()[0].error,
            PrepareError::MissingAccessor { .. }
        ));
    }

    #[test]
    fn only_scene_level_registers() {
        let mut ext = Extension::load(&registry(), WrapConfig::default());
        let mut db = RecordingClassDb::new();
        ext.on_level_init(InitLevel::Core, &mut db);
        ext.on_level_init(InitLevel::Servers, &mut db);
        assert!(db.calls().is_empty());

        ext.on_level_init(InitLevel::Scene, &mut db);
        assert_eq!(db.registered_classes(), vec!["Good"]);
        ext.on_level_init(InitLevel::Editor, &mut db);
        assert_eq!(db.registered_classes(), vec!["Good"]);
    }

    #[test]
    fn repeated_scene_init_does_not_double_register() {
        let mut ext = Extension::load(&registry(), WrapConfig::default());
        let mut db = RecordingClassDb::new();
        ext.on_level_init(InitLevel::Scene, &mut db);
        ext.on_level_init(InitLevel::Scene, &mut db);
        assert_eq!(db.registered_classes().len(), 1);
    }

    #[test]
    fn scene_deinit_terminates() {
        let mut ext = Extension::load(&registry(), WrapConfig::default());
        let mut db = RecordingClassDb::new();
        ext.on_level_init(InitLevel::Scene, &mut db);
        ext.on_level_deinit(InitLevel::Editor);
        assert_eq!(ext.wrappers()[0].state(), RegistrarState::Registered);
        ext.on_level_deinit(InitLevel::Scene);
        assert_eq!(ext.wrappers()[0].state(), RegistrarState::Terminated);
    }

    #[test]
    fn dry_run_leaves_registrars_untouched() {
        let ext = Extension::load(&registry(), WrapConfig::default());
        let calls = ext.dry_run();
        assert_eq!(calls.len(), 3, "{calls:?}");
        assert_eq!(ext.wrappers()[0].state(), RegistrarState::Unregistered);
    }

    #[test]
    fn manifest_lists_prepared_classes() {
        let ext = Extension::load(&registry(), WrapConfig::default());
        let json: serde_json::Value = serde_json::from_str(&ext.manifest_json().unwrap()).unwrap();
        assert_eq!(json[0]["name"], "Good");
        assert_eq!(json[0]["properties"][0]["exposed_name"], "hp");
        assert_eq!(json[0]["properties"][0]["setter_bridge"], serde_json::Value::Null);
    }
}
