// Explicit registry of class constructors.
//
// The extension's entry point builds one `Registry`, lists its classes in
// the order they should be registered, and hands it to `Extension::load`.
// There is no global state: registration order is exactly the order of
// `register` calls.

use crate::shape::{ClassConstructor, Object};

/// Ordered set of class constructors, keyed by constructor name.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    constructors: Vec<ClassConstructor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constructor. A second constructor with the same name is
    /// ignored with a warning.
    pub fn register(&mut self, ctor: ClassConstructor) -> &mut Self {
        if self.contains(ctor.name()) {
            tracing::warn!(class = ctor.name(), "class registered twice, ignoring");
        } else {
            self.constructors.push(ctor);
        }
        self
    }

    /// Append the constructor for a `Default`-constructible class.
    pub fn register_class<T: Object + Default>(&mut self) -> &mut Self {
        self.register(ClassConstructor::of::<T>())
    }

    pub fn register_all(&mut self, ctors: impl IntoIterator<Item = ClassConstructor>) -> &mut Self {
        for ctor in ctors {
            self.register(ctor);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.iter().any(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassConstructor> {
        self.constructors.iter()
    }
}
