use tracing::debug;

use crate::runner::class::{Class, ExtendArgs};
use crate::runner::config::RealmConfig;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::value::Value;
use crate::runner::namespace::registry::Registry;

/// A session of the class system: one namespace registry and one root class.
///
/// Classes extended from the root publish named classes into this realm's
/// registry. Dropping the realm releases the registry; classes still held
/// elsewhere keep working but can no longer register names.
pub struct Realm {
    config: RealmConfig,
    registry: Registry,
    root: Class,
}

impl Realm {
    pub fn new() -> Self {
        Realm::with_config(RealmConfig::default())
    }

    pub fn with_config(config: RealmConfig) -> Self {
        let registry = Registry::new(&config.global_name);
        let root = Class::root(&registry, &config);
        debug!(root = %config.root_name, global = %config.global_name, "created realm");
        Realm {
            config,
            registry,
            root,
        }
    }

    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    /// The class every class of this realm descends from.
    pub fn root(&self) -> &Class {
        &self.root
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The root container of the namespace tree.
    pub fn global(&self) -> &ObjectRef {
        self.registry.global()
    }

    pub fn extend(&self, args: ExtendArgs) -> Result<Class, ClassError> {
        self.root.extend(args)
    }

    /// Calls the root class as a function. See [`Class::call`].
    pub fn call(&self, args: Vec<Value>) -> Result<Value, ClassError> {
        self.root.call(args)
    }

    pub fn lookup(&self, name: &str) -> Result<Option<Value>, ClassError> {
        self.registry.lookup(name)
    }

    pub fn unregister(&self, name: &str) -> Result<Option<Value>, ClassError> {
        self.registry.unregister(name)
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}
