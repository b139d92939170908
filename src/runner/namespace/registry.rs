//! The namespace registry: a tree of containers rooted at a global object.
//!
//! Publishing a class as `App.Models.Recipe` walks the tree from the global
//! object, creating plain objects for `App` and `App.Models` when they are
//! missing, and binds the class as `Recipe` on `App.Models`:
//!
//! ```text
//! global
//!   └─ App            (plain object, created on demand)
//!        └─ Models    (plain object, created on demand)
//!             └─ Recipe  ──▶ Class
//! ```
//!
//! Classes are containers too, so `App.Models.Recipe.Ingredient` binds
//! `Ingredient` as a static of the `Recipe` class.
//!
//! The registry owns the tree; classes keep only a weak handle to it, so
//! dropping the realm releases everything published in it.

use tracing::{debug, warn};

use crate::parser::ast::NamePath;
use crate::parser::NameParser;
use crate::runner::class::{Class, WeakClass};
use crate::runner::ds::error::ClassError;
use crate::runner::ds::object::{ObjectRef, WeakObjectRef};
use crate::runner::ds::value::Value;

/// A value that can hold namespace members.
#[derive(Clone)]
pub(crate) enum Container {
    Object(ObjectRef),
    Class(Class),
}

impl Container {
    fn from_value(value: &Value) -> Option<Container> {
        match value {
            Value::Object(o) => Some(Container::Object(o.clone())),
            Value::Class(c) => Some(Container::Class(c.clone())),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Value {
        match self {
            Container::Object(o) => o.get(key),
            Container::Class(c) => c.get_static(key),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), ClassError> {
        match self {
            Container::Object(o) => {
                o.set(key, value);
                Ok(())
            }
            Container::Class(c) => c.set_static(key, value),
        }
    }

    fn remove(&self, key: &str) -> Option<Value> {
        match self {
            Container::Object(o) => o.remove(key),
            Container::Class(c) => c.remove_static(key),
        }
    }

    fn downgrade(&self) -> NamespaceRef {
        match self {
            Container::Object(o) => NamespaceRef::Object(o.downgrade()),
            Container::Class(c) => NamespaceRef::Class(c.downgrade()),
        }
    }
}

/// Weak handle from a class to the container it was bound on.
#[derive(Clone)]
pub(crate) enum NamespaceRef {
    Object(WeakObjectRef),
    Class(WeakClass),
}

impl NamespaceRef {
    pub(crate) fn upgrade(&self) -> Option<Value> {
        match self {
            NamespaceRef::Object(o) => o.upgrade().map(Value::Object),
            NamespaceRef::Class(c) => c.upgrade().map(Value::Class),
        }
    }
}

/// A checked, not yet bound, location for a new class.
pub(crate) struct Placement {
    path: NamePath,
    container: Container,
}

impl Placement {
    pub(crate) fn path(&self) -> &NamePath {
        &self.path
    }

    pub(crate) fn namespace(&self) -> NamespaceRef {
        self.container.downgrade()
    }

    pub(crate) fn bind(&self, value: Value) -> Result<(), ClassError> {
        self.container.set(self.path.short_name(), value)?;
        debug!(path = %self.path, "registered class");
        Ok(())
    }

    /// Removes the binding made by [`Placement::bind`] if `value` still holds the slot.
    pub(crate) fn unbind(&self, value: &Value) {
        let short_name = self.path.short_name();
        if self.container.get(short_name) == *value {
            self.container.remove(short_name);
            debug!(path = %self.path, "unregistered class after failed initialization");
        }
    }
}

/// The container tree of one realm.
#[derive(Clone)]
pub struct Registry {
    name: String,
    global: ObjectRef,
}

#[derive(Clone)]
pub struct WeakRegistry {
    name: String,
    global: WeakObjectRef,
}

impl Registry {
    /// An empty registry; `name` labels its global object in logs.
    pub fn new(name: &str) -> Self {
        Registry {
            name: name.to_string(),
            global: ObjectRef::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root container.
    pub fn global(&self) -> &ObjectRef {
        &self.global
    }

    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            name: self.name.clone(),
            global: self.global.downgrade(),
        }
    }

    /// Reads the value at a dotted path.
    pub fn lookup(&self, name: &str) -> Result<Option<Value>, ClassError> {
        let path = NameParser::parse_name(name)?;
        Ok(self.lookup_path(&path))
    }

    pub fn lookup_path(&self, path: &NamePath) -> Option<Value> {
        let mut current = Value::Object(self.global.clone());
        for segment in path.segments() {
            let container = Container::from_value(&current)?;
            current = container.get(segment);
            if current.is_undefined() {
                return None;
            }
        }
        Some(current)
    }

    /// Removes the binding at a dotted path and returns what was there.
    ///
    /// Intermediate containers are left in place.
    pub fn unregister(&self, name: &str) -> Result<Option<Value>, ClassError> {
        let path = NameParser::parse_name(name)?;
        let container = match self.find_container(path.namespace()) {
            Some(c) => c,
            None => return Ok(None),
        };
        let removed = container.remove(path.short_name());
        if removed.is_some() {
            debug!(registry = %self.name, path = %path, "unregistered");
        }
        Ok(removed)
    }

    /// Resolves the container for `path`, creating missing intermediate objects,
    /// and checks that its last segment is free.
    pub(crate) fn prepare(&self, path: NamePath) -> Result<Placement, ClassError> {
        let container = self.ensure_container(path.namespace())?;
        if !container.get(path.short_name()).is_undefined() {
            warn!(registry = %self.name, path = %path, "name collision");
            return Err(ClassError::NameCollision(path.full_name()));
        }
        Ok(Placement { path, container })
    }

    fn find_container(&self, segments: &[String]) -> Option<Container> {
        let mut current = Container::Object(self.global.clone());
        for segment in segments {
            current = Container::from_value(&current.get(segment))?;
        }
        Some(current)
    }

    fn ensure_container(&self, segments: &[String]) -> Result<Container, ClassError> {
        let mut current = Container::Object(self.global.clone());
        for segment in segments {
            current = match current.get(segment) {
                Value::Undefined => {
                    let fresh = ObjectRef::new();
                    current.set(segment, Value::Object(fresh.clone()))?;
                    Container::Object(fresh)
                }
                other => Container::from_value(&other)
                    .ok_or_else(|| ClassError::NotAContainer(segment.clone()))?,
            };
        }
        Ok(current)
    }
}

impl WeakRegistry {
    pub fn upgrade(&self) -> Option<Registry> {
        self.global.upgrade().map(|global| Registry {
            name: self.name.clone(),
            global,
        })
    }
}
