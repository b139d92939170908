//! Classes: inheritable, constructible type descriptors.
//!
//! A [`Class`] carries two kinds of members:
//!
//! - **statics**, held in its own table. Extending a class copies the table, so
//!   statics are a snapshot of the base at the time of extension.
//! - **prototype members**, held on its prototype object. The prototype is a raw
//!   instance of the base class, so the chain to every ancestor prototype is live.
//!
//! ```text
//! instance ──▶ Child.prototype ──▶ Base.prototype ──▶ Root.prototype
//!                 │ constructor        │ constructor       │ constructor
//!                 ▼                    ▼                   ▼
//!               Child ──base──▶      Base ──base──▶      Root
//! ```

pub mod extend;
pub mod instance;
pub mod proxy;
pub mod root;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::parser::ast::NamePath;
use crate::runner::class::proxy::{build_proxy, Callbacks};
use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::Method;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::value::Value;
use crate::runner::ds::well_known::{
    CONSTRUCTOR, CONSTRUCTOR_EXTENDS, DEFAULTS, FULL_NAME, NAMESPACE, PROTOTYPE, RESERVED_STATICS,
    SHORT_NAME, UNDERSCORED_FULL_NAME, UNDERSCORED_SHORT_NAME,
};
use crate::runner::namespace::registry::{NamespaceRef, WeakRegistry};

pub use extend::ExtendArgs;

/// Where a class was published, if it was given a name.
pub(crate) struct Naming {
    pub(crate) path: NamePath,
    pub(crate) namespace: NamespaceRef,
}

pub struct ClassInner {
    id: Uuid,
    base: Option<Class>,
    statics: RefCell<IndexMap<String, Value>>,
    prototype: ObjectRef,
    naming: Option<Naming>,
    /// Only the root class of a realm carries a label.
    root_label: Option<String>,
    registry: WeakRegistry,
}

/// A type descriptor. Cloning shares the class; equality is identity.
#[derive(Clone)]
pub struct Class(Rc<ClassInner>);

#[derive(Clone)]
pub struct WeakClass(Weak<ClassInner>);

impl Class {
    pub(crate) fn from_parts(
        base: Option<Class>,
        statics: IndexMap<String, Value>,
        prototype: ObjectRef,
        naming: Option<Naming>,
        root_label: Option<String>,
        registry: WeakRegistry,
    ) -> Class {
        let class = Class(Rc::new(ClassInner {
            id: Uuid::new_v4(),
            base,
            statics: RefCell::new(statics),
            prototype,
            naming,
            root_label,
            registry,
        }));
        class.0.prototype.set_constructor(&class);
        class
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn base(&self) -> Option<&Class> {
        self.0.base.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.0.base.is_none()
    }

    /// The object shared by every instance through its prototype chain.
    pub fn prototype(&self) -> &ObjectRef {
        &self.0.prototype
    }

    pub fn full_name(&self) -> Option<String> {
        self.0.naming.as_ref().map(|n| n.path.full_name())
    }

    pub fn short_name(&self) -> Option<&str> {
        self.0.naming.as_ref().map(|n| n.path.short_name())
    }

    pub fn underscored_full_name(&self) -> Option<String> {
        self.0
            .naming
            .as_ref()
            .map(|n| n.path.underscored_full_name())
    }

    pub fn underscored_short_name(&self) -> Option<String> {
        self.0
            .naming
            .as_ref()
            .map(|n| n.path.underscored_short_name())
    }

    /// The container the class was bound on, while it is still alive.
    pub fn namespace(&self) -> Option<Value> {
        self.0.naming.as_ref().and_then(|n| n.namespace.upgrade())
    }

    /// Full name, root label, or an anonymous tag built from the class id.
    pub fn display_name(&self) -> String {
        match (self.full_name(), &self.0.root_label) {
            (Some(name), _) => name,
            (None, Some(label)) => label.clone(),
            (None, None) => format!("<anonymous {}>", self.0.id.to_hyphenated()),
        }
    }

    pub(crate) fn registry(&self) -> &WeakRegistry {
        &self.0.registry
    }

    pub fn get_static(&self, name: &str) -> Value {
        if RESERVED_STATICS.contains(name) {
            return self.reserved_static(name);
        }
        self.0
            .statics
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(Value::Undefined)
    }

    fn reserved_static(&self, name: &str) -> Value {
        let text = |s: Option<String>| s.map(Value::String).unwrap_or(Value::Undefined);
        match name {
            CONSTRUCTOR => Value::Class(self.clone()),
            PROTOTYPE => Value::Object(self.0.prototype.clone()),
            FULL_NAME => text(self.full_name()),
            SHORT_NAME => text(self.short_name().map(|s| s.to_string())),
            UNDERSCORED_FULL_NAME => text(self.underscored_full_name()),
            UNDERSCORED_SHORT_NAME => text(self.underscored_short_name()),
            NAMESPACE => self.namespace().unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }

    pub fn has_static(&self, name: &str) -> bool {
        RESERVED_STATICS.contains(name) || self.0.statics.borrow().contains_key(name)
    }

    pub fn set_static(&self, name: &str, value: Value) -> Result<(), ClassError> {
        if RESERVED_STATICS.contains(name) {
            return Err(ClassError::ReadOnly(format!(
                "{}.{}",
                self.display_name(),
                name
            )));
        }
        self.0
            .statics
            .borrow_mut()
            .insert(name.to_string(), value);
        Ok(())
    }

    pub fn remove_static(&self, name: &str) -> Option<Value> {
        self.0.statics.borrow_mut().shift_remove(name)
    }

    /// Own static table, in insertion order.
    pub fn statics(&self) -> Vec<(String, Value)> {
        self.0
            .statics
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub(crate) fn snapshot_statics(&self) -> IndexMap<String, Value> {
        self.0.statics.borrow().clone()
    }

    pub fn constructor_extends(&self) -> bool {
        self.get_static(CONSTRUCTOR_EXTENDS).to_boolean()
    }

    pub fn defaults(&self) -> Value {
        self.get_static(DEFAULTS)
    }

    /// Whether `other` is this class or one of its ancestors.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(c) = current {
            if c == other {
                return true;
            }
            current = c.base();
        }
        false
    }

    /// Calls a static method with the class as `this`.
    pub fn call_static(&self, name: &str, args: Vec<Value>) -> Result<Value, ClassError> {
        Value::Class(self.clone()).call_method(name, args)
    }

    pub fn proxy(
        &self,
        callbacks: impl Into<Callbacks>,
        curried: Vec<Value>,
    ) -> Result<Method, ClassError> {
        build_proxy(Value::Class(self.clone()), callbacks.into(), curried)
    }

    pub fn downgrade(&self) -> WeakClass {
        WeakClass(Rc::downgrade(&self.0))
    }
}

impl WeakClass {
    pub fn upgrade(&self) -> Option<Class> {
        self.0.upgrade().map(Class)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.display_name())
            .field("id", &self.0.id)
            .finish()
    }
}
