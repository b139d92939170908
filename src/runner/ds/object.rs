use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::runner::class::proxy::{build_proxy, Callbacks};
use crate::runner::class::{Class, WeakClass};
use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::{Invocation, Method};
use crate::runner::ds::value::Value;
use crate::runner::ds::well_known::CONSTRUCTOR;

pub struct ObjectData {
    properties: IndexMap<String, Value>,
    prototype: Option<ObjectRef>,
    /// The class whose raw allocation produced this object.
    class: Option<Class>,
    /// Set on prototype objects only; points back at the class owning the prototype.
    constructor: Option<WeakClass>,
}

/// A shared, mutable object with insertion-ordered own properties and an
/// optional prototype link.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

#[derive(Clone)]
pub struct WeakObjectRef(Weak<RefCell<ObjectData>>);

impl ObjectRef {
    /// A plain object: no prototype, no class.
    pub fn new() -> Self {
        ObjectRef::with_prototype(None, None)
    }

    pub(crate) fn with_prototype(prototype: Option<ObjectRef>, class: Option<Class>) -> Self {
        ObjectRef(Rc::new(RefCell::new(ObjectData {
            properties: IndexMap::new(),
            prototype,
            class,
            constructor: None,
        })))
    }

    /// Builder-style property insertion.
    pub fn with(self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value.into());
        self
    }

    /// Builder-style method insertion.
    pub fn with_method<F>(self, name: &str, body: F) -> Self
    where
        F: Fn(&Invocation, Vec<Value>) -> Result<Value, ClassError> + 'static,
    {
        self.set(name, Value::Function(Method::named(name, body)));
        self
    }

    pub fn get_own(&self, name: &str) -> Option<Value> {
        self.0.borrow().properties.get(name).cloned()
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.0.borrow().properties.contains_key(name)
    }

    /// Looks `name` up on this object, then along the prototype chain.
    ///
    /// `constructor` resolves to the class a prototype points back at, as if
    /// every prototype carried it as a property.
    pub fn get(&self, name: &str) -> Value {
        let wants_constructor = name == CONSTRUCTOR;
        let mut current = Some(self.clone());
        while let Some(o) = current {
            let data = o.0.borrow();
            if let Some(v) = data.properties.get(name) {
                return v.clone();
            }
            if wants_constructor {
                if let Some(class) = data.constructor.as_ref().and_then(|c| c.upgrade()) {
                    return Value::Class(class);
                }
            }
            current = data.prototype.clone();
        }
        if wants_constructor {
            if let Some(class) = self.0.borrow().class.clone() {
                return Value::Class(class);
            }
        }
        Value::Undefined
    }

    pub fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().properties.insert(name.to_string(), value);
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.0.borrow_mut().properties.shift_remove(name)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Own properties in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.borrow().prototype.clone()
    }

    /// Plain objects are the ones merged recursively by deep extension.
    pub fn is_plain(&self) -> bool {
        let data = self.0.borrow();
        data.prototype.is_none() && data.class.is_none()
    }

    /// The class owning the first prototype in the chain that points back at one.
    pub fn constructor(&self) -> Option<Class> {
        let mut current = Some(self.clone());
        while let Some(o) = current {
            let data = o.0.borrow();
            if let Some(class) = data.constructor.as_ref().and_then(|c| c.upgrade()) {
                return Some(class);
            }
            current = data.prototype.clone();
        }
        self.0.borrow().class.clone()
    }

    pub(crate) fn set_constructor(&self, class: &Class) {
        self.0.borrow_mut().constructor = Some(class.downgrade());
    }

    /// Whether the class's prototype appears in this object's prototype chain.
    pub fn instance_of(&self, class: &Class) -> bool {
        let target = class.prototype();
        let mut current = self.prototype();
        while let Some(o) = current {
            if o.same(target) {
                return true;
            }
            current = o.prototype();
        }
        false
    }

    pub fn call_method(&self, name: &str, args: Vec<Value>) -> Result<Value, ClassError> {
        Value::Object(self.clone()).call_method(name, args)
    }

    pub fn proxy(
        &self,
        callbacks: impl Into<Callbacks>,
        curried: Vec<Value>,
    ) -> Result<Method, ClassError> {
        build_proxy(Value::Object(self.clone()), callbacks.into(), curried)
    }

    pub fn same(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakObjectRef {
        WeakObjectRef(Rc::downgrade(&self.0))
    }
}

impl WeakObjectRef {
    pub fn upgrade(&self) -> Option<ObjectRef> {
        self.0.upgrade().map(ObjectRef)
    }
}

impl Default for ObjectRef {
    fn default() -> Self {
        ObjectRef::new()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        let keys: Vec<&String> = data.properties.keys().collect();
        f.debug_struct("Object")
            .field("keys", &keys)
            .field("has_prototype", &data.prototype.is_some())
            .finish()
    }
}
