use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::runner::class::Class;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::value::Value;

/// Signature of every method body.
///
/// A body receives the [`Invocation`] (its `this` and the route to the method it
/// overrides) and the call arguments.
pub type MethodBody = dyn Fn(&Invocation, Vec<Value>) -> Result<Value, ClassError>;

/// Where an overriding method finds the implementation it replaced.
#[derive(Clone)]
pub enum SuperSource {
    /// The base prototype; the member is looked up along its chain.
    Prototype(ObjectRef),
    /// The base class; the member is one of its statics.
    Statics(Class),
}

impl SuperSource {
    pub fn lookup(&self, property: &str) -> Value {
        match self {
            SuperSource::Prototype(o) => o.get(property),
            SuperSource::Statics(c) => c.get_static(property),
        }
    }
}

struct SuperLink {
    source: SuperSource,
    property: String,
}

struct MethodData {
    name: Option<String>,
    body: Rc<MethodBody>,
    /// Set when this method overrides an inherited one.
    link: Option<SuperLink>,
}

/// A callable value.
#[derive(Clone)]
pub struct Method(Rc<MethodData>);

impl Method {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Invocation, Vec<Value>) -> Result<Value, ClassError> + 'static,
    {
        Method(Rc::new(MethodData {
            name: None,
            body: Rc::new(body),
            link: None,
        }))
    }

    pub fn named<F>(name: &str, body: F) -> Self
    where
        F: Fn(&Invocation, Vec<Value>) -> Result<Value, ClassError> + 'static,
    {
        Method(Rc::new(MethodData {
            name: Some(name.to_string()),
            body: Rc::new(body),
            link: None,
        }))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// The implementation this method overrides, looked up now.
    ///
    /// Replacing the member on an ancestor after the override was linked
    /// changes what this returns.
    pub fn super_method(&self) -> Option<Method> {
        let link = self.0.link.as_ref()?;
        match link.source.lookup(&link.property) {
            Value::Function(m) => Some(m),
            _ => None,
        }
    }

    /// Same body, stored under `property`, overriding whatever `source` holds there.
    pub(crate) fn overriding(&self, property: &str, source: SuperSource) -> Method {
        Method(Rc::new(MethodData {
            name: Some(property.to_string()),
            body: self.0.body.clone(),
            link: Some(SuperLink {
                source,
                property: property.to_string(),
            }),
        }))
    }

    pub fn call(&self, this: Value, args: Vec<Value>) -> Result<Value, ClassError> {
        let invocation = Invocation {
            this,
            method: self.clone(),
        };
        (self.0.body)(&invocation, args)
    }

    /// Calls with an undefined `this`. Proxies ignore the `this` they are called with.
    pub fn invoke(&self, args: Vec<Value>) -> Result<Value, ClassError> {
        self.call(Value::Undefined, args)
    }

    pub fn same(&self, other: &Method) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.0.name)
            .field("overrides", &self.0.link.is_some())
            .finish()
    }
}

/// The context of a running method.
pub struct Invocation {
    this: Value,
    method: Method,
}

impl Invocation {
    pub fn this(&self) -> &Value {
        &self.this
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn has_super(&self) -> bool {
        self.method.super_method().is_some()
    }

    /// Runs the implementation the current method overrides, with the same `this`.
    ///
    /// The overridden member is read from the base when this is called, not
    /// when the override was defined. Inside that call, `call_super` in turn
    /// reaches the next ancestor up.
    pub fn call_super(&self, args: Vec<Value>) -> Result<Value, ClassError> {
        match self.method.super_method() {
            Some(parent) => {
                trace!(method = ?self.method.name(), "calling super");
                parent.call(self.this.clone(), args)
            }
            None => Err(ClassError::NoSuperMethod(
                self.method.name().unwrap_or("anonymous").to_string(),
            )),
        }
    }
}
