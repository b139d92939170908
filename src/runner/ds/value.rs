use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::class::proxy::{build_proxy, Callbacks};
use crate::runner::class::Class;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::Method;
use crate::runner::ds::list_object::ListRef;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::operations::type_conversion::{
    to_boolean, type_name, TYPE_STR_NULL, TYPE_STR_UNDEFINED,
};

/// A dynamic value.
///
/// Lists, objects, methods and classes are handles: cloning the value shares the
/// underlying data, and equality between them is identity.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(ListRef),
    Object(ObjectRef),
    Function(Method),
    Class(Class),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn to_boolean(&self) -> bool {
        to_boolean(self)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Value::Function(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Reads a member: statics for classes, own properties then the prototype
    /// chain for objects. Anything else has no members.
    pub fn get(&self, name: &str) -> Value {
        match self {
            Value::Class(c) => c.get_static(name),
            Value::Object(o) => o.get(name),
            _ => Value::Undefined,
        }
    }

    /// Writes an own property on an object or a static on a class.
    pub fn set(&self, name: &str, value: Value) -> Result<(), ClassError> {
        match self {
            Value::Class(c) => c.set_static(name, value),
            Value::Object(o) => {
                o.set(name, value);
                Ok(())
            }
            other => Err(ClassError::NotAContainer(type_name(other).to_string())),
        }
    }

    /// The class of an instance, or the class itself.
    pub fn constructor(&self) -> Option<Class> {
        match self {
            Value::Class(c) => Some(c.clone()),
            Value::Object(o) => o.constructor(),
            _ => None,
        }
    }

    /// Calls a function value with an explicit `this`.
    pub fn call(&self, this: Value, args: Vec<Value>) -> Result<Value, ClassError> {
        match self {
            Value::Function(m) => m.call(this, args),
            other => Err(ClassError::NotCallable(other.to_string())),
        }
    }

    /// Looks up `name` on this value and calls it with this value as `this`.
    pub fn call_method(&self, name: &str, args: Vec<Value>) -> Result<Value, ClassError> {
        match self.get(name) {
            Value::Function(m) => m.call(self.clone(), args),
            _ => Err(ClassError::NotCallable(name.to_string())),
        }
    }

    pub fn instance_of(&self, class: &Class) -> bool {
        match self {
            Value::Object(o) => o.instance_of(class),
            _ => false,
        }
    }

    /// Builds a callback bound to this value. See [`build_proxy`].
    pub fn proxy(
        &self,
        callbacks: impl Into<Callbacks>,
        curried: Vec<Value>,
    ) -> Result<Method, ClassError> {
        build_proxy(self.clone(), callbacks.into(), curried)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "{}", TYPE_STR_UNDEFINED),
            Value::Null => write!(f, "{}", TYPE_STR_NULL),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::List(l) => {
                let items: Vec<String> = l.items().iter().map(|v| v.to_string()).collect();
                write!(f, "{}", items.join(","))
            }
            Value::Object(o) => match o.constructor() {
                Some(c) => write!(f, "[object {}]", c.display_name()),
                None => write!(f, "[object Object]"),
            },
            Value::Function(m) => write!(f, "function {}()", m.name().unwrap_or("")),
            Value::Class(c) => write!(f, "class {}", c.display_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Value::Undefined"),
            Value::Null => write!(f, "Value::Null"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::Integer(i) => write!(f, "Value::Integer({})", i),
            Value::Float(n) => write!(f, "Value::Float({})", n),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::List(l) => write!(f, "Value::List({:?})", l),
            Value::Object(o) => write!(f, "Value::Object({:?})", o),
            Value::Function(m) => write!(f, "Value::Function({:?})", m),
            Value::Class(c) => write!(f, "Value::Class({:?})", c),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.same(b),
            (Value::Object(a), Value::Object(b)) => a.same(b),
            (Value::Function(a), Value::Function(b)) => a.same(b),
            (Value::Class(a), Value::Class(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(ListRef::new(items))
    }
}

impl From<ListRef> for Value {
    fn from(l: ListRef) -> Self {
        Value::List(l)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<Method> for Value {
    fn from(m: Method) -> Self {
        Value::Function(m)
    }
}

impl From<Class> for Value {
    fn from(c: Class) -> Self {
        Value::Class(c)
    }
}
