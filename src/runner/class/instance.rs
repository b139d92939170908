use tracing::trace;

use crate::runner::class::extend::ExtendArgs;
use crate::runner::class::Class;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::value::Value;
use crate::runner::ds::well_known::{INIT, NEW_INSTANCE, SETUP};

impl Class {
    /// Allocates an object linked to this class's prototype without running
    /// `setup` or `init`.
    pub fn instance(&self) -> ObjectRef {
        ObjectRef::with_prototype(Some(self.prototype().clone()), Some(self.clone()))
    }

    /// Allocates an instance, then runs its `setup` and `init`.
    ///
    /// When `setup` returns a list, its items replace `args` for `init`.
    pub fn new_instance(&self, args: Vec<Value>) -> Result<ObjectRef, ClassError> {
        let inst = self.instance();
        let this = Value::Object(inst.clone());
        trace!(class = %self.display_name(), "new instance");

        let mut init_args = None;
        if let Value::Function(setup) = inst.get(SETUP) {
            if let Value::List(l) = setup.call(this.clone(), args.clone())? {
                init_args = Some(l.items());
            }
        }
        if let Value::Function(init) = inst.get(INIT) {
            init.call(this, init_args.unwrap_or(args))?;
        }
        Ok(inst)
    }

    /// Construction, as with `new Class(args)`.
    ///
    /// Goes through the class's `newInstance` static, which defaults to
    /// [`Class::new_instance`] and may be overridden to reuse instances.
    pub fn construct(&self, args: Vec<Value>) -> Result<ObjectRef, ClassError> {
        match self.instantiate(args)? {
            Value::Object(o) => Ok(o),
            _ => Err(ClassError::NotAnInstance(self.display_name())),
        }
    }

    fn instantiate(&self, args: Vec<Value>) -> Result<Value, ClassError> {
        Value::Class(self.clone()).call_method(NEW_INSTANCE, args)
    }

    /// Calling the class as a plain function.
    ///
    /// With arguments and `constructorExtends` set, this extends the class and
    /// returns the subclass; otherwise it constructs an instance. The root class
    /// always extends, and returns `Undefined` when called with no arguments.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, ClassError> {
        if self.is_root() {
            if args.is_empty() {
                return Ok(Value::Undefined);
            }
            return self.extend(ExtendArgs::from_values(args)).map(Value::Class);
        }
        if !args.is_empty() && self.constructor_extends() {
            self.extend(ExtendArgs::from_values(args)).map(Value::Class)
        } else {
            self.instantiate(args)
        }
    }
}
