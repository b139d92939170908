use indexmap::IndexMap;
use tracing::debug;

use crate::runner::class::Class;
use crate::runner::config::RealmConfig;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::{Invocation, Method};
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::operations::object::deep_extend;
use crate::runner::ds::operations::type_conversion::type_name;
use crate::runner::ds::value::Value;
use crate::runner::ds::well_known::{CONSTRUCTOR_EXTENDS, DEFAULTS, INIT, NEW_INSTANCE, SETUP};
use crate::runner::namespace::registry::Registry;

impl Class {
    /// The class every other class in a realm descends from.
    ///
    /// Its prototype has no-op `setup` and `init`; its statics are the
    /// `constructorExtends` flag, the default static `setup` and the default
    /// `newInstance`.
    pub(crate) fn root(registry: &Registry, config: &RealmConfig) -> Class {
        let prototype = ObjectRef::new()
            .with_method(SETUP, |_, _| Ok(Value::Undefined))
            .with_method(INIT, |_, _| Ok(Value::Undefined));

        let mut statics = IndexMap::new();
        statics.insert(
            CONSTRUCTOR_EXTENDS.to_string(),
            Value::Boolean(config.constructor_extends),
        );
        statics.insert(
            SETUP.to_string(),
            Value::Function(Method::named(SETUP, default_setup)),
        );
        statics.insert(
            NEW_INSTANCE.to_string(),
            Value::Function(Method::named(NEW_INSTANCE, default_new_instance)),
        );

        let root = Class::from_parts(
            None,
            statics,
            prototype,
            None,
            Some(config.root_name.clone()),
            registry.downgrade(),
        );
        debug!(root = %config.root_name, "created root class");
        root
    }
}

/// Static `setup(base, name, statics, proto)` inherited by every class.
///
/// Deep-merges the base's `defaults` with this class's own `defaults`, own keys
/// winning, and stores the result as this class's `defaults`.
pub fn default_setup(invocation: &Invocation, args: Vec<Value>) -> Result<Value, ClassError> {
    let this = invocation.this();
    let base_defaults = args
        .first()
        .map(|base| base.get(DEFAULTS))
        .unwrap_or_default();
    let merged = deep_extend(&[base_defaults, this.get(DEFAULTS)]);
    this.set(DEFAULTS, Value::Object(merged))?;
    Ok(Value::Undefined)
}

/// Static `newInstance(...args)` inherited by every class.
///
/// Runs the two-stage protocol of [`Class::new_instance`] on `this`. Classes
/// override it to hand out cached or pooled instances.
pub fn default_new_instance(invocation: &Invocation, args: Vec<Value>) -> Result<Value, ClassError> {
    match invocation.this() {
        Value::Class(class) => class.new_instance(args).map(Value::Object),
        other => Err(ClassError::NotAClass(type_name(other).to_string())),
    }
}
