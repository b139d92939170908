use tracing::debug;

use crate::parser::NameParser;
use crate::runner::class::{Class, Naming};
use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::SuperSource;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::value::Value;
use crate::runner::ds::well_known::{INIT, SETUP};

/// What to build a new class from.
///
/// Rust callers use the builder methods; dynamic argument lists go through
/// [`ExtendArgs::from_values`].
#[derive(Debug, Clone, Default)]
pub struct ExtendArgs {
    name: Option<String>,
    statics: Option<ObjectRef>,
    proto: Option<ObjectRef>,
}

impl ExtendArgs {
    pub fn new() -> Self {
        ExtendArgs::default()
    }

    /// Dotted path to publish the class under, e.g. `App.Models.Recipe`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn statics(mut self, statics: ObjectRef) -> Self {
        self.statics = Some(statics);
        self
    }

    pub fn proto(mut self, proto: ObjectRef) -> Self {
        self.proto = Some(proto);
        self
    }

    /// Normalizes `(name?, statics?, proto?)` given positionally.
    ///
    /// A leading non-string shifts everything left; when only one member bag
    /// remains it is the prototype bag. A non-string name is dropped.
    pub fn from_values(args: Vec<Value>) -> Self {
        let mut args = args.into_iter();
        let mut name = args.next().unwrap_or_default();
        let mut statics = args.next().unwrap_or_default();
        let mut proto = args.next().unwrap_or_default();

        if name.as_str().is_none() {
            proto = statics;
            statics = name;
            name = Value::Undefined;
        }
        if proto.as_object().is_none() {
            proto = statics;
            statics = Value::Undefined;
        }

        ExtendArgs {
            name: name.as_str().map(|s| s.to_string()),
            statics: statics.as_object().cloned(),
            proto: proto.as_object().cloned(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Class {
    /// Creates a subclass of this class.
    ///
    /// The new prototype is a raw instance of this class overwritten with the
    /// prototype bag; the new statics are a copy of this class's statics
    /// overwritten with the static bag. Overriding methods in either bag are
    /// linked to the implementation they replace. Named classes are bound in
    /// the registry before the static `setup` and `init` run.
    pub fn extend(&self, args: ExtendArgs) -> Result<Class, ClassError> {
        let ExtendArgs {
            name,
            statics,
            proto,
        } = args;
        let statics = statics.unwrap_or_default();
        let proto = proto.unwrap_or_default();

        let proto_source = SuperSource::Prototype(self.prototype().clone());
        let prototype = self.instance();
        for (key, value) in proto.entries() {
            prototype.set(&key, link_override(&key, value, &proto_source));
        }

        let static_source = SuperSource::Statics(self.clone());
        let mut table = self.snapshot_statics();
        for (key, value) in statics.entries() {
            let linked = link_override(&key, value, &static_source);
            table.insert(key, linked);
        }

        let placement = match &name {
            Some(full_name) => {
                let path = NameParser::parse_name(full_name)?;
                let registry = self
                    .registry()
                    .upgrade()
                    .ok_or(ClassError::RegistryUnavailable)?;
                Some(registry.prepare(path)?)
            }
            None => None,
        };

        let naming = placement.as_ref().map(|p| Naming {
            path: p.path().clone(),
            namespace: p.namespace(),
        });
        let class = Class::from_parts(
            Some(self.clone()),
            table,
            prototype,
            naming,
            None,
            self.registry().clone(),
        );
        let receiver = Value::Class(class.clone());
        if let Some(placement) = &placement {
            placement.bind(receiver.clone())?;
        }
        debug!(class = %class.display_name(), base = %self.display_name(), "extended class");

        let setup_args = vec![
            Value::Class(self.clone()),
            name.map(Value::String).unwrap_or(Value::Undefined),
            Value::Object(statics),
            Value::Object(proto),
        ];
        if let Err(error) = run_static_initializers(&receiver, setup_args) {
            if let Some(placement) = &placement {
                placement.unbind(&receiver);
            }
            return Err(error);
        }

        Ok(class)
    }
}

/// Static `setup`, then static `init` with the arguments `setup` hands on.
fn run_static_initializers(receiver: &Value, setup_args: Vec<Value>) -> Result<(), ClassError> {
    let init_args = match receiver.get(SETUP) {
        Value::Function(setup) => match setup.call(receiver.clone(), setup_args.clone())? {
            Value::List(l) => l.items(),
            _ => setup_args,
        },
        _ => setup_args,
    };
    if let Value::Function(init) = receiver.get(INIT) {
        init.call(receiver.clone(), init_args)?;
    }
    Ok(())
}

/// An incoming function replacing a function gets linked to the slot it replaces.
pub(crate) fn link_override(property: &str, value: Value, source: &SuperSource) -> Value {
    match (&value, source.lookup(property)) {
        (Value::Function(m), Value::Function(_)) => Value::Function(m.overriding(property, source.clone())),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::function_object::Method;

    #[test]
    fn test_from_values_name_statics_proto() {
        let s = ObjectRef::new();
        let p = ObjectRef::new();
        let args = ExtendArgs::from_values(vec![
            Value::from("Foo.Bar"),
            Value::Object(s.clone()),
            Value::Object(p.clone()),
        ]);
        assert_eq!(args.name(), Some("Foo.Bar"));
        assert!(args.statics.unwrap().same(&s));
        assert!(args.proto.unwrap().same(&p));
    }

    #[test]
    fn test_from_values_without_name() {
        let s = ObjectRef::new();
        let p = ObjectRef::new();
        let args = ExtendArgs::from_values(vec![Value::Object(s.clone()), Value::Object(p.clone())]);
        assert_eq!(args.name(), None);
        assert!(args.statics.unwrap().same(&s));
        assert!(args.proto.unwrap().same(&p));
    }

    #[test]
    fn test_from_values_single_bag_is_proto() {
        let p = ObjectRef::new();
        let args = ExtendArgs::from_values(vec![Value::Object(p.clone())]);
        assert!(args.statics.is_none());
        assert!(args.proto.unwrap().same(&p));

        let named = ExtendArgs::from_values(vec![Value::from("Todo"), Value::Object(p.clone())]);
        assert_eq!(named.name(), Some("Todo"));
        assert!(named.statics.is_none());
        assert!(named.proto.unwrap().same(&p));
    }

    #[test]
    fn test_from_values_name_only() {
        let args = ExtendArgs::from_values(vec![Value::from("Foo.Bar")]);
        assert_eq!(args.name(), Some("Foo.Bar"));
        assert!(args.statics.is_none());
        assert!(args.proto.is_none());
    }

    #[test]
    fn test_link_override_only_links_functions_over_functions() {
        let parent = Method::new(|_, _| Ok(Value::Null));
        let child = Method::new(|_, _| Ok(Value::Null));
        let base = ObjectRef::new()
            .with("m", Value::Function(parent.clone()))
            .with("n", 1);
        let source = SuperSource::Prototype(base);

        let linked = link_override("m", Value::Function(child.clone()), &source);
        assert!(linked.as_method().unwrap().super_method().unwrap().same(&parent));

        let unlinked = link_override("n", Value::Function(child.clone()), &source);
        assert!(unlinked.as_method().unwrap().same(&child));

        let data = link_override("m", Value::Integer(2), &source);
        assert_eq!(data, Value::Integer(2));
    }
}
