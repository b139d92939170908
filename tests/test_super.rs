//! Tests for super dispatch.
//!
//! These tests verify that overriding prototype and static methods reach
//! the implementation they replaced, including across several levels.

extern crate jclass;

use jclass::runner::class::{Class, ExtendArgs};
use jclass::runner::ds::error::ClassError;
use jclass::runner::ds::function_object::Method;
use jclass::runner::ds::object::ObjectRef;
use jclass::runner::ds::realm::Realm;
use jclass::runner::ds::value::Value;

fn int_arg(args: &[Value]) -> i64 {
    args.first().and_then(|v| v.as_i64()).unwrap_or(0)
}

/// `A.init(val)` stores `arg = val`; `A.add(n)` returns `arg + n`.
fn adder(realm: &Realm) -> Class {
    realm
        .extend(
            ExtendArgs::new().proto(
                ObjectRef::new()
                    .with_method("init", |inv, args| {
                        inv.this().set("arg", Value::Integer(int_arg(&args)))?;
                        Ok(Value::Undefined)
                    })
                    .with_method("add", |inv, args| {
                        let arg = inv.this().get("arg").as_i64().unwrap_or(0);
                        Ok(Value::Integer(arg + int_arg(&args)))
                    }),
            ),
        )
        .unwrap()
}

#[test]
fn test_prototype_super() {
    let realm = Realm::new();
    let a = adder(&realm);
    // B.init(val) calls super with val * 2, B.add(n) adds one more
    let b = a
        .extend(
            ExtendArgs::new().proto(
                ObjectRef::new()
                    .with_method("init", |inv, args| {
                        inv.call_super(vec![Value::Integer(int_arg(&args) * 2)])
                    })
                    .with_method("add", |inv, args| {
                        let sum = inv.call_super(args)?.as_i64().unwrap_or(0);
                        Ok(Value::Integer(sum + 1))
                    }),
            ),
        )
        .unwrap();

    let instance = b.construct(vec![Value::Integer(2)]).unwrap();
    assert_eq!(instance.get("arg"), Value::Integer(4));
    assert_eq!(
        instance.call_method("add", vec![Value::Integer(2)]).unwrap(),
        Value::Integer(7)
    );

    // the parent is untouched
    let plain = a.construct(vec![Value::Integer(2)]).unwrap();
    assert_eq!(plain.get("arg"), Value::Integer(2));
    assert_eq!(
        plain.call_method("add", vec![Value::Integer(2)]).unwrap(),
        Value::Integer(4)
    );
}

#[test]
fn test_static_super() {
    let realm = Realm::new();
    let a = realm
        .extend(ExtendArgs::new().statics(ObjectRef::new().with_method("raise", |_, args| {
            Ok(Value::Integer(int_arg(&args) + 1))
        })))
        .unwrap();
    let b = a
        .extend(ExtendArgs::new().statics(ObjectRef::new().with_method("raise", |inv, args| {
            let raised = inv.call_super(args)?.as_i64().unwrap_or(0);
            Ok(Value::Integer(raised * 2))
        })))
        .unwrap();

    assert_eq!(b.call_static("raise", vec![Value::Integer(1)]).unwrap(), Value::Integer(4));
    assert_eq!(a.call_static("raise", vec![Value::Integer(1)]).unwrap(), Value::Integer(2));
}

#[test]
fn test_super_walks_three_levels() {
    let realm = Realm::new();
    let tag = |letter: &'static str| {
        ObjectRef::new().with_method("name", move |inv, _| {
            let above = if inv.has_super() {
                inv.call_super(vec![])?.to_string()
            } else {
                String::new()
            };
            Ok(Value::from(format!("{}{}", letter, above)))
        })
    };

    let a = realm.extend(ExtendArgs::new().proto(tag("a"))).unwrap();
    let b = a.extend(ExtendArgs::new().proto(tag("b"))).unwrap();
    let c = b.extend(ExtendArgs::new().proto(tag("c"))).unwrap();

    let instance = c.construct(vec![]).unwrap();
    assert_eq!(instance.call_method("name", vec![]).unwrap(), Value::from("cba"));
}

#[test]
fn test_super_skips_levels_without_override() {
    let realm = Realm::new();
    let a = adder(&realm);
    let middle = a.extend(ExtendArgs::new()).unwrap();
    let leaf = middle
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("add", |inv, args| {
            let sum = inv.call_super(args)?.as_i64().unwrap_or(0);
            Ok(Value::Integer(sum * 10))
        })))
        .unwrap();

    let instance = leaf.construct(vec![Value::Integer(1)]).unwrap();
    assert_eq!(
        instance.call_method("add", vec![Value::Integer(1)]).unwrap(),
        Value::Integer(20)
    );
}

#[test]
fn test_super_keeps_this() {
    let realm = Realm::new();
    let a = realm
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("mark", |inv, _| {
            inv.this().set("marked_by_a", Value::Boolean(true))?;
            Ok(Value::Undefined)
        })))
        .unwrap();
    let b = a
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("mark", |inv, args| {
            inv.call_super(args)
        })))
        .unwrap();

    let instance = b.construct(vec![]).unwrap();
    instance.call_method("mark", vec![]).unwrap();
    assert_eq!(instance.get_own("marked_by_a"), Some(Value::Boolean(true)));
}

#[test]
fn test_super_without_parent_fails() {
    let realm = Realm::new();
    let class = realm
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("fresh", |inv, args| {
            inv.call_super(args)
        })))
        .unwrap();
    let instance = class.construct(vec![]).unwrap();

    match instance.call_method("fresh", vec![]) {
        Err(ClassError::NoSuperMethod(name)) => assert_eq!(name, "fresh"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_replacing_a_method_with_data_drops_the_link() {
    let realm = Realm::new();
    let a = adder(&realm);
    let b = a
        .extend(ExtendArgs::new().proto(ObjectRef::new().with("add", 5)))
        .unwrap();
    let instance = b.construct(vec![]).unwrap();
    assert_eq!(instance.get("add"), Value::Integer(5));
    match instance.call_method("add", vec![]) {
        Err(ClassError::NotCallable(name)) => assert_eq!(name, "add"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_super_sees_ancestor_replaced_after_extension() {
    let realm = Realm::new();
    let base = realm
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("m", |_, _| {
            Ok(Value::from("old"))
        })))
        .unwrap();
    let child = base
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("m", |inv, args| {
            inv.call_super(args)
        })))
        .unwrap();
    let grandchild = child.extend(ExtendArgs::new()).unwrap();
    let instance = child.construct(vec![]).unwrap();

    base.prototype().set(
        "m",
        Value::Function(Method::new(|_, _| Ok(Value::from("new")))),
    );

    assert_eq!(instance.call_method("m", vec![]).unwrap(), Value::from("new"));
    let plain = grandchild.construct(vec![]).unwrap();
    assert_eq!(plain.call_method("m", vec![]).unwrap(), Value::from("new"));
}

#[test]
fn test_static_super_sees_base_static_replaced_after_extension() {
    let realm = Realm::new();
    let base = realm
        .extend(ExtendArgs::new().statics(ObjectRef::new().with_method("kind", |_, _| {
            Ok(Value::from("base"))
        })))
        .unwrap();
    let child = base
        .extend(ExtendArgs::new().statics(ObjectRef::new().with_method("kind", |inv, args| {
            let above = inv.call_super(args)?;
            Ok(Value::from(format!("child of {}", above)))
        })))
        .unwrap();

    base.set_static(
        "kind",
        Value::Function(Method::new(|_, _| Ok(Value::from("patched")))),
    )
    .unwrap();
    assert_eq!(
        child.call_static("kind", vec![]).unwrap(),
        Value::from("child of patched")
    );
}
