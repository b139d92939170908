//! Tests for proxy callbacks.
//!
//! These tests verify receiver binding, curried arguments and callback
//! pipelines.

extern crate jclass;

use jclass::runner::class::proxy::Callback;
use jclass::runner::class::ExtendArgs;
use jclass::runner::ds::error::ClassError;
use jclass::runner::ds::function_object::Method;
use jclass::runner::ds::list_object::ListRef;
use jclass::runner::ds::object::ObjectRef;
use jclass::runner::ds::realm::Realm;
use jclass::runner::ds::value::Value;

#[test]
fn test_static_proxy_binds_class() {
    let realm = Realm::new();
    let class = realm
        .extend(
            ExtendArgs::new().statics(
                ObjectRef::new()
                    .with("label", "counter")
                    .with_method("describe", |inv, _| Ok(inv.this().get("label"))),
            ),
        )
        .unwrap();

    let describe = class.proxy("describe", vec![]).unwrap();
    assert_eq!(describe.invoke(vec![]).unwrap(), Value::from("counter"));
}

#[test]
fn test_instance_proxy_with_curried_arguments() {
    let realm = Realm::new();
    let class = realm
        .extend(ExtendArgs::new().proto(
            ObjectRef::new()
                .with("base", 100)
                .with_method("sum", |inv, args| {
                    let mut total = inv.this().get("base").as_i64().unwrap_or(0);
                    for arg in args {
                        total += arg.as_i64().unwrap_or(0);
                    }
                    Ok(Value::Integer(total))
                }),
        ))
        .unwrap();
    let instance = class.construct(vec![]).unwrap();

    let sum = instance
        .proxy("sum", vec![Value::Integer(1), Value::Integer(2)])
        .unwrap();
    assert_eq!(sum.invoke(vec![Value::Integer(3)]).unwrap(), Value::Integer(106));
    assert_eq!(sum.invoke(vec![]).unwrap(), Value::Integer(103));
}

#[test]
fn test_proxy_keeps_receiver_when_called_with_other_this() {
    let realm = Realm::new();
    let class = realm
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("whoami", |inv, _| {
            Ok(inv.this().get("id"))
        })))
        .unwrap();
    let alice = class.construct(vec![]).unwrap();
    alice.set("id", Value::from("alice"));
    let bob = Value::Object(ObjectRef::new().with("id", "bob"));

    let whoami = alice.proxy("whoami", vec![]).unwrap();
    assert_eq!(whoami.call(bob, vec![]).unwrap(), Value::from("alice"));
}

#[test]
fn test_proxy_missing_method_fails_eagerly() {
    let realm = Realm::new();
    let class = realm.extend(ExtendArgs::new().named("Widgets.Button")).unwrap();
    let button = class.construct(vec![]).unwrap();

    match button.proxy(vec!["render", "missing"], vec![]) {
        Err(ClassError::MissingMethod { owner, method }) => {
            assert_eq!(owner, "Widgets.Button");
            assert_eq!(method, "render");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_proxy_error_propagates_from_inside_method() {
    let realm = Realm::new();
    let class = realm
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("bind_handler", |inv, _| {
            let handler = inv.this().proxy("onClick", vec![])?;
            Ok(Value::Function(handler))
        })))
        .unwrap();
    let instance = class.construct(vec![]).unwrap();

    match instance.call_method("bind_handler", vec![]) {
        Err(ClassError::MissingMethod { method, .. }) => assert_eq!(method, "onClick"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_pipeline_spreads_lists() {
    let realm = Realm::new();
    let class = realm
        .extend(ExtendArgs::new().proto(
            ObjectRef::new()
                .with_method("split", |_, args| {
                    let n = args.first().and_then(|v| v.as_i64()).unwrap_or(0);
                    Ok(Value::from(vec![Value::Integer(n), Value::Integer(n * 10)]))
                })
                .with_method("count", |_, args| Ok(Value::Integer(args.len() as i64)))
                .with_method("wrap", |_, args| {
                    Ok(Value::List(ListRef::whole(args)))
                }),
        ))
        .unwrap();
    let instance = class.construct(vec![]).unwrap();

    let spread = instance.proxy(vec!["split", "count"], vec![]).unwrap();
    assert_eq!(spread.invoke(vec![Value::Integer(4)]).unwrap(), Value::Integer(2));

    let whole = instance.proxy(vec!["split", "wrap", "count"], vec![]).unwrap();
    assert_eq!(whole.invoke(vec![Value::Integer(4)]).unwrap(), Value::Integer(1));
}

#[test]
fn test_pipeline_mixes_names_and_functions() {
    let realm = Realm::new();
    let class = realm
        .extend(ExtendArgs::new().proto(
            ObjectRef::new()
                .with("factor", 3)
                .with_method("double", |_, args| {
                    Ok(Value::Integer(args.first().and_then(|v| v.as_i64()).unwrap_or(0) * 2))
                }),
        ))
        .unwrap();
    let instance = class.construct(vec![]).unwrap();
    let scale = Method::new(|inv, args| {
        let factor = inv.this().get("factor").as_i64().unwrap_or(1);
        Ok(Value::Integer(args.first().and_then(|v| v.as_i64()).unwrap_or(0) * factor))
    });

    let proxy = instance
        .proxy(
            vec![Callback::from("double"), Callback::from(scale)],
            vec![],
        )
        .unwrap();
    assert_eq!(proxy.invoke(vec![Value::Integer(5)]).unwrap(), Value::Integer(30));
}

#[test]
fn test_named_steps_bind_late() {
    let realm = Realm::new();
    let class = realm
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("greet", |_, _| {
            Ok(Value::from("hello"))
        })))
        .unwrap();
    let instance = class.construct(vec![]).unwrap();
    let greet = instance.proxy("greet", vec![]).unwrap();

    instance.set(
        "greet",
        Value::Function(Method::new(|_, _| Ok(Value::from("hi")))),
    );
    assert_eq!(greet.invoke(vec![]).unwrap(), Value::from("hi"));
}

#[test]
fn test_proxy_sees_prototype_methods_of_subclass() {
    let realm = Realm::new();
    let base = realm
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("speak", |_, _| {
            Ok(Value::from("..."))
        })))
        .unwrap();
    let dog = base
        .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("speak", |inv, args| {
            let quiet = inv.call_super(args)?;
            Ok(Value::from(format!("woof{}", quiet)))
        })))
        .unwrap();

    let rex = dog.construct(vec![]).unwrap();
    let speak = rex.proxy("speak", vec![]).unwrap();
    assert_eq!(speak.invoke(vec![]).unwrap(), Value::from("woof..."));
}
