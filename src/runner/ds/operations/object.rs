use crate::runner::ds::list_object::ListRef;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::value::Value;

/// Deep-extends a fresh object with every source, later sources winning.
///
/// Plain objects and lists are merged recursively into fresh copies, lists
/// index by index. `Undefined` source members are skipped and every other
/// value is copied by handle. Sources that are not objects are ignored.
pub fn deep_extend(sources: &[Value]) -> ObjectRef {
    let target = ObjectRef::new();
    for source in sources {
        if let Value::Object(o) = source {
            merge_object_into(&target, o);
        }
    }
    target
}

fn merge_object_into(target: &ObjectRef, source: &ObjectRef) {
    if target.same(source) {
        return;
    }
    for (key, copy) in source.entries() {
        let existing = target.get_own(&key).unwrap_or_default();
        if let Some(merged) = merge_value(existing, copy) {
            target.set(&key, merged);
        }
    }
}

fn merge_list_into(target: &ListRef, source: &ListRef) {
    if target.same(source) {
        return;
    }
    for (index, copy) in source.items().into_iter().enumerate() {
        if let Some(merged) = merge_value(target.get(index), copy) {
            target.set(index, merged);
        }
    }
}

fn merge_value(existing: Value, copy: Value) -> Option<Value> {
    match copy {
        Value::Undefined => None,
        Value::Object(o) if o.is_plain() => {
            let clone = match existing {
                Value::Object(e) if e.is_plain() => e,
                _ => ObjectRef::new(),
            };
            merge_object_into(&clone, &o);
            Some(Value::Object(clone))
        }
        Value::List(l) => {
            let clone = match existing {
                Value::List(e) => e,
                _ => ListRef::new(Vec::new()),
            };
            merge_list_into(&clone, &l);
            Some(Value::List(clone))
        }
        other => Some(other),
    }
}
