use tracing::trace;

use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::Method;
use crate::runner::ds::operations::type_conversion::type_name;
use crate::runner::ds::value::Value;

/// One step of a proxy: a member name looked up on the receiver, or a function.
#[derive(Debug, Clone)]
pub enum Callback {
    Named(String),
    Function(Method),
}

/// The steps of a proxy, in call order.
#[derive(Debug, Clone)]
pub struct Callbacks(Vec<Callback>);

impl Callbacks {
    pub fn new(callbacks: Vec<Callback>) -> Self {
        Callbacks(callbacks)
    }
}

impl From<&str> for Callbacks {
    fn from(name: &str) -> Self {
        Callbacks(vec![Callback::Named(name.to_string())])
    }
}

impl From<String> for Callbacks {
    fn from(name: String) -> Self {
        Callbacks(vec![Callback::Named(name)])
    }
}

impl From<Method> for Callbacks {
    fn from(method: Method) -> Self {
        Callbacks(vec![Callback::Function(method)])
    }
}

impl From<Vec<&str>> for Callbacks {
    fn from(names: Vec<&str>) -> Self {
        Callbacks(
            names
                .into_iter()
                .map(|n| Callback::Named(n.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<Callback>> for Callbacks {
    fn from(callbacks: Vec<Callback>) -> Self {
        Callbacks(callbacks)
    }
}

impl From<&str> for Callback {
    fn from(name: &str) -> Self {
        Callback::Named(name.to_string())
    }
}

impl From<Method> for Callback {
    fn from(method: Method) -> Self {
        Callback::Function(method)
    }
}

/// Builds a callback that runs `callbacks` with `receiver` as `this`.
///
/// Named steps must resolve to a function on the receiver when the proxy is
/// built. At call time the curried arguments are placed before the call
/// arguments, and each step's result becomes the next step's arguments: a list
/// is spread, anything else (including a [`ListRef::whole`] list) is passed as
/// a single argument. The result of the last step is returned.
///
/// [`ListRef::whole`]: crate::runner::ds::list_object::ListRef::whole
pub fn build_proxy(
    receiver: Value,
    callbacks: Callbacks,
    curried: Vec<Value>,
) -> Result<Method, ClassError> {
    for callback in &callbacks.0 {
        if let Callback::Named(name) = callback {
            if !receiver.get(name).is_callable() {
                return Err(ClassError::MissingMethod {
                    owner: owner_name(&receiver),
                    method: name.clone(),
                });
            }
        }
    }
    trace!(owner = %owner_name(&receiver), steps = callbacks.0.len(), "built proxy");

    let steps = callbacks.0;
    Ok(Method::new(move |_, args| {
        let mut current: Vec<Value> = curried.iter().cloned().chain(args).collect();
        let mut result = Value::Undefined;
        for (index, step) in steps.iter().enumerate() {
            let step_args = std::mem::take(&mut current);
            result = match step {
                Callback::Named(name) => receiver.call_method(name, step_args)?,
                Callback::Function(method) => method.call(receiver.clone(), step_args)?,
            };
            if index + 1 < steps.len() {
                current = next_arguments(&result);
            }
        }
        Ok(result)
    }))
}

fn next_arguments(result: &Value) -> Vec<Value> {
    match result {
        Value::List(l) if !l.is_whole() => l.items(),
        other => vec![other.clone()],
    }
}

fn owner_name(receiver: &Value) -> String {
    match receiver.constructor() {
        Some(class) => class.display_name(),
        None => type_name(receiver).to_string(),
    }
}
