use crate::runner::ds::value::Value;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_LIST: &str = "list";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";
pub const TYPE_STR_CLASS: &str = "class";

pub fn type_name(a: &Value) -> &'static str {
    match a {
        Value::Undefined => TYPE_STR_UNDEFINED,
        Value::Null => TYPE_STR_NULL,
        Value::Boolean(_) => TYPE_STR_BOOLEAN,
        Value::String(_) => TYPE_STR_STRING,
        Value::Integer(_) | Value::Float(_) => TYPE_STR_NUMBER,
        Value::List(_) => TYPE_STR_LIST,
        Value::Object(_) => TYPE_STR_OBJECT,
        Value::Function(_) => TYPE_STR_FUNCTION,
        Value::Class(_) => TYPE_STR_CLASS,
    }
}

pub fn to_boolean(a: &Value) -> bool {
    match a {
        Value::Undefined | Value::Null => false,
        Value::Boolean(b) => *b,
        Value::Integer(i) => *i != 0,
        Value::Float(n) => !(*n == 0.0 || n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::List(_) | Value::Object(_) | Value::Function(_) | Value::Class(_) => true,
    }
}
