//! Built-in functions available to every program.
//!
//! The registry is read-only and consulted only after the environment
//! chain is exhausted, so user bindings shadow built-ins.

use crate::object::Object;

/// Looks up a built-in function by name.
pub fn lookup(name: &str) -> Option<Object> {
    match name {
        "len" => Some(Object::Builtin(builtin_len)),
        _ => None,
    }
}

/// `len(x)`: character count of a string, element count of an array.
fn builtin_len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return Object::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Object::String(value) => Object::Integer(value.chars().count() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::Error(format!(
            "argument to 'len' not supported, got {}",
            other.kind()
        )),
    }
}
