//! Marshaling rules between the generic `Value` and native C++ types.
//!
//! One rule pair per [`TypeTag`]: an extraction expression that narrows
//! `args[i]` into the native parameter, and a construction that wraps a
//! native result back into a `Value`.

use bindspec_core::{Aggregate, TypeTag};

/// Expression reading argument `position` as the native type of `tag`.
///
/// Returns `None` for `void`, which has no value to extract.
pub fn extract(tag: &TypeTag, position: usize) -> Option<String> {
    let arg = format!("args[{}]", position);
    let expr = match tag {
        TypeTag::Void => return None,
        TypeTag::Int => format!("static_cast<int>({}.as_int())", arg),
        TypeTag::UInt => format!("static_cast<unsigned int>({}.as_int())", arg),
        TypeTag::Float => format!("static_cast<float>({}.as_number())", arg),
        TypeTag::Double => format!("{}.as_number()", arg),
        TypeTag::Bool => format!("{}.as_bool()", arg),
        TypeTag::String => format!("{}.as_string().c_str()", arg),
        TypeTag::Aggregate(a) => format!("Value::{}({})", decoder(*a), arg),
        TypeTag::Pointer { .. } => format!(
            "reinterpret_cast<{}>(static_cast<std::intptr_t>({}.as_int()))",
            tag, arg
        ),
    };
    Some(expr)
}

/// Statements returning the native result `expr` as a `Value`.
///
/// `void` evaluates the call for effect and returns the nil sentinel.
/// Pointers are returned as integer handles, never as raw references.
pub fn construct(tag: &TypeTag, expr: &str) -> Vec<String> {
    let wrapped = match tag {
        TypeTag::Void => {
            return vec![format!("{};", expr), "return Value::nil();".to_string()];
        }
        TypeTag::Int | TypeTag::UInt => format!("Value::from_int({})", expr),
        TypeTag::Float | TypeTag::Double => format!("Value::from_number({})", expr),
        TypeTag::Bool => format!("Value::from_bool({})", expr),
        TypeTag::String => format!("Value::from_string({})", expr),
        TypeTag::Aggregate(a) => format!("Value::{}({})", encoder(*a), expr),
        TypeTag::Pointer { .. } => format!(
            "Value::from_int(static_cast<long long>(reinterpret_cast<std::intptr_t>({})))",
            expr
        ),
    };
    vec![format!("return {};", wrapped)]
}

fn decoder(a: Aggregate) -> String {
    format!("to_{}", a.name().to_ascii_lowercase())
}

fn encoder(a: Aggregate) -> String {
    format!("from_{}", a.name().to_ascii_lowercase())
}
