//! Leaf conversions for values pulled out of a declared property tree.
//!
//! Containers declared as maps hand their numeric and boolean leaves back as
//! strings, so every conversion here accepts both the native JSON type and
//! its string encoding.
use std::convert::TryFrom;

use serde_json::Value;

use crate::errors::Error;

pub fn coerce_int(field: &str, value: &Value) -> Result<i64, Error> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| Error::coercion(field, value)),
        Value::String(raw) => raw.trim().parse::<i64>().map_err(|_| Error::coercion(field, value)),
        _ => Err(Error::coercion(field, value)),
    }
}

/// Like `coerce_int`, restricted to values that fit a `u32`
pub fn coerce_u32(field: &str, value: &Value) -> Result<u32, Error> {
    let int = coerce_int(field, value)?;
    u32::try_from(int).map_err(|_| Error::coercion(field, value))
}

pub fn coerce_bool(field: &str, value: &Value) -> Result<bool, Error> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(raw) => match raw.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Error::coercion(field, value)),
        },
        _ => Err(Error::coercion(field, value)),
    }
}

pub fn coerce_string(field: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::coercion(field, value)),
    }
}

/// Ordered list of strings; element order is kept exactly as declared
pub fn coerce_string_list(field: &str, value: &Value) -> Result<Vec<String>, Error> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| coerce_string(&format!("{}.{}", field, i), item))
            .collect(),
        _ => Err(Error::coercion(field, value)),
    }
}
