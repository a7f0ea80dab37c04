//! Typed extraction of kind-specific field values.

use serde_json::Value;

use crate::error::{ModelError, ModelResult};

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

fn mismatch(field: &str, expected: &str, value: &Value) -> ModelError {
    ModelError::invalid(field, format!("expected {expected}, got {}", type_name(value)))
}

pub(crate) fn string(field: &str, value: Value) -> ModelResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(mismatch(field, "a string", &other)),
    }
}

pub(crate) fn count(field: &str, value: Value) -> ModelResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| mismatch(field, "a non-negative integer", &value))
}

pub(crate) fn float(field: &str, value: Value) -> ModelResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| mismatch(field, "a number", &value))
}

pub(crate) fn string_list(field: &str, value: Value) -> ModelResult<Vec<String>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(mismatch(field, "a list of strings", &other)),
            })
            .collect(),
        other => Err(mismatch(field, "a list of strings", &other)),
    }
}
