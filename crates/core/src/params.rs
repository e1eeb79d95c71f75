//! Parameter resolution against strategy defaults, and typed extraction.
//!
//! [`resolve_params`] never fails: it merges a caller's partial configuration
//! over a strategy's defaults. Validation happens afterwards, when the
//! strategy assigns each resolved value through its own setters.

use crate::error::CombinationError;
use serde_json::{Map, Value};

/// Merges `config` over `defaults`, key by key.
///
/// The result contains exactly the keys of `defaults`. A key present in
/// `config` replaces the default value; keys only present in `config` are
/// ignored. A missing, `null` or non-object `config` yields the defaults.
/// `defaults` itself is never modified.
pub fn resolve_params(defaults: &Value, config: Option<&Value>) -> Value {
    let Some(defaults) = defaults.as_object() else {
        return Value::Object(Map::new());
    };
    let overrides = config.and_then(Value::as_object);
    let merged = defaults
        .iter()
        .map(|(key, default)| {
            let value = overrides
                .and_then(|o| o.get(key))
                .unwrap_or(default)
                .clone();
            (key.clone(), value)
        })
        .collect();
    Value::Object(merged)
}

/// Human-readable JSON type name, used in type-mismatch errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads `value` as an `f64`, attributing any type error to `name`.
///
/// Accepts both JSON floats and integers.
pub fn expect_f64(name: &str, value: &Value) -> Result<f64, CombinationError> {
    value
        .as_f64()
        .ok_or_else(|| CombinationError::ParamTypeMismatch {
            name: name.to_owned(),
            expected: "number".to_owned(),
            got: json_type_name(value).to_owned(),
        })
}

/// Reads `value` as an `f64`, rejecting integers and every non-number.
pub fn expect_float(name: &str, value: &Value) -> Result<f64, CombinationError> {
    if value.is_f64() {
        return expect_f64(name, value);
    }
    let got = if value.is_number() {
        "integer"
    } else {
        json_type_name(value)
    };
    Err(CombinationError::ParamTypeMismatch {
        name: name.to_owned(),
        expected: "float".to_owned(),
        got: got.to_owned(),
    })
}

/// Extracts `params[name]`, returning `ParamNotFound` if it is missing.
pub fn require<'a>(params: &'a Value, name: &str) -> Result<&'a Value, CombinationError> {
    params
        .get(name)
        .ok_or_else(|| CombinationError::ParamNotFound(name.to_owned()))
}
