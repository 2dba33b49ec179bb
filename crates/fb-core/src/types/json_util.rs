//! Helpers for reading loosely typed JSON payloads given on the command line.
//!
//! Users write numbers either as JSON numbers (`1000`) or strings (`"1000"`);
//! both are accepted. Every failure is an [`FbError::Sdk`] so it is reported
//! in the envelope like any other operation failure.

use serde_json::{Map, Value};

use crate::error::{FbError, FbResult};

/// Parse a JSON argument.
pub fn parse_json(text: &str) -> FbResult<Value> {
    serde_json::from_str(text).map_err(|e| FbError::Sdk(format!("invalid JSON: {e}")))
}

/// View a value as an object.
pub fn as_object<'a>(v: &'a Value, what: &str) -> FbResult<&'a Map<String, Value>> {
    v.as_object().ok_or_else(|| FbError::Sdk(format!("{what} must be a JSON object")))
}

/// View a value as an array.
pub fn as_array<'a>(v: &'a Value, what: &str) -> FbResult<&'a Vec<Value>> {
    v.as_array().ok_or_else(|| FbError::Sdk(format!("{what} must be a JSON array")))
}

/// Fetch a required member.
pub fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> FbResult<&'a Value> {
    obj.get(key).ok_or_else(|| FbError::Sdk(format!("missing key '{key}'")))
}

/// Render a scalar as text: strings as-is, numbers and booleans via JSON.
pub fn text_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Required member rendered as text.
pub fn str_field(obj: &Map<String, Value>, key: &str) -> FbResult<String> {
    required(obj, key).map(text_of)
}

/// Optional member rendered as text, `default` when absent.
pub fn str_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    obj.get(key).map_or_else(|| default.to_string(), text_of)
}

/// Parse a JSON value (string or number) as `i64`. Integral floats such
/// as `1000.0` are accepted.
pub fn parse_str_i64(v: &Value) -> Option<i64> {
    if let Some(s) = v.as_str() {
        return s.trim().parse().ok();
    }
    v.as_i64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Required integer member (string or number).
pub fn int_field(obj: &Map<String, Value>, key: &str) -> FbResult<i64> {
    let v = required(obj, key)?;
    parse_str_i64(v).ok_or_else(|| FbError::Sdk(format!("'{key}' must be an integer, got {v}")))
}

/// Optional integer member, `default` when absent.
pub fn int_or(obj: &Map<String, Value>, key: &str, default: i64) -> FbResult<i64> {
    match obj.get(key) {
        None => Ok(default),
        Some(v) => parse_str_i64(v)
            .ok_or_else(|| FbError::Sdk(format!("'{key}' must be an integer, got {v}"))),
    }
}

/// Optional member parsed into `T`, `default` spelling when absent.
pub fn parse_or<T>(obj: &Map<String, Value>, key: &str, default: &str) -> FbResult<T>
where
    T: std::str::FromStr<Err = FbError>,
{
    str_or(obj, key, default).parse()
}
