//! Lenient decoding for backend payloads.
//!
//! The ranking backend serializes numbers from dataframes and may hand back
//! strings, nulls or nothing at all. Numeric fields follow the browser's
//! `Number(x) || 0`, including `0x`/`0o`/`0b` integer strings, with one
//! exception: non-finite results such as `"Infinity"` become 0.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an arbitrary JSON value into a finite number, defaulting to 0.
pub fn number_from_value(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric_str(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn parse_numeric_str(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(n) = parse_radix_literal(trimmed) {
        return n;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// Unsigned `0x1F`, `0o17`, `0b101` literals. `Some(0.0)` when the prefix is
/// there but the digits are not.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some(u128::from_str_radix(&s[2..], radix).map_or(0.0, |n| n as f64))
}

/// Text label of a JSON value. Falsy values (`""`, `0`, `false`, `null`) and
/// containers yield `None`.
pub fn label_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_f64().filter(|n| *n != 0.0).map(|n| n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

/// Positive whole number, 0 when absent or not representable.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = number_from_value(&value);
    if n >= 1.0 { Ok(n as u32) } else { Ok(0) }
}

pub fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(label_from_value(&value))
}

/// A list that tolerates a non-array value (treated as empty) and
/// non-object elements (decoded as a default row).
pub fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

/// An optional nested object; anything that does not decode is dropped.
pub fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}
