//! Lenient deserializers for schema elements.
//!
//! Only the top level of a schema is structurally validated. Element fields
//! (page ids, component lists, field flags, ...) are accepted in whatever
//! primitive shape the producer emitted and coerced to text, so a malformed
//! element shows up as a rendering artifact instead of rejecting the schema.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

/// Render any JSON value as display text.
///
/// Strings are taken verbatim, `null` becomes the empty string, everything
/// else uses its compact JSON form.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Interpret a JSON value as a flag. Anything unrecognised is `false`.
pub fn flag_of(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// Interpret a JSON value as an ordered list of strings.
pub fn strings_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(text_of).collect(),
        Value::Null => Vec::new(),
        other => vec![text_of(other)],
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| text_of(&v))
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| flag_of(&v))
}

pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| strings_of(&v))
}

/// Deserialize a sequence of elements, substituting `T::default()` for any
/// element that is not shaped like `T` at all (e.g. a bare number where an
/// object was expected). Order and length are preserved.
pub fn elements<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                debug!(index, error = %e, "Malformed schema element passed through as default");
                T::default()
            })
        })
        .collect())
}
