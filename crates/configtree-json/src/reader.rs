//! Conversion from `serde_json` values into configtree values.

use crate::FORMAT_NAME;
use configtree_core::{ConfigError, Document, Result, Value};

/// Parse JSON text into a [`Document`].
///
/// Blank input is an empty document. Integers that fit in `i64` stay
/// integers; every other number becomes a float.
pub fn parse_document(input: &str) -> Result<Document> {
    if input.trim().is_empty() {
        return Ok(Document::default());
    }
    let json: serde_json::Value =
        serde_json::from_str(input).map_err(|e| ConfigError::parse(FORMAT_NAME, e))?;
    Ok(Document {
        value: to_value(json),
        ..Document::default()
    })
}

fn to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::from(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => n.as_f64().map_or(Value::Null, Value::from),
        },
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => Value::List(items.into_iter().map(to_value).collect()),
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, to_value(value)))
                .collect(),
        ),
    }
}
