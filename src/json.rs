use crate::errors::Result;
use crate::value::{Object, Value};
use serde_json::Value as Json;

/// Build a fresh value graph from a JSON document. Every nested object and
/// array becomes a new identity, the way a freshly parsed document would.
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        // Always `Some` without serde_json's `arbitrary_precision`.
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::string(s.as_str()),
        Json::Array(items) => Object::array(items.iter().map(from_json)).into(),
        Json::Object(map) => {
            Object::from_entries(map.iter().map(|(k, v)| (k.clone(), from_json(v)))).into()
        }
    }
}

/// Parse JSON text and build its value graph.
pub fn parse_json(json_str: &str) -> Result<Value> {
    let json: Json = serde_json::from_str(json_str)?;
    Ok(from_json(&json))
}
