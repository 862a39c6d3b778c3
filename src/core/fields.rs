// Field lookup tolerant of artifact-quoted keys (`"'title'"` next to `"title"`).
use serde_json::{Map, Value};

pub fn artifact_key(key: &str) -> String {
    format!("'{key}'")
}

/// Plain key first, then the artifact-quoted variant. A `null` under the
/// plain key falls through.
pub fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match object.get(key) {
        Some(value) if !value.is_null() => Some(value),
        _ => object.get(&artifact_key(key)),
    }
}

/// Numbers and booleans are carried through as their JSON text (`2024` →
/// `"2024"`). Missing, `null`, arrays and objects resolve to `default`.
pub fn text_field(object: &Map<String, Value>, key: &str, default: &str) -> String {
    match field(object, key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        None | Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) => {
            default.to_string()
        }
    }
}

/// Booleans, `"true"`/`"false"` strings and numbers equal to 1 (`1` or
/// `1.0`); everything else is false.
pub fn flag_field(object: &Map<String, Value>, key: &str) -> bool {
    match field(object, key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(number)) => number.as_f64() == Some(1.0),
        _ => false,
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
