//! Field-level normalization shared by every source kind.

use serde_json::Value;
use serde_yaml::Value as YamlValue;

/// A mapping-document field counts as missing when it is absent or falsy.
pub fn is_falsy_yaml(value: &YamlValue) -> bool {
    match value {
        YamlValue::Null => true,
        YamlValue::Bool(b) => !b,
        YamlValue::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        YamlValue::String(s) => s.is_empty(),
        YamlValue::Sequence(seq) => seq.is_empty(),
        YamlValue::Mapping(map) => map.is_empty(),
        YamlValue::Tagged(tagged) => is_falsy_yaml(&tagged.value),
    }
}

/// Optional JSON fields are emitted only when truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// `Some(value.clone())` when the field is present and truthy.
pub fn truthy_field(object: &serde_json::Map<String, Value>, key: &str) -> Option<Value> {
    object.get(key).filter(|v| is_truthy(v)).cloned()
}

/// Scalar text of a mapping-document field: strings lose trailing
/// whitespace (block scalars end in a newline), other values are rendered.
pub fn yaml_text(value: &YamlValue) -> String {
    match value {
        YamlValue::String(s) => s.trim_end().to_string(),
        YamlValue::Bool(true) => "True".to_string(),
        YamlValue::Bool(false) => "False".to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Null => String::new(),
        YamlValue::Tagged(tagged) => yaml_text(&tagged.value),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Text of a JSON field, `""` when absent or null.
pub fn json_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Split a comma-separated list, trimming elements and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
