use std::collections::BTreeSet;

use serde_json::Map;

use super::yaml::{yaml_to_value, YamlValue};
use super::Backend;
use crate::{Error, Format, Value};

pub use serde_json::Value as JsonValue;

fn ensure_object(node: &mut JsonValue) {
    if !node.is_object() {
        *node = JsonValue::Object(Map::new());
    }
}

impl Backend for JsonValue {
    const FORMAT: Format = Format::Json;
    const LENIENT: bool = false;

    fn empty_section() -> Self {
        JsonValue::Object(Map::new())
    }

    fn is_section(&self) -> bool {
        self.is_object()
    }

    fn is_null(&self) -> bool {
        JsonValue::is_null(self)
    }

    fn child(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Self> {
        self.as_object_mut()?.get_mut(key)
    }

    fn child_section_mut(&mut self, key: &str) -> &mut Self {
        ensure_object(self);
        // Indexing an object inserts a null child for a missing key.
        let child = &mut self[key];
        if !child.is_object() {
            *child = Self::empty_section();
        }
        child
    }

    fn insert_child(&mut self, key: &str, value: Self) {
        ensure_object(self);
        self[key] = value;
    }

    fn remove_child(&mut self, key: &str) -> Option<Self> {
        self.as_object_mut()?.remove(key)
    }

    fn child_keys(&self) -> Option<BTreeSet<String>> {
        Some(self.as_object()?.keys().cloned().collect())
    }

    fn to_value(&self) -> Value {
        json_to_value(self.clone())
    }

    fn from_value(value: Value) -> Self {
        value_to_json(value)
    }

    fn parse(text: &str) -> Result<Self, Error> {
        let strict = match serde_json::from_str::<JsonValue>(text) {
            Ok(parsed) if parsed.is_object() => return Ok(parsed),
            Ok(parsed) => {
                return Err(Error::Parse {
                    format: Format::Json,
                    message: format!(
                        "document root must be an object, found {}",
                        json_to_value(parsed).kind_name()
                    ),
                })
            }
            Err(strict) => strict,
        };

        // Lenient pass: the YAML reader accepts unquoted keys and strings,
        // single quotes and trailing commas in flow collections. Anything it
        // does not read as a mapping reports the JSON parser's message.
        match serde_yaml::from_str::<YamlValue>(text) {
            Ok(lenient) if lenient.is_mapping() => {
                log::warn!("Parsed malformed JSON leniently: {}", strict);
                Ok(value_to_json(yaml_to_value(&lenient)))
            }
            _ => Err(Error::Parse {
                format: Format::Json,
                message: strict.to_string(),
            }),
        }
    }

    fn render(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render {
            format: Format::Json,
            message: e.to_string(),
        })
    }
}

/// Convert our Value to serde_json::Value.
///
/// Non-finite floats have no JSON representation and become `null`.
pub fn value_to_json(value: Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Integer(i) => JsonValue::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s),
        Value::Array(arr) => JsonValue::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for numbers outside i64/f64
                Value::String(n.to_string())
            }
        }
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        JsonValue::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn child_section_mut_replaces_scalars() {
        let mut root = json!({"a": 1});
        root.child_section_mut("a").insert_child("b", json!(2));
        assert_eq!(root, json!({"a": {"b": 2}}));
    }

    #[test]
    fn child_section_mut_keeps_existing_sections() {
        let mut root = json!({"a": {"keep": true}});
        root.child_section_mut("a").insert_child("b", json!(2));
        assert_eq!(root, json!({"a": {"keep": true, "b": 2}}));
    }

    #[test]
    fn child_keys_only_for_objects() {
        assert_eq!(
            json!({"x": 1, "y": 2}).child_keys().unwrap(),
            ["x".to_string(), "y".to_string()].into()
        );
        assert!(json!([1, 2]).child_keys().is_none());
    }

    #[test]
    fn strict_parse() {
        let parsed = JsonValue::parse(r#"{"count": 7}"#).unwrap();
        assert_eq!(parsed, json!({"count": 7}));
    }

    #[test]
    fn lenient_parse_accepts_unquoted_and_trailing() {
        let parsed = JsonValue::parse("{name: Altar, tags: [a, b,],}").unwrap();
        assert_eq!(parsed, json!({"name": "Altar", "tags": ["a", "b"]}));
    }

    #[test]
    fn parse_failure_carries_json_message() {
        let err = JsonValue::parse("{\"a\": [}").unwrap_err();
        match err {
            Error::Parse { format, message } => {
                assert_eq!(format, Format::Json);
                assert!(message.contains("line 1"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn lenient_failure_keeps_json_message() {
        let strict = serde_json::from_str::<JsonValue>("not json").unwrap_err();
        match JsonValue::parse("not json") {
            Err(Error::Parse { message, .. }) => assert_eq!(message, strict.to_string()),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(matches!(
            JsonValue::parse("[a, b"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn lenient_parse_accepts_scalar_keys() {
        let parsed = JsonValue::parse("{1: a, true: b}").unwrap();
        assert_eq!(parsed, json!({"1": "a", "true": "b"}));
    }

    #[test]
    fn parse_rejects_non_object_root() {
        assert!(matches!(
            JsonValue::parse("[1, 2, 3]"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn value_conversion_numbers() {
        let value = json_to_value(json!({"integer": 42, "float": 2.75, "negative": -100}));
        match value {
            Value::Map(map) => {
                assert_eq!(map.get("integer"), Some(&Value::Integer(42)));
                assert_eq!(map.get("negative"), Some(&Value::Integer(-100)));
                assert_eq!(map.get("float"), Some(&Value::Float(2.75)));
            }
            _ => panic!("expected map"),
        }
        assert_eq!(value_to_json(Value::Float(f64::NAN)), JsonValue::Null);
    }
}
