use std::collections::BTreeSet;

use serde_yaml::Mapping;

use super::Backend;
use crate::{Error, Format, Value};

pub use serde_yaml::Value as YamlValue;

/// Text form of a scalar mapping key. YAML allows `1: x` or `true: y`; those
/// keys are addressed by their text like any other.
fn key_text(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Tagged(tagged) => key_text(&tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

fn find_key(map: &Mapping, key: &str) -> Option<YamlValue> {
    if map.contains_key(key) {
        return Some(YamlValue::String(key.to_string()));
    }
    map.keys()
        .find(|candidate| key_text(candidate).as_deref() == Some(key))
        .cloned()
}

/// Turn `node` into a mapping if it is not one, and return the mapping key
/// under which `key` is (or would be) stored.
fn prepare_key(node: &mut YamlValue, key: &str) -> YamlValue {
    if !node.is_mapping() {
        *node = YamlValue::Mapping(Mapping::new());
    }
    node.as_mapping()
        .and_then(|map| find_key(map, key))
        .unwrap_or_else(|| YamlValue::String(key.to_string()))
}

impl Backend for YamlValue {
    const FORMAT: Format = Format::Yaml;
    const LENIENT: bool = true;

    fn empty_section() -> Self {
        YamlValue::Mapping(Mapping::new())
    }

    fn is_section(&self) -> bool {
        self.is_mapping()
    }

    fn is_null(&self) -> bool {
        YamlValue::is_null(self)
    }

    fn child(&self, key: &str) -> Option<&Self> {
        let map = self.as_mapping()?;
        map.get(key).or_else(|| map.get(find_key(map, key)?))
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Self> {
        let map = self.as_mapping_mut()?;
        let map_key = find_key(map, key)?;
        map.get_mut(map_key)
    }

    fn child_section_mut(&mut self, key: &str) -> &mut Self {
        let map_key = prepare_key(self, key);
        // Indexing a mapping inserts a null child for a missing key.
        let child = &mut self[map_key];
        if !child.is_mapping() {
            *child = Self::empty_section();
        }
        child
    }

    fn insert_child(&mut self, key: &str, value: Self) {
        let map_key = prepare_key(self, key);
        if let YamlValue::Mapping(map) = self {
            map.insert(map_key, value);
        }
    }

    fn remove_child(&mut self, key: &str) -> Option<Self> {
        let map = self.as_mapping_mut()?;
        let map_key = find_key(map, key)?;
        map.remove(map_key)
    }

    fn child_keys(&self) -> Option<BTreeSet<String>> {
        Some(self.as_mapping()?.keys().filter_map(key_text).collect())
    }

    fn to_value(&self) -> Value {
        yaml_to_value(self)
    }

    fn from_value(value: Value) -> Self {
        value_to_yaml(value)
    }

    fn parse(text: &str) -> Result<Self, Error> {
        let parsed: YamlValue = serde_yaml::from_str(text).map_err(|e| Error::Parse {
            format: Format::Yaml,
            message: e.to_string(),
        })?;

        match parsed {
            // An empty document is an empty configuration.
            YamlValue::Null => Ok(Self::empty_section()),
            YamlValue::Mapping(_) => Ok(parsed),
            other => Err(Error::Parse {
                format: Format::Yaml,
                message: format!(
                    "document root must be a mapping, found {}",
                    yaml_to_value(&other).kind_name()
                ),
            }),
        }
    }

    fn render(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).map_err(|e| Error::Render {
            format: Format::Yaml,
            message: e.to_string(),
        })
    }
}

/// Convert our Value to serde_yaml::Value.
pub fn value_to_yaml(value: Value) -> YamlValue {
    match value {
        Value::Null => YamlValue::Null,
        Value::Bool(b) => YamlValue::Bool(b),
        Value::Integer(i) => YamlValue::Number(i.into()),
        Value::Float(f) => YamlValue::Number(f.into()),
        Value::String(s) => YamlValue::String(s),
        Value::Array(arr) => YamlValue::Sequence(arr.into_iter().map(value_to_yaml).collect()),
        Value::Map(map) => YamlValue::Mapping(
            map.into_iter()
                .map(|(k, v)| (YamlValue::String(k), value_to_yaml(v)))
                .collect(),
        ),
    }
}

/// Convert serde_yaml::Value to our Value.
///
/// Tags are dropped; mapping entries whose key is not a scalar are skipped.
pub fn yaml_to_value(yaml: &YamlValue) -> Value {
    match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_value).collect()),
        YamlValue::Mapping(map) => Value::Map(
            map.iter()
                .filter_map(|(k, v)| Some((key_text(k)?, yaml_to_value(v))))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_value(&tagged.value),
    }
}
