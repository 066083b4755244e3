//! Conversions between field values and tree values.

use std::collections::BTreeMap;
use std::str::FromStr;

use pathtree_core::{coerce, Source, TreeData, Value};

use crate::error::FieldFailure;
use crate::field::{CodecField, FieldKind, FieldSlot, FieldValue};

/// What the engine read from the tree for a field, before conversion.
#[derive(Clone, Debug)]
pub enum DecodeSource {
    Text(String),
    TextList(Vec<String>),
    /// A section, sharing storage with the tree it was read from.
    Section(TreeData),
}

impl DecodeSource {
    fn describe(&self) -> &'static str {
        match self {
            DecodeSource::Text(_) => "text",
            DecodeSource::TextList(_) => "list of text",
            DecodeSource::Section(_) => "section",
        }
    }
}

/// Converts field values to tree values and back.
pub trait Transformer {
    /// Check if this transformer can handle fields of `kind`.
    fn supports(&self, kind: FieldKind) -> bool;

    /// The value to store for `field`. `Value::Null` removes the key.
    fn encode(&self, field: &mut CodecField<'_>) -> Result<Value, FieldFailure>;

    /// Convert `source` and assign it to `field`.
    fn decode(
        &self,
        field: &mut CodecField<'_>,
        source: DecodeSource,
    ) -> Result<(), FieldFailure>;
}

/// Transformer covering every [`FieldKind`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonTransformer;

impl Transformer for CommonTransformer {
    fn supports(&self, _kind: FieldKind) -> bool {
        true
    }

    fn encode(&self, field: &mut CodecField<'_>) -> Result<Value, FieldFailure> {
        match &mut field.slot {
            FieldSlot::Value(slot) => Ok(slot.get().map(Value::from).unwrap_or(Value::Null)),
            FieldSlot::Nested(None) => Ok(Value::Null),
            FieldSlot::Nested(Some(codec)) => {
                let adapter = codec.type_adapter();
                let mut data = adapter.adapt(None)?;
                crate::encode(&mut **codec, &mut data).map_err(Box::new)?;
                if adapter.is_parsable() {
                    Ok(Value::String(data.render()?))
                } else {
                    Ok(data.to_value())
                }
            }
        }
    }

    fn decode(
        &self,
        field: &mut CodecField<'_>,
        source: DecodeSource,
    ) -> Result<(), FieldFailure> {
        let key = field.key;
        match &mut field.slot {
            FieldSlot::Value(slot) => {
                let value = decode_value(slot.kind(), key, source)?;
                slot.put(value).map_err(|value| {
                    FieldFailure::Transform(format!(
                        "transformer produced a {} value for a {} field",
                        value.kind(),
                        slot.kind()
                    ))
                })
            }
            FieldSlot::Nested(None) => Err(FieldFailure::MissingDefault),
            FieldSlot::Nested(Some(codec)) => {
                let source = match source {
                    DecodeSource::Text(text) => Source::Text(text),
                    DecodeSource::Section(data) => Source::Tree(data),
                    other => return Err(unexpected(FieldKind::Nested, &other)),
                };
                let data = codec.type_adapter().adapt(Some(source))?;
                crate::decode(&mut **codec, &data).map_err(Box::new)?;
                Ok(())
            }
        }
    }
}

fn unexpected(kind: FieldKind, source: &DecodeSource) -> FieldFailure {
    FieldFailure::Transform(format!(
        "required {} value but got {}",
        kind,
        source.describe()
    ))
}

fn not_a(kind: FieldKind, text: &str) -> FieldFailure {
    FieldFailure::Transform(format!("required {} value but got {:?}", kind, text))
}

fn parse<T: FromStr>(kind: FieldKind, text: &str) -> Result<T, FieldFailure> {
    text.trim().parse().map_err(|_| not_a(kind, text))
}

/// Like [`parse`], but text naming a finite number too large for `f32`
/// fails instead of becoming infinite.
fn parse_float(text: &str) -> Result<f32, FieldFailure> {
    let value: f32 = parse(FieldKind::Float, text)?;
    if !value.is_finite() && text.trim().parse::<f64>().is_ok_and(f64::is_finite) {
        return Err(FieldFailure::Transform(format!(
            "{:?} is out of range for a {} value",
            text,
            FieldKind::Float
        )));
    }
    Ok(value)
}

fn parse_bool(text: &str) -> Result<bool, FieldFailure> {
    match text.trim() {
        t if t.eq_ignore_ascii_case("true") => Ok(true),
        t if t.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(not_a(FieldKind::Bool, text)),
    }
}

fn decode_value(
    kind: FieldKind,
    key: &str,
    source: DecodeSource,
) -> Result<FieldValue, FieldFailure> {
    let value = match (kind, source) {
        (FieldKind::Byte, DecodeSource::Text(text)) => FieldValue::Byte(parse(kind, &text)?),
        (FieldKind::Short, DecodeSource::Text(text)) => FieldValue::Short(parse(kind, &text)?),
        (FieldKind::Int, DecodeSource::Text(text)) => FieldValue::Int(parse(kind, &text)?),
        (FieldKind::Long, DecodeSource::Text(text)) => FieldValue::Long(parse(kind, &text)?),
        (FieldKind::Float, DecodeSource::Text(text)) => FieldValue::Float(parse_float(&text)?),
        (FieldKind::Double, DecodeSource::Text(text)) => FieldValue::Double(parse(kind, &text)?),
        (FieldKind::Bool, DecodeSource::Text(text)) => FieldValue::Bool(parse_bool(&text)?),
        (FieldKind::Text, DecodeSource::Text(text)) => FieldValue::Text(text),
        (FieldKind::TextList, DecodeSource::TextList(list)) => FieldValue::TextList(list),
        (FieldKind::Map, DecodeSource::Section(data)) => FieldValue::Map(decode_map(key, &data)?),
        (kind, source) => return Err(unexpected(kind, &source)),
    };
    Ok(value)
}

/// Read a section whose children are all scalars into a text map.
fn decode_map(key: &str, data: &TreeData) -> Result<BTreeMap<String, String>, FieldFailure> {
    let Value::Map(entries) = data.to_value() else {
        return Ok(Default::default());
    };

    let mut map = BTreeMap::new();
    for (name, value) in entries {
        let path = format!("{}.{}", key, name);
        if let Some(text) = coerce::text(value, &path)? {
            map.insert(name, text);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathtree_core::Format;

    #[test]
    fn scalar_text_is_parsed_per_kind() {
        assert_eq!(
            decode_value(FieldKind::Int, "k", DecodeSource::Text("7".into())).unwrap(),
            FieldValue::Int(7)
        );
        assert_eq!(
            decode_value(FieldKind::Bool, "k", DecodeSource::Text("TRUE".into())).unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            decode_value(FieldKind::Float, "k", DecodeSource::Text(" 0.5 ".into())).unwrap(),
            FieldValue::Float(0.5)
        );
    }

    #[test]
    fn unparsable_text_is_transform_failure() {
        let failure = decode_value(FieldKind::Byte, "k", DecodeSource::Text("300".into()))
            .unwrap_err();
        match failure {
            FieldFailure::Transform(message) => {
                assert_eq!(message, "required byte value but got \"300\"")
            }
            other => panic!("expected transform failure, got {:?}", other),
        }
        assert!(decode_value(FieldKind::Bool, "k", DecodeSource::Text("yes".into())).is_err());
    }

    #[test]
    fn float_overflow_is_transform_failure() {
        let failure = decode_value(FieldKind::Float, "k", DecodeSource::Text("1e40".into()))
            .unwrap_err();
        assert!(matches!(failure, FieldFailure::Transform(_)));
        assert_eq!(
            decode_value(FieldKind::Double, "k", DecodeSource::Text("1e40".into())).unwrap(),
            FieldValue::Double(1e40)
        );
        assert_eq!(
            decode_value(FieldKind::Float, "k", DecodeSource::Text("inf".into())).unwrap(),
            FieldValue::Float(f32::INFINITY)
        );
    }

    #[test]
    fn mismatched_source_is_rejected() {
        assert!(matches!(
            decode_value(FieldKind::Int, "k", DecodeSource::TextList(vec![])),
            Err(FieldFailure::Transform(_))
        ));
    }

    #[test]
    fn map_reads_scalar_children_as_text() {
        let mut data = TreeData::empty(Format::Yaml);
        data.set("a", 1).unwrap();
        data.set("b", "two").unwrap();
        let map = decode_map("rewards", &data).unwrap();
        assert_eq!(map.get("a").map(String::as_str), Some("1"));
        assert_eq!(map.get("b").map(String::as_str), Some("two"));

        data.set("c.d", true).unwrap();
        assert!(matches!(
            decode_map("rewards", &data),
            Err(FieldFailure::Tree(pathtree_core::Error::Coercion { .. }))
        ));
    }

    #[test]
    fn encode_of_unset_slot_is_null() {
        let mut name: Option<String> = None;
        let mut field = CodecField::value("name", "name", &mut name);
        assert_eq!(CommonTransformer.encode(&mut field).unwrap(), Value::Null);
    }
}
