//! Field descriptors handed out by a [`Codec`](crate::Codec).

use std::collections::BTreeMap;
use std::fmt;

use pathtree_core::Value;

use crate::error::{FieldError, FieldFailure};
use crate::Codec;

/// The closed set of field types the codec engine can dispatch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Text,
    TextList,
    Map,
    /// Any codec-bearing type, regardless of its concrete type.
    Nested,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Byte => "byte",
            FieldKind::Short => "short",
            FieldKind::Int => "int",
            FieldKind::Long => "long",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Bool => "boolean",
            FieldKind::Text => "string",
            FieldKind::TextList => "list of string",
            FieldKind::Map => "map of string",
            FieldKind::Nested => "nested codec",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value moving in or out of a [`ValueSlot`].
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Text(String),
    TextList(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Byte(_) => FieldKind::Byte,
            FieldValue::Short(_) => FieldKind::Short,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Long(_) => FieldKind::Long,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Double(_) => FieldKind::Double,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::TextList(_) => FieldKind::TextList,
            FieldValue::Map(_) => FieldKind::Map,
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Byte(v) => Value::from(v),
            FieldValue::Short(v) => Value::from(v),
            FieldValue::Int(v) => Value::from(v),
            FieldValue::Long(v) => Value::from(v),
            // Through the shortest decimal text, so 1.1f32 is stored as 1.1.
            FieldValue::Float(v) => Value::Float(v.to_string().parse().unwrap_or(f64::from(v))),
            FieldValue::Double(v) => Value::from(v),
            FieldValue::Bool(v) => Value::from(v),
            FieldValue::Text(v) => Value::from(v),
            FieldValue::TextList(v) => Value::from(v),
            FieldValue::Map(v) => Value::from(v),
        }
    }
}

/// Typed storage behind a non-nested field.
///
/// Implemented for every supported field type `T` and for `Option<T>`; `None`
/// means the field has no default.
pub trait ValueSlot {
    fn kind(&self) -> FieldKind;

    /// The current value, or `None` if the field is unset.
    fn get(&self) -> Option<FieldValue>;

    /// Check if the field currently holds a value.
    fn is_present(&self) -> bool;

    /// Store `value`, handing it back if it is of another kind.
    fn put(&mut self, value: FieldValue) -> Result<(), FieldValue>;
}

macro_rules! value_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueSlot for $ty {
                fn kind(&self) -> FieldKind {
                    FieldKind::$variant
                }

                fn get(&self) -> Option<FieldValue> {
                    Some(FieldValue::$variant(self.clone()))
                }

                fn is_present(&self) -> bool {
                    true
                }

                fn put(&mut self, value: FieldValue) -> Result<(), FieldValue> {
                    match value {
                        FieldValue::$variant(value) => {
                            *self = value;
                            Ok(())
                        }
                        other => Err(other),
                    }
                }
            }

            impl ValueSlot for Option<$ty> {
                fn kind(&self) -> FieldKind {
                    FieldKind::$variant
                }

                fn get(&self) -> Option<FieldValue> {
                    self.clone().map(FieldValue::$variant)
                }

                fn is_present(&self) -> bool {
                    self.is_some()
                }

                fn put(&mut self, value: FieldValue) -> Result<(), FieldValue> {
                    match value {
                        FieldValue::$variant(value) => {
                            *self = Some(value);
                            Ok(())
                        }
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

value_slot! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    String => Text,
    Vec<String> => TextList,
    BTreeMap<String, String> => Map,
}

/// Mutable access to the storage of one field.
pub enum FieldSlot<'a> {
    Value(&'a mut dyn ValueSlot),
    /// A nested codec; `None` when the field has no default instance.
    Nested(Option<&'a mut dyn Codec>),
}

impl fmt::Debug for FieldSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSlot::Value(slot) => f.debug_tuple("Value").field(&slot.get()).finish(),
            FieldSlot::Nested(codec) => f
                .debug_tuple("Nested")
                .field(&codec.as_ref().map(|codec| codec.type_name()))
                .finish(),
        }
    }
}

/// Descriptor of one declared field: its name, the tree key it maps to, and
/// its storage.
///
/// Built fresh by [`Codec::fields`] for each encode or decode.
#[derive(Debug)]
pub struct CodecField<'a> {
    pub name: &'static str,
    pub key: &'static str,
    /// Transient fields are skipped by the common class mapper.
    pub transient: bool,
    pub slot: FieldSlot<'a>,
}

impl<'a> CodecField<'a> {
    pub fn new(name: &'static str, key: &'static str, slot: FieldSlot<'a>) -> Self {
        CodecField {
            name,
            key,
            transient: false,
            slot,
        }
    }

    /// A scalar, list or map field.
    pub fn value(name: &'static str, key: &'static str, slot: &'a mut dyn ValueSlot) -> Self {
        Self::new(name, key, FieldSlot::Value(slot))
    }

    /// A nested codec field with a default instance.
    pub fn nested(name: &'static str, key: &'static str, codec: &'a mut dyn Codec) -> Self {
        Self::new(name, key, FieldSlot::Nested(Some(codec)))
    }

    /// A nested codec field that may have no default instance.
    pub fn optional_nested<C: Codec>(
        name: &'static str,
        key: &'static str,
        codec: &'a mut Option<C>,
    ) -> Self {
        let codec = codec.as_mut().map(|codec| codec as &mut dyn Codec);
        Self::new(name, key, FieldSlot::Nested(codec))
    }

    /// Mark this field as excluded from codec operations.
    #[must_use]
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn kind(&self) -> FieldKind {
        match &self.slot {
            FieldSlot::Value(slot) => slot.kind(),
            FieldSlot::Nested(_) => FieldKind::Nested,
        }
    }

    /// Check if the field currently holds a value (its default, before decode).
    pub fn has_value(&self) -> bool {
        match &self.slot {
            FieldSlot::Value(slot) => slot.is_present(),
            FieldSlot::Nested(codec) => codec.is_some(),
        }
    }

    /// Wrap `cause` with this field's name, key and kind.
    pub fn error(&self, cause: FieldFailure) -> FieldError {
        FieldError {
            field: self.name,
            key: self.key,
            kind: self.kind(),
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_report_kind_and_presence() {
        let mut count = 3i32;
        let mut name: Option<String> = None;
        let count_field = CodecField::value("count", "count", &mut count);
        assert_eq!(count_field.kind(), FieldKind::Int);
        assert!(count_field.has_value());

        let name_field = CodecField::value("name", "name", &mut name);
        assert_eq!(name_field.kind(), FieldKind::Text);
        assert!(!name_field.has_value());
    }

    #[test]
    fn put_rejects_other_kinds() {
        let mut pitch = 1.0f32;
        assert_eq!(pitch.put(FieldValue::Float(0.5)), Ok(()));
        assert_eq!(pitch, 0.5);
        assert_eq!(
            pitch.put(FieldValue::Text("loud".into())),
            Err(FieldValue::Text("loud".into()))
        );

        let mut tags: Option<Vec<String>> = None;
        tags.put(FieldValue::TextList(vec!["a".into()])).unwrap();
        assert_eq!(tags, Some(vec!["a".to_string()]));
    }

    #[test]
    fn float_values_keep_their_decimal_form() {
        assert_eq!(Value::from(FieldValue::Float(1.1)), Value::Float(1.1));
        assert_eq!(Value::from(FieldValue::Byte(-2)), Value::Integer(-2));
    }

    #[test]
    fn transient_marks_field() {
        let mut cache = 0i64;
        let field = CodecField::value("cache", "cache", &mut cache).transient();
        assert!(field.transient);
    }
}
