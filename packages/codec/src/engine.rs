//! Encoding objects into trees and decoding them back.

use pathtree_core::TreeData;

use crate::error::{CodecError, CodecFailure, FieldError, FieldFailure};
use crate::field::{CodecField, FieldKind, FieldSlot};
use crate::transformer::{DecodeSource, Transformer};
use crate::Codec;

/// Write every selected field of `codec` into `data`, then run its
/// [`Codec::on_encode`] hook.
///
/// Fields are written in the order the class mapper yields them. A failure
/// stops the encode; fields written before it stay written.
pub fn encode<C: Codec + ?Sized>(codec: &mut C, data: &mut TreeData) -> Result<(), CodecError> {
    let type_name = codec.type_name();
    let transformer = codec.transformer();
    let mapper = codec.class_mapper();

    for mut field in mapper.select(codec.fields()) {
        encode_field(transformer.as_ref(), &mut field, data)
            .map_err(|cause| field_error(type_name, field.error(cause)))?;
    }

    codec.on_encode(data).map_err(|e| CodecError {
        type_name,
        cause: CodecFailure::Hook(e),
    })
}

/// Populate every selected field of `codec` from `data`, then run its
/// [`Codec::on_decode`] hook.
///
/// A field with nothing stored under its key keeps its current value; if it
/// has none, decoding fails with [`FieldFailure::MissingKey`].
pub fn decode<C: Codec + ?Sized>(codec: &mut C, data: &TreeData) -> Result<(), CodecError> {
    let type_name = codec.type_name();
    let transformer = codec.transformer();
    let mapper = codec.class_mapper();

    for mut field in mapper.select(codec.fields()) {
        decode_field(transformer.as_ref(), &mut field, data)
            .map_err(|cause| field_error(type_name, field.error(cause)))?;
    }

    codec.on_decode(data).map_err(|e| CodecError {
        type_name,
        cause: CodecFailure::Hook(e),
    })
}

fn field_error(type_name: &'static str, error: FieldError) -> CodecError {
    CodecError {
        type_name,
        cause: CodecFailure::Field(error),
    }
}

fn encode_field(
    transformer: &dyn Transformer,
    field: &mut CodecField<'_>,
    data: &mut TreeData,
) -> Result<(), FieldFailure> {
    if !transformer.supports(field.kind()) {
        return Err(FieldFailure::MissingTransformer);
    }
    let value = transformer.encode(field)?;
    data.set(field.key, value)?;
    Ok(())
}

fn decode_field(
    transformer: &dyn Transformer,
    field: &mut CodecField<'_>,
    data: &TreeData,
) -> Result<(), FieldFailure> {
    if !transformer.supports(field.kind()) {
        return Err(FieldFailure::MissingTransformer);
    }

    let key = field.key;
    let source = match &field.slot {
        FieldSlot::Nested(None) => return Err(FieldFailure::MissingDefault),
        FieldSlot::Nested(Some(codec)) if codec.type_adapter().is_parsable() => {
            data.get_string(key)?.map(DecodeSource::Text)
        }
        FieldSlot::Nested(Some(_)) => data.get_sector(key)?.map(DecodeSource::Section),
        FieldSlot::Value(slot) => match slot.kind() {
            FieldKind::TextList => data.get_string_list(key)?.map(DecodeSource::TextList),
            FieldKind::Map => data.get_sector(key)?.map(DecodeSource::Section),
            _ => data.get_string(key)?.map(DecodeSource::Text),
        },
    };

    match source {
        Some(source) => transformer.decode(field, source),
        None if field.has_value() => {
            log::debug!(
                "No value under '{}' for field {}, keeping its default",
                key,
                field.name
            );
            Ok(())
        }
        None => Err(FieldFailure::MissingKey),
    }
}
