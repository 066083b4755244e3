//! Codec operations as methods on `TreeData`.

use pathtree_core::TreeData;

use crate::{Codec, CodecError};

/// Extension trait for encoding and decoding codec-bearing objects.
///
/// Implemented for `TreeData`.
///
/// # Example
///
/// ```rust,ignore
/// use pathtree_codec::TreeCodecExt;
///
/// let mut sound = Sound::default();
/// data.decode(&mut sound)?;
/// sound.pitch = 0.5;
/// data.encode(&mut sound)?;
/// ```
pub trait TreeCodecExt {
    /// Write `codec`'s fields into this tree.
    fn encode<C: Codec + ?Sized>(&mut self, codec: &mut C) -> Result<(), CodecError>;

    /// Populate `codec`'s fields from this tree.
    fn decode<C: Codec + ?Sized>(&self, codec: &mut C) -> Result<(), CodecError>;

    /// Decode into a fresh `C::default()`.
    fn decode_as<C: Codec + Default>(&self) -> Result<C, CodecError> {
        let mut codec = C::default();
        self.decode(&mut codec)?;
        Ok(codec)
    }
}

impl TreeCodecExt for TreeData {
    fn encode<C: Codec + ?Sized>(&mut self, codec: &mut C) -> Result<(), CodecError> {
        crate::encode(codec, self)
    }

    fn decode<C: Codec + ?Sized>(&self, codec: &mut C) -> Result<(), CodecError> {
        crate::decode(codec, self)
    }
}
