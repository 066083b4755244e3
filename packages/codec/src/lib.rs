//! Codec layer for pathtree
//!
//! Maps the fields of plain Rust structs to keys of a `TreeData`:
//! - `Codec`: implemented by types that can be encoded and decoded
//! - `CodecField`: one declared field (name, key, typed storage)
//! - `Transformer`: converts field values to tree values and back
//! - `ClassMapper`: selects the fields taking part in an operation
//! - `encode` / `decode` and the `TreeCodecExt` methods on `TreeData`
//!
//! # Example
//!
//! ```rust
//! use pathtree_codec::{Codec, CodecField, TreeCodecExt};
//! use pathtree_core::TypeAdapter;
//!
//! #[derive(Default)]
//! struct Sound {
//!     name: Option<String>,
//!     pitch: f32,
//! }
//!
//! impl Codec for Sound {
//!     fn fields(&mut self) -> Vec<CodecField<'_>> {
//!         vec![
//!             CodecField::value("name", "sound-name", &mut self.name),
//!             CodecField::value("pitch", "pitch", &mut self.pitch),
//!         ]
//!     }
//! }
//!
//! let data = TypeAdapter::ParsableYaml
//!     .parse("sound-name: block.anvil.land\npitch: 0.5\n")
//!     .unwrap();
//! let sound: Sound = data.decode_as().unwrap();
//! assert_eq!(sound.name.as_deref(), Some("block.anvil.land"));
//! assert_eq!(sound.pitch, 0.5);
//! ```

use pathtree_core::{TreeData, TypeAdapter};

mod engine;
mod error;
mod ext;
mod field;
mod mapper;
mod transformer;

pub use engine::{decode, encode};
pub use error::{CodecError, CodecFailure, FieldError, FieldFailure, HookError};
pub use ext::TreeCodecExt;
pub use field::{CodecField, FieldKind, FieldSlot, FieldValue, ValueSlot};
pub use mapper::{ClassMapper, CommonClassMapper};
pub use transformer::{CommonTransformer, DecodeSource, Transformer};

/// A type whose fields can be encoded into and decoded from a `TreeData`.
///
/// Only [`Codec::fields`] is required. The other methods pick the strategies
/// used for this type and hook into the end of each operation.
pub trait Codec {
    /// The fields of `self`, each borrowing its storage.
    fn fields(&mut self) -> Vec<CodecField<'_>>;

    /// Name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// How a tree for this type is built when it is a nested field.
    fn type_adapter(&self) -> TypeAdapter {
        TypeAdapter::Yaml
    }

    fn class_mapper(&self) -> Box<dyn ClassMapper> {
        Box::new(CommonClassMapper)
    }

    fn transformer(&self) -> Box<dyn Transformer> {
        Box::new(CommonTransformer)
    }

    /// Called after all fields were written; may add keys of its own.
    fn on_encode(&self, _data: &mut TreeData) -> Result<(), HookError> {
        Ok(())
    }

    /// Called after all fields were read, with the whole source tree.
    fn on_decode(&mut self, _data: &TreeData) -> Result<(), HookError> {
        Ok(())
    }
}
