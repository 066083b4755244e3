//! pathtree: path-addressed configuration data.
//!
//! The crate is layered:
//! - [`data`]: `TreeData` over JSON or YAML, addressed by dotted paths
//! - [`codec`]: field-level mapping between Rust structs and `TreeData`
//! - [`file_store`]: data files with bundled defaults
//!
//! The most used names of each layer are re-exported at the root.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pathtree::{Codec, CodecField, StaticResources, StorageProvider, TreeCodecExt};
//!
//! #[derive(Default)]
//! struct Altar {
//!     name: Option<String>,
//!     capacity: i32,
//! }
//!
//! impl Codec for Altar {
//!     fn fields(&mut self) -> Vec<CodecField<'_>> {
//!         vec![
//!             CodecField::value("name", "name", &mut self.name),
//!             CodecField::value("capacity", "capacity", &mut self.capacity),
//!         ]
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let blocks = "power-blocks:\n  altar:\n    name: Altar\n    capacity: 500\n";
//! let resources = StaticResources::new().with("defaults/blocks.yml", blocks);
//! let provider = StorageProvider::new(dir.path(), Arc::new(resources));
//!
//! let store = provider.provide_yaml("defaults", "blocks.yml", true).unwrap();
//! let altar = store
//!     .data()
//!     .unwrap()
//!     .get_sector("power-blocks.altar")
//!     .unwrap()
//!     .unwrap();
//! let altar: Altar = altar.decode_as().unwrap();
//! assert_eq!(altar.name.as_deref(), Some("Altar"));
//! assert_eq!(altar.capacity, 500);
//! ```

pub use pathtree_codec as codec;
pub use pathtree_core as data;
pub use pathtree_file_store as file_store;

pub use pathtree_codec::{Codec, CodecError, CodecField, TreeCodecExt};
pub use pathtree_core::{Error, Format, Path, PathError, Source, TreeData, TypeAdapter, Value};
pub use pathtree_file_store::{
    DirectoryResources, FileStore, ResourceProvider, StaticResources, StorageProvider, StoreError,
};
