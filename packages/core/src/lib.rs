//! Path-addressed tree data over JSON and YAML.
//!
//! This crate is the bottom layer of pathtree:
//! - `Path`: dot-delimited address of a node, e.g. `power-blocks.altar.name`
//! - `Value`: format-agnostic tree value crossing the public API
//! - `TreeData`: a JSON- or YAML-backed tree with typed getters and setters
//! - `TypeAdapter`: the four ways of obtaining a `TreeData` from a source
//!
//! # Example
//!
//! ```rust
//! use pathtree_core::{Format, TreeData};
//!
//! let mut data = TreeData::empty(Format::Yaml);
//! data.set("power-blocks.altar.capacity", 500).unwrap();
//!
//! let altar = data.get_sector("power-blocks.altar").unwrap().unwrap();
//! assert_eq!(altar.get_int("capacity").unwrap(), Some(500));
//! ```

pub mod adapter;
pub mod backend;
pub mod coerce;
mod error;
mod format;
mod path;
pub mod resolve;
mod tree;
mod value;

pub use adapter::{Source, TypeAdapter};
pub use backend::{Backend, JsonValue, YamlValue};
pub use error::Error;
pub use format::Format;
pub use path::{Path, PathError};
pub use tree::{Tree, TreeData};
pub use value::Value;
