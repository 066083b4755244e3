//! Native node types that can back a `TreeData`.
//!
//! A backend only has to know how to look at one node: whether it is a
//! section, how to reach and replace its children, and how to convert to and
//! from [`Value`]. Path walking lives in [`crate::resolve`]; typed coercion
//! lives in [`crate::coerce`].

use std::collections::BTreeSet;
use std::fmt;

use crate::{Error, Format, Value};

mod json;
mod yaml;

pub use json::{json_to_value, value_to_json, JsonValue};
pub use yaml::{value_to_yaml, yaml_to_value, YamlValue};

/// Operations a native tree node must provide.
pub trait Backend: Clone + fmt::Debug + PartialEq + 'static {
    /// The format this backend reads and writes.
    const FORMAT: Format;

    /// Whether typed reads follow the format's lenient coercion rules.
    ///
    /// A lenient backend reports unparsable scalars as "no value" and narrows
    /// numbers by truncation; a strict backend raises a coercion error.
    const LENIENT: bool;

    /// A new, empty section.
    fn empty_section() -> Self;

    /// Check if this node holds named children.
    fn is_section(&self) -> bool;

    /// Check if this node is an explicit null.
    fn is_null(&self) -> bool;

    /// The child under `key`, if this node is a section that has one.
    fn child(&self, key: &str) -> Option<&Self>;

    /// Mutable access to the child under `key`, if this node is a section
    /// that has one.
    fn child_mut(&mut self, key: &str) -> Option<&mut Self>;

    /// The child section under `key`, created (or replacing a non-section
    /// child) when needed. Turns this node into a section first if it is not
    /// one.
    fn child_section_mut(&mut self, key: &str) -> &mut Self;

    /// Attach `value` under `key`, overwriting any previous child. Turns this
    /// node into a section first if it is not one.
    fn insert_child(&mut self, key: &str, value: Self);

    /// Detach the child under `key`.
    fn remove_child(&mut self, key: &str) -> Option<Self>;

    /// Keys of the immediate children, or `None` if this node is not a section.
    fn child_keys(&self) -> Option<BTreeSet<String>>;

    /// Convert this node (and everything below it) to a `Value`.
    fn to_value(&self) -> Value;

    /// Build a node from a `Value`.
    fn from_value(value: Value) -> Self;

    /// Parse a document whose root must be a section.
    fn parse(text: &str) -> Result<Self, Error>;

    /// Serialize this node as human-readable text.
    fn render(&self) -> Result<String, Error>;
}
