//! `TreeData`: the format-agnostic, path-addressed view over a tree.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, JsonValue, YamlValue};
use crate::resolve::{get_node, remove_node, set_node};
use crate::{coerce, Error, Format, Path, Value};

/// A handle onto a section of a tree stored in backend `B`'s native nodes.
///
/// Handles are cheap to clone and share storage: a handle returned by
/// [`Tree::sector`] addresses the same nodes as its parent, so writes through
/// either are visible through both. If the section under a sector is
/// replaced by a scalar, reads through the sector miss and writes recreate
/// the section.
#[derive(Debug)]
pub struct Tree<B: Backend> {
    root: Rc<RefCell<B>>,
    base: Path,
}

impl<B: Backend> Clone for Tree<B> {
    fn clone(&self) -> Self {
        Tree {
            root: Rc::clone(&self.root),
            base: self.base.clone(),
        }
    }
}

impl<B: Backend> Tree<B> {
    /// Wrap a native root node.
    pub fn new(root: B) -> Self {
        Tree {
            root: Rc::new(RefCell::new(root)),
            base: Path::root(),
        }
    }

    /// A tree with an empty root section.
    pub fn empty() -> Self {
        Self::new(B::empty_section())
    }

    /// Where this handle sits inside the shared root.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn absolute(&self, path: &str) -> Result<Path, Error> {
        Ok(self.base.join(&Path::parse(path)?))
    }

    fn with_node<R>(&self, path: &Path, f: impl FnOnce(Option<&B>) -> R) -> R {
        let root = self.root.borrow();
        f(get_node(&*root, path))
    }

    /// The value at `path`, or `None` if nothing (or an explicit null) is stored.
    pub fn get(&self, path: &str) -> Result<Option<Value>, Error> {
        let path = self.absolute(path)?;
        Ok(self.with_node(&path, |node| {
            node.filter(|node| !node.is_null()).map(B::to_value)
        }))
    }

    /// Store `value` at `path`, creating intermediate sections. `Value::Null`
    /// removes the key instead.
    pub fn set(&self, path: &str, value: Value) -> Result<(), Error> {
        let path = self.absolute(path)?;
        let mut root = self.root.borrow_mut();
        if value.is_null() {
            remove_node(&mut *root, &path);
        } else {
            set_node(&mut *root, &path, B::from_value(value));
        }
        Ok(())
    }

    /// Remove the value at `path`, returning it if it existed.
    pub fn remove(&self, path: &str) -> Result<Option<Value>, Error> {
        let path = self.absolute(path)?;
        let mut root = self.root.borrow_mut();
        Ok(remove_node(&mut *root, &path).map(|node| node.to_value()))
    }

    pub fn is_set(&self, path: &str) -> Result<bool, Error> {
        let path = self.absolute(path)?;
        Ok(self.with_node(&path, |node| node.is_some_and(|node| !node.is_null())))
    }

    /// Immediate child keys of the section at `path` (this handle's own section
    /// when `path` is `None` or blank). Empty when `path` is not a section.
    pub fn keys(&self, path: Option<&str>) -> Result<BTreeSet<String>, Error> {
        let path = match path {
            Some(path) if !path.trim().is_empty() => self.absolute(path)?,
            _ => self.base.clone(),
        };
        Ok(self.with_node(&path, |node| {
            node.and_then(B::child_keys).unwrap_or_default()
        }))
    }

    /// A handle onto the section at `path`, sharing this tree's storage.
    pub fn sector(&self, path: &str) -> Result<Option<Tree<B>>, Error> {
        let path = self.absolute(path)?;
        let is_section = self.with_node(&path, |node| node.is_some_and(B::is_section));
        Ok(is_section.then(|| Tree {
            root: Rc::clone(&self.root),
            base: path,
        }))
    }

    /// A snapshot of this handle's section as a native node.
    pub fn native(&self) -> B {
        self.with_node(&self.base, |node| {
            node.cloned().unwrap_or_else(B::empty_section)
        })
    }

    /// A detached copy of this handle's section.
    #[must_use]
    pub fn deep_copy(&self) -> Tree<B> {
        Tree::new(self.native())
    }

    pub fn to_value(&self) -> Value {
        self.with_node(&self.base, |node| {
            node.map(B::to_value).unwrap_or_else(Value::map)
        })
    }

    pub fn render(&self) -> Result<String, Error> {
        self.native().render()
    }

    /// Check if both handles address the same section of the same storage.
    pub fn aliases(&self, other: &Tree<B>) -> bool {
        Rc::ptr_eq(&self.root, &other.root) && self.base == other.base
    }
}

/// Path-addressed tree data backed by either JSON or YAML.
///
/// `TreeData` is a handle: [`Clone`] and [`TreeData::get_sector`] return views
/// that share storage with the original. Use [`TreeData::deep_copy`] for an
/// independent tree. Handles are not `Send`; confine each tree to one thread.
#[derive(Clone, Debug)]
pub enum TreeData {
    Json(Tree<JsonValue>),
    Yaml(Tree<YamlValue>),
}

macro_rules! with_tree {
    ($data:expr, $tree:ident => $body:expr) => {
        match $data {
            TreeData::Json($tree) => $body,
            TreeData::Yaml($tree) => $body,
        }
    };
}

macro_rules! typed_accessors {
    ($($get:ident, $get_or:ident, $set:ident: $ty:ty = $coerce:path;)*) => {
        $(
            #[doc = concat!("Read the value at `path` as `", stringify!($ty), "`.")]
            pub fn $get(&self, path: &str) -> Result<Option<$ty>, Error> {
                match self.get(path)? {
                    Some(value) => $coerce(value, path, self.is_lenient()),
                    None => Ok(None),
                }
            }

            #[doc = concat!("Like [`TreeData::", stringify!($get), "`], with a default.")]
            pub fn $get_or(&self, path: &str, default: $ty) -> Result<$ty, Error> {
                Ok(self.$get(path)?.unwrap_or(default))
            }

            #[doc = concat!("Store a `", stringify!($ty), "` at `path`.")]
            pub fn $set(&mut self, path: &str, value: $ty) -> Result<(), Error> {
                self.set(path, value)
            }
        )*
    };
}

fn text(value: Value, path: &str, _lenient: bool) -> Result<Option<String>, Error> {
    coerce::text(value, path)
}

impl TreeData {
    /// An empty tree of the given format.
    pub fn empty(format: Format) -> Self {
        match format {
            Format::Json => TreeData::Json(Tree::empty()),
            Format::Yaml => TreeData::Yaml(Tree::empty()),
        }
    }

    /// Wrap a native JSON tree.
    pub fn from_json(root: JsonValue) -> Self {
        TreeData::Json(Tree::new(root))
    }

    /// Wrap a native YAML tree.
    pub fn from_yaml(root: YamlValue) -> Self {
        TreeData::Yaml(Tree::new(root))
    }

    /// Build a tree of `format` holding a copy of `value`.
    pub fn from_value(format: Format, value: Value) -> Self {
        match format {
            Format::Json => Self::from_json(JsonValue::from_value(value)),
            Format::Yaml => Self::from_yaml(YamlValue::from_value(value)),
        }
    }

    /// Parse text in `format`. The document root must be a section.
    pub fn parse(format: Format, text: &str) -> Result<Self, Error> {
        Ok(match format {
            Format::Json => Self::from_json(JsonValue::parse(text)?),
            Format::Yaml => Self::from_yaml(YamlValue::parse(text)?),
        })
    }

    pub fn format(&self) -> Format {
        match self {
            TreeData::Json(_) => Format::Json,
            TreeData::Yaml(_) => Format::Yaml,
        }
    }

    fn is_lenient(&self) -> bool {
        match self {
            TreeData::Json(_) => JsonValue::LENIENT,
            TreeData::Yaml(_) => YamlValue::LENIENT,
        }
    }

    /// The value at `path`, or `None` if absent.
    ///
    /// Fails only if `path` is not a valid path.
    pub fn get(&self, path: &str) -> Result<Option<Value>, Error> {
        with_tree!(self, tree => tree.get(path))
    }

    /// The value at `path`, or `default` if absent.
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Result<Value, Error> {
        Ok(self.get(path)?.unwrap_or_else(|| default.into()))
    }

    /// Store `value` at `path`, creating intermediate sections and
    /// overwriting any previous value. Storing `Value::Null` removes the key.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), Error> {
        let value = value.into();
        with_tree!(self, tree => tree.set(path, value))
    }

    /// Remove the value at `path`, returning it if it existed.
    pub fn remove(&mut self, path: &str) -> Result<Option<Value>, Error> {
        with_tree!(self, tree => tree.remove(path))
    }

    /// Check if a (non-null) value is stored at `path`.
    pub fn is_set(&self, path: &str) -> Result<bool, Error> {
        with_tree!(self, tree => tree.is_set(path))
    }

    /// Immediate child keys of `path`, or of this tree's root when `path` is
    /// `None` or blank. Empty when `path` does not resolve to a section.
    pub fn get_keys(&self, path: Option<&str>) -> Result<BTreeSet<String>, Error> {
        with_tree!(self, tree => tree.keys(path))
    }

    /// The section at `path` as a `TreeData` sharing this tree's storage, or
    /// `None` if `path` is absent or not a section.
    pub fn get_sector(&self, path: &str) -> Result<Option<TreeData>, Error> {
        Ok(match self {
            TreeData::Json(tree) => tree.sector(path)?.map(TreeData::Json),
            TreeData::Yaml(tree) => tree.sector(path)?.map(TreeData::Yaml),
        })
    }

    typed_accessors! {
        get_string, get_string_or, set_string: String = text;
        get_byte, get_byte_or, set_byte: i8 = coerce::integer;
        get_short, get_short_or, set_short: i16 = coerce::integer;
        get_int, get_int_or, set_int: i32 = coerce::integer;
        get_long, get_long_or, set_long: i64 = coerce::integer;
        get_float, get_float_or, set_float: f32 = coerce::float;
        get_double, get_double_or, set_double: f64 = coerce::float;
        get_bool, get_bool_or, set_bool: bool = coerce::boolean;
        get_string_list, get_string_list_or, set_string_list: Vec<String> = coerce::text_list;
    }

    /// The whole tree (from this handle's root) as a `Value`.
    pub fn to_value(&self) -> Value {
        with_tree!(self, tree => tree.to_value())
    }

    /// A JSON snapshot of this tree, converting from YAML if needed.
    pub fn to_json(&self) -> JsonValue {
        match self {
            TreeData::Json(tree) => tree.native(),
            TreeData::Yaml(tree) => JsonValue::from_value(tree.to_value()),
        }
    }

    /// A YAML snapshot of this tree, converting from JSON if needed.
    pub fn to_yaml(&self) -> YamlValue {
        match self {
            TreeData::Json(tree) => YamlValue::from_value(tree.to_value()),
            TreeData::Yaml(tree) => tree.native(),
        }
    }

    /// Convert to `format`. A tree already in `format` is returned as is
    /// (still sharing storage); otherwise the result is a detached copy.
    pub fn convert(self, format: Format) -> TreeData {
        if self.format() == format {
            self
        } else {
            TreeData::from_value(format, self.to_value())
        }
    }

    /// A detached copy of this tree.
    #[must_use]
    pub fn deep_copy(&self) -> TreeData {
        match self {
            TreeData::Json(tree) => TreeData::Json(tree.deep_copy()),
            TreeData::Yaml(tree) => TreeData::Yaml(tree.deep_copy()),
        }
    }

    /// Serialize as pretty JSON or YAML text, depending on the backend.
    pub fn render(&self) -> Result<String, Error> {
        with_tree!(self, tree => tree.render())
    }

    /// Check if both handles address the same section of the same storage.
    pub fn aliases(&self, other: &TreeData) -> bool {
        match (self, other) {
            (TreeData::Json(a), TreeData::Json(b)) => a.aliases(b),
            (TreeData::Yaml(a), TreeData::Yaml(b)) => a.aliases(b),
            _ => false,
        }
    }
}

impl fmt::Display for TreeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(text) => write!(f, "{}", text),
            Err(_) => write!(f, "{:?}", self.to_value()),
        }
    }
}

impl PartialEq for TreeData {
    fn eq(&self, other: &Self) -> bool {
        self.format() == other.format() && self.to_value() == other.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> [TreeData; 2] {
        [TreeData::empty(Format::Json), TreeData::empty(Format::Yaml)]
    }

    #[test]
    fn set_then_get() {
        for mut data in both() {
            data.set("a", 1).unwrap();
            data.set("b.c", "text").unwrap();
            assert_eq!(data.get("a").unwrap(), Some(Value::Integer(1)));
            assert_eq!(data.get("b.c").unwrap(), Some(Value::from("text")));
            assert_eq!(data.get("missing").unwrap(), None);
            assert_eq!(data.get_or("missing", 5).unwrap(), Value::Integer(5));
        }
    }

    #[test]
    fn intermediate_sections_are_created() {
        for mut data in both() {
            data.set("a.b.c", true).unwrap();
            assert!(data.get_keys(Some("a")).unwrap().contains("b"));
            assert!(data.get_keys(Some("a.b")).unwrap().contains("c"));
            assert!(data.get_keys(None).unwrap().contains("a"));
            assert!(data.get_keys(Some("  ")).unwrap().contains("a"));
            assert!(data.get_keys(Some("a.b.c")).unwrap().is_empty());
            assert!(data.get_keys(Some("nope")).unwrap().is_empty());
        }
    }

    #[test]
    fn is_set_tracks_writes_and_removals() {
        for mut data in both() {
            assert!(!data.is_set("x.y").unwrap());
            data.set("x.y", 3).unwrap();
            assert!(data.is_set("x.y").unwrap());
            data.set("x.y", Value::Null).unwrap();
            assert!(!data.is_set("x.y").unwrap());
            assert!(data.is_set("x").unwrap());
        }
    }

    #[test]
    fn invalid_paths_fail() {
        for mut data in both() {
            assert!(matches!(data.get(""), Err(Error::Path(_))));
            assert!(matches!(data.set("a.", 1), Err(Error::Path(_))));
            assert!(matches!(data.is_set("a..b"), Err(Error::Path(_))));
            assert!(matches!(data.get_sector(" "), Err(Error::Path(_))));
        }
    }

    #[test]
    fn sectors_alias_parent_storage() {
        for mut data in both() {
            data.set("outer.inner.value", 1).unwrap();
            let mut sector = data.get_sector("outer.inner").unwrap().unwrap();

            sector.set("value", 2).unwrap();
            sector.set("added", "yes").unwrap();
            assert_eq!(data.get_int("outer.inner.value").unwrap(), Some(2));
            assert_eq!(
                data.get_string("outer.inner.added").unwrap(),
                Some("yes".to_string())
            );

            data.set("outer.inner.value", 3).unwrap();
            assert_eq!(sector.get_int("value").unwrap(), Some(3));
            assert_eq!(
                sector.get_keys(None).unwrap(),
                ["added".to_string(), "value".to_string()].into()
            );
        }
    }

    #[test]
    fn sector_of_scalar_or_missing_is_none() {
        for mut data in both() {
            data.set("leaf", 1).unwrap();
            assert!(data.get_sector("leaf").unwrap().is_none());
            assert!(data.get_sector("missing").unwrap().is_none());
        }
    }

    #[test]
    fn deep_copy_detaches() {
        for mut data in both() {
            data.set("a", 1).unwrap();
            let mut copy = data.deep_copy();
            copy.set("a", 2).unwrap();
            assert_eq!(data.get_int("a").unwrap(), Some(1));
            assert!(!copy.aliases(&data));
            assert!(data.clone().aliases(&data));
        }
    }

    #[test]
    fn empty_string_list_reads_as_absent() {
        for mut data in both() {
            data.set_string_list("list", vec![]).unwrap();
            assert!(data.is_set("list").unwrap());
            assert_eq!(data.get_string_list("list").unwrap(), None);
            assert_eq!(
                data.get_string_list_or("list", vec!["d".to_string()]).unwrap(),
                vec!["d".to_string()]
            );
        }
    }

    #[test]
    fn typed_scalars_roundtrip() {
        for mut data in both() {
            data.set_byte("b", -8).unwrap();
            data.set_short("s", 1200).unwrap();
            data.set_int("i", 70_000).unwrap();
            data.set_long("l", 1 << 40).unwrap();
            data.set_float("f", 1.25).unwrap();
            data.set_double("d", 2.5e10).unwrap();
            data.set_bool("t", true).unwrap();
            data.set_string("n", "Altar".to_string()).unwrap();

            assert_eq!(data.get_byte("b").unwrap(), Some(-8));
            assert_eq!(data.get_short("s").unwrap(), Some(1200));
            assert_eq!(data.get_int("i").unwrap(), Some(70_000));
            assert_eq!(data.get_long("l").unwrap(), Some(1 << 40));
            assert_eq!(data.get_float("f").unwrap(), Some(1.25));
            assert_eq!(data.get_double("d").unwrap(), Some(2.5e10));
            assert_eq!(data.get_bool("t").unwrap(), Some(true));
            assert_eq!(data.get_string("n").unwrap(), Some("Altar".to_string()));
            assert_eq!(data.get_int_or("missing", 9).unwrap(), 9);
        }
    }

    #[test]
    fn coercion_differs_per_backend() {
        let mut json = TreeData::empty(Format::Json);
        let mut yaml = TreeData::empty(Format::Yaml);
        json.set("word", "abc").unwrap();
        yaml.set("word", "abc").unwrap();

        assert!(matches!(json.get_int("word"), Err(Error::Coercion { .. })));
        assert_eq!(yaml.get_int("word").unwrap(), None);

        json.set("big", 1000).unwrap();
        yaml.set("big", 1000).unwrap();
        assert!(json.get_byte("big").is_err());
        assert_eq!(yaml.get_byte("big").unwrap(), Some(1000i64 as i8));
    }

    #[test]
    fn strict_getters_reject_out_of_range_numbers() {
        let json = TreeData::parse(Format::Json, r#"{"big": 1e20, "huge": 1e300}"#).unwrap();
        assert!(matches!(json.get_long("big"), Err(Error::Coercion { .. })));
        assert!(matches!(json.get_float("huge"), Err(Error::Coercion { .. })));
        assert_eq!(json.get_double("huge").unwrap(), Some(1e300));
    }

    #[test]
    fn text_on_section_is_coercion_error() {
        for mut data in both() {
            data.set("section.key", 1).unwrap();
            assert!(matches!(
                data.get_string("section"),
                Err(Error::Coercion { .. })
            ));
        }
    }

    #[test]
    fn convert_between_formats() {
        let mut json = TreeData::empty(Format::Json);
        json.set("a.b", 1).unwrap();
        let yaml = json.clone().convert(Format::Yaml);
        assert_eq!(yaml.format(), Format::Yaml);
        assert_eq!(yaml.get_int("a.b").unwrap(), Some(1));
        assert!(json.clone().convert(Format::Json).aliases(&json));
    }

    #[test]
    fn render_is_parseable() {
        for mut data in both() {
            data.set("count", 7).unwrap();
            let text = data.to_string();
            let reparsed = TreeData::parse(data.format(), &text).unwrap();
            assert_eq!(reparsed, data);
        }
    }
}
