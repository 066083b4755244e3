//! Strategies for obtaining a `TreeData` from some source.

use std::fmt;

use crate::backend::{JsonValue, YamlValue};
use crate::{Error, Format, TreeData};

/// Input handed to a [`TypeAdapter`].
#[derive(Clone, Debug)]
pub enum Source {
    /// An existing tree.
    Tree(TreeData),
    /// A native JSON node.
    Json(JsonValue),
    /// A native YAML node.
    Yaml(YamlValue),
    /// Unparsed document text.
    Text(String),
}

impl From<TreeData> for Source {
    fn from(tree: TreeData) -> Self {
        Source::Tree(tree)
    }
}

impl From<JsonValue> for Source {
    fn from(node: JsonValue) -> Self {
        Source::Json(node)
    }
}

impl From<YamlValue> for Source {
    fn from(node: YamlValue) -> Self {
        Source::Yaml(node)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl Source {
    fn kind(&self) -> &'static str {
        match self {
            Source::Tree(_) => "tree",
            Source::Json(_) => "native JSON node",
            Source::Yaml(_) => "native YAML node",
            Source::Text(_) => "text",
        }
    }
}

/// How a codec-bearing type turns its source into a `TreeData`.
///
/// Castable adapters take an already-built tree (or a native node); parsable
/// adapters take document text. All four produce an empty tree from `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeAdapter {
    Json,
    #[default]
    Yaml,
    ParsableJson,
    ParsableYaml,
}

impl TypeAdapter {
    /// The adapter that reads or wraps documents of `format`.
    pub fn castable(format: Format) -> Self {
        match format {
            Format::Json => TypeAdapter::Json,
            Format::Yaml => TypeAdapter::Yaml,
        }
    }

    /// The adapter that parses text of `format`.
    pub fn parsable(format: Format) -> Self {
        match format {
            Format::Json => TypeAdapter::ParsableJson,
            Format::Yaml => TypeAdapter::ParsableYaml,
        }
    }

    pub fn format(&self) -> Format {
        match self {
            TypeAdapter::Json | TypeAdapter::ParsableJson => Format::Json,
            TypeAdapter::Yaml | TypeAdapter::ParsableYaml => Format::Yaml,
        }
    }

    pub fn is_parsable(&self) -> bool {
        matches!(self, TypeAdapter::ParsableJson | TypeAdapter::ParsableYaml)
    }

    pub fn is_castable(&self) -> bool {
        !self.is_parsable()
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeAdapter::Json => "JSON",
            TypeAdapter::Yaml => "YAML",
            TypeAdapter::ParsableJson => "PARSABLE_JSON",
            TypeAdapter::ParsableYaml => "PARSABLE_YAML",
        }
    }

    /// Produce a tree from `source`.
    ///
    /// A same-format tree passes through and keeps sharing storage with the
    /// caller; anything converted from the other format is a detached copy.
    pub fn adapt(&self, source: Option<Source>) -> Result<TreeData, Error> {
        let format = self.format();
        let Some(source) = source else {
            return Ok(TreeData::empty(format));
        };

        if self.is_parsable() {
            return match source {
                Source::Text(text) => TreeData::parse(format, &text),
                other => Err(self.reject(&other)),
            };
        }

        match source {
            Source::Tree(tree) => Ok(tree.convert(format)),
            Source::Json(node) => Ok(TreeData::from_json(node).convert(format)),
            Source::Yaml(node) => Ok(TreeData::from_yaml(node).convert(format)),
            other @ Source::Text(_) => Err(self.reject(&other)),
        }
    }

    /// Shorthand for [`TypeAdapter::adapt`] with text.
    pub fn parse(&self, text: &str) -> Result<TreeData, Error> {
        self.adapt(Some(Source::from(text)))
    }

    fn reject(&self, source: &Source) -> Error {
        let expected = if self.is_parsable() {
            "document text"
        } else {
            "a tree or native node"
        };
        Error::Adapter {
            adapter: self.name(),
            message: format!("expected {}, got {}", expected, source.kind()),
        }
    }
}

impl fmt::Display for TypeAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
