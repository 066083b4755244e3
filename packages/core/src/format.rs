//! Backing text formats.

use std::fmt;

/// The hierarchical text format backing a `TreeData` or a file store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON (`application/json`)
    Json,
    /// YAML (`application/yaml`)
    Yaml,
}

impl Format {
    /// MIME-type-like name of the format.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Yaml => "application/yaml",
        }
    }

    /// Conventional file extension, without the dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yml",
        }
    }

    /// Check if this is JSON format.
    pub fn is_json(&self) -> bool {
        self == &Format::Json
    }

    /// Check if this is YAML format.
    pub fn is_yaml(&self) -> bool {
        self == &Format::Yaml
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(Format::Json.as_str(), "application/json");
        assert_eq!(Format::Yaml.to_string(), "application/yaml");
        assert!(Format::Json.is_json());
        assert!(!Format::Json.is_yaml());
        assert_eq!(Format::Yaml.extension(), "yml");
    }
}
