//! Dot-delimited paths into a tree.

use std::fmt;

/// Errors related to path parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path string is empty or only whitespace.
    #[error("invalid path: path is blank")]
    Blank,
    /// The path ends with a separator, e.g. `foo.bar.`.
    #[error("invalid path {path:?}: path is incomplete (trailing '.')")]
    Incomplete { path: String },
    /// A segment between two separators is empty, e.g. `foo..bar`.
    #[error("invalid path {path:?}: empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}

/// A parsed path: the ordered keys from some section down to a target node.
///
/// Paths are written as keys separated by `.`, e.g. `power-blocks.altar.name`.
/// Keys may contain any character other than `.`. A parsed path always has at
/// least one segment; the root of a tree is addressed by [`Path::root`] and is
/// never produced by [`Path::parse`].
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// Separator between path segments.
    pub const SEPARATOR: char = '.';

    /// Parse a path string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathtree_core::Path;
    ///
    /// let path = Path::parse("power-blocks.altar.name").unwrap();
    /// assert_eq!(path.len(), 3);
    ///
    /// assert!(Path::parse("").is_err());
    /// assert!(Path::parse("power-blocks.").is_err());
    /// assert!(Path::parse("power-blocks..altar").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.trim().is_empty() {
            return Err(PathError::Blank);
        }

        if s.trim_end().ends_with(Self::SEPARATOR) {
            return Err(PathError::Incomplete {
                path: s.to_string(),
            });
        }

        let mut components = Vec::new();
        for (position, component) in s.split(Self::SEPARATOR).enumerate() {
            if component.is_empty() {
                return Err(PathError::EmptySegment {
                    path: s.to_string(),
                    position,
                });
            }
            components.push(component.to_string());
        }

        Ok(Path { components })
    }

    /// The empty path, addressing the root section of a tree.
    pub fn root() -> Self {
        Path {
            components: Vec::new(),
        }
    }

    /// Check if this path is the root path.
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if this path has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Path { components }
    }

    /// Split into the parent path and the last key.
    ///
    /// Returns `None` for the root path.
    pub fn split_last(&self) -> Option<(Path, &str)> {
        let (last, parent) = self.components.split_last()?;
        Some((
            Path {
                components: parent.to_vec(),
            },
            last.as_str(),
        ))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

impl std::str::FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

/// Macro for creating paths from literals.
///
/// # Example
///
/// ```rust
/// use pathtree_core::path;
///
/// let p = path!("users.alice.name");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s).expect("invalid path literal")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_paths() {
        assert_eq!(Path::parse("foo").unwrap().len(), 1);
        assert_eq!(Path::parse("foo.bar").unwrap().len(), 2);
        assert_eq!(Path::parse("foo.bar.baz").unwrap().len(), 3);
    }

    #[test]
    fn keys_keep_non_identifier_characters() {
        let p = Path::parse("power-blocks.altar/1.health points").unwrap();
        assert_eq!(&p[0], "power-blocks");
        assert_eq!(&p[1], "altar/1");
        assert_eq!(&p[2], "health points");
    }

    #[test]
    fn blank_paths_rejected() {
        assert_eq!(Path::parse(""), Err(PathError::Blank));
        assert_eq!(Path::parse("   "), Err(PathError::Blank));
    }

    #[test]
    fn trailing_separator_rejected() {
        assert!(matches!(
            Path::parse("foo."),
            Err(PathError::Incomplete { .. })
        ));
        assert!(matches!(
            Path::parse("foo.bar.  "),
            Err(PathError::Incomplete { .. })
        ));
        assert!(matches!(Path::parse("."), Err(PathError::Incomplete { .. })));
    }

    #[test]
    fn empty_segment_rejected() {
        assert_eq!(
            Path::parse("foo..bar"),
            Err(PathError::EmptySegment {
                path: "foo..bar".to_string(),
                position: 1,
            })
        );
        assert!(matches!(
            Path::parse(".foo"),
            Err(PathError::EmptySegment { position: 0, .. })
        ));
    }

    #[test]
    fn split_last_works() {
        let p = path!("a.b.c");
        let (parent, last) = p.split_last().unwrap();
        assert_eq!(parent, path!("a.b"));
        assert_eq!(last, "c");

        let single = path!("a");
        let (parent, last) = single.split_last().unwrap();
        assert!(parent.is_root());
        assert_eq!(last, "a");

        assert!(Path::root().split_last().is_none());
    }

    #[test]
    fn join_with_root() {
        let p = path!("foo.bar");
        assert_eq!(Path::root().join(&p), p);
        assert_eq!(p.join(&Path::root()), p);
        assert_eq!(p.join(&path!("baz")).to_string(), "foo.bar.baz");
    }

    #[test]
    fn display_roundtrips() {
        let p = path!("power-blocks.altar.name");
        assert_eq!(p.to_string(), "power-blocks.altar.name");
        assert_eq!(p.to_string().parse::<Path>().unwrap(), p);
    }

    #[test]
    fn error_display_names_the_path() {
        let err = Path::parse("foo.").unwrap_err();
        assert!(err.to_string().contains("foo."));
        assert!(err.to_string().contains("incomplete"));
    }
}
