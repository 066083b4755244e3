//! Error types for tree access and adapters.

use crate::format::Format;
use crate::path::PathError;

/// Errors raised by `TreeData` operations and `TypeAdapter` construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The path string is structurally invalid.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Raw text could not be parsed into a tree.
    #[error("failed to parse {format}: {message}")]
    Parse { format: Format, message: String },

    /// A value is present at `path` but cannot be read as the requested type.
    #[error("value at '{path}' is {found}, expected {expected}")]
    Coercion {
        path: String,
        expected: &'static str,
        found: String,
    },

    /// An adapter was handed a source it cannot construct a tree from.
    #[error("{adapter} adapter cannot use source: {message}")]
    Adapter {
        adapter: &'static str,
        message: String,
    },

    /// A tree of one format was supplied where another was required.
    #[error("format mismatch: expected {expected}, found {found}")]
    FormatMismatch { expected: Format, found: Format },

    /// A tree could not be serialized to text.
    #[error("failed to render {format}: {message}")]
    Render { format: Format, message: String },
}

impl Error {
    pub(crate) fn coercion(
        path: impl ToString,
        expected: &'static str,
        found: impl ToString,
    ) -> Self {
        Error::Coercion {
            path: path.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}
