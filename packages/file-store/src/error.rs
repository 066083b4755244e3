use std::io;
use std::path::PathBuf;

/// Errors raised by a `FileStore`.
///
/// Every variant names the file or resource it concerns. Nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {} for '{resource}': {error}", .path.display())]
    Io {
        resource: String,
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("failed to read resource '{resource}': {error}")]
    Resource {
        resource: String,
        #[source]
        error: io::Error,
    },

    #[error("resource '{resource}' not found")]
    ResourceMissing { resource: String },

    #[error("failed to load '{resource}': {error}")]
    Load {
        resource: String,
        #[source]
        error: pathtree_core::Error,
    },

    #[error("store '{resource}' has no default resource")]
    NoDefault { resource: String },

    #[error("invalid data for '{resource}': {error}")]
    Data {
        resource: String,
        #[source]
        error: pathtree_core::Error,
    },
}

impl StoreError {
    pub(crate) fn io(resource: String, path: impl Into<PathBuf>, error: io::Error) -> Self {
        StoreError::Io {
            resource,
            path: path.into(),
            error,
        }
    }
}
