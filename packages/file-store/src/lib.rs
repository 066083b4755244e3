//! File-backed stores for pathtree data.
//!
//! A [`FileStore`] owns one JSON or YAML file under a data directory. When the
//! file does not exist yet it can be provisioned from a bundled default read
//! through a [`ResourceProvider`]. A [`StorageProvider`] builds stores that
//! share a data directory and a resource provider.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pathtree_file_store::{StaticResources, StorageProvider};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let resources = StaticResources::new().with("defaults/config.yml", "volume: 3\n");
//! let provider = StorageProvider::new(dir.path(), Arc::new(resources));
//!
//! let mut store = provider.provide_yaml("defaults", "config.yml", true).unwrap();
//! let data = store.data_mut().unwrap();
//! assert_eq!(data.get_int("volume").unwrap(), Some(3));
//!
//! data.set_int("volume", 5).unwrap();
//! store.save().unwrap();
//! ```

mod error;
mod provider;
mod resource;
mod store;

pub use error::StoreError;
pub use provider::StorageProvider;
pub use resource::{DirectoryResources, ResourceProvider, StaticResources};
pub use store::FileStore;
