use std::path::{Path, PathBuf};
use std::sync::Arc;

use pathtree_core::Format;

use crate::error::StoreError;
use crate::resource::ResourceProvider;
use crate::store::FileStore;

/// Builds stores under one data directory, sharing one resource provider.
#[derive(Clone)]
pub struct StorageProvider {
    data_dir: PathBuf,
    resources: Arc<dyn ResourceProvider>,
}

impl StorageProvider {
    pub fn new(data_dir: impl Into<PathBuf>, resources: Arc<dyn ResourceProvider>) -> Self {
        StorageProvider {
            data_dir: data_dir.into(),
            resources,
        }
    }

    /// A provider rooted at `<platform data dir>/<name>`, or `None` when the
    /// platform has no data directory.
    pub fn for_application(name: &str, resources: Arc<dyn ResourceProvider>) -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join(name), resources))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// An unprepared store for `path` under the data directory.
    pub fn store(
        &self,
        format: Format,
        resource_root: &str,
        path: &str,
        has_default: bool,
    ) -> FileStore {
        FileStore::new(
            format,
            &self.data_dir,
            resource_root,
            path,
            has_default,
            Arc::clone(&self.resources),
        )
    }

    /// A prepared JSON store.
    pub fn provide_json(
        &self,
        resource_root: &str,
        path: &str,
        has_default: bool,
    ) -> Result<FileStore, StoreError> {
        self.provide(Format::Json, resource_root, path, has_default)
    }

    /// A prepared YAML store.
    pub fn provide_yaml(
        &self,
        resource_root: &str,
        path: &str,
        has_default: bool,
    ) -> Result<FileStore, StoreError> {
        self.provide(Format::Yaml, resource_root, path, has_default)
    }

    fn provide(
        &self,
        format: Format,
        resource_root: &str,
        path: &str,
        has_default: bool,
    ) -> Result<FileStore, StoreError> {
        let mut store = self.store(format, resource_root, path, has_default);
        store.prepare()?;
        Ok(store)
    }
}

impl std::fmt::Debug for StorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageProvider")
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}
