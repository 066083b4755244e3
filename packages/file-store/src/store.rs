//! A single data file on disk and the tree loaded from it.

use std::{fs, io};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pathtree_core::{Error, Format, TreeData, TypeAdapter};

use crate::error::StoreError;
use crate::resource::ResourceProvider;

/// Owns one file under a data directory and the `TreeData` loaded from it.
///
/// A store starts unprepared, with no data. [`FileStore::prepare`] loads the
/// file if it exists, or copies the default resource into place and loads
/// that if the store has one. The data is replaced wholesale by every load.
///
/// A store is bound to one relative path for its lifetime and is not meant
/// to be shared across threads.
pub struct FileStore {
    format: Format,
    file: PathBuf,
    resource_root: String,
    path: String,
    has_default: bool,
    resources: Arc<dyn ResourceProvider>,
    data: Option<TreeData>,
}

impl FileStore {
    /// A store for `data_dir/path`, whose default content (if `has_default`)
    /// is the resource `resource_root/path`.
    pub fn new(
        format: Format,
        data_dir: impl AsRef<Path>,
        resource_root: impl Into<String>,
        path: impl Into<String>,
        has_default: bool,
        resources: Arc<dyn ResourceProvider>,
    ) -> Self {
        let path = path.into();
        FileStore {
            format,
            file: data_dir.as_ref().join(&path),
            resource_root: resource_root.into(),
            path,
            has_default,
            resources,
            data: None,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// The path of this store relative to the data directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_path(&self) -> &Path {
        &self.file
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Where the default content lives: the resource root and the relative
    /// path joined by `/`.
    pub fn resource_path(&self) -> String {
        let root = self.resource_root.trim_end_matches('/');
        if root.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{}", root, self.path)
        }
    }

    pub fn exists(&self) -> bool {
        self.file.is_file()
    }

    /// The loaded data, or `None` before the first load.
    pub fn data(&self) -> Option<&TreeData> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut TreeData> {
        self.data.as_mut()
    }

    /// Replace the data that `save` will write. It must be in this store's
    /// format.
    pub fn set_data(&mut self, data: TreeData) -> Result<(), StoreError> {
        if data.format() != self.format {
            return Err(StoreError::Data {
                resource: self.resource_path(),
                error: Error::FormatMismatch {
                    expected: self.format,
                    found: data.format(),
                },
            });
        }
        self.data = Some(data);
        Ok(())
    }

    /// Load the file if it exists; otherwise provision the default when
    /// there is one. Without a file or a default the store stays empty.
    pub fn prepare(&mut self) -> Result<(), StoreError> {
        if self.exists() {
            self.load()
        } else if self.has_default {
            self.provide_default()
        } else {
            log::debug!(
                "{} does not exist and has no default, leaving it empty",
                self.file.display()
            );
            Ok(())
        }
    }

    /// Read and parse the file, replacing the current data.
    ///
    /// On failure the current data is kept.
    pub fn load(&mut self) -> Result<(), StoreError> {
        log::debug!("Reading {}...", self.file.display());
        let text = fs::read_to_string(&self.file).map_err(|e| self.io_error(&self.file, e))?;
        let data = TypeAdapter::parsable(self.format)
            .parse(&text)
            .map_err(|error| StoreError::Load {
                resource: self.resource_path(),
                error,
            })?;
        self.data = Some(data);
        Ok(())
    }

    /// Make sure the file and its parent directories exist.
    pub fn create(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }
        if !self.file.exists() {
            fs::File::create(&self.file).map_err(|e| self.io_error(&self.file, e))?;
        }
        Ok(())
    }

    /// Write the data to the file, overwriting it. A store with no data
    /// writes an empty document.
    pub fn save(&self) -> Result<(), StoreError> {
        self.create()?;

        let rendered = match &self.data {
            Some(data) => data.render(),
            None => TreeData::empty(self.format).render(),
        };
        let text = rendered.map_err(|error| StoreError::Data {
            resource: self.resource_path(),
            error,
        })?;

        log::debug!("Writing {}...", self.file.display());
        fs::write(&self.file, text).map_err(|e| self.io_error(&self.file, e))
    }

    /// Copy the default resource over the file, then load it.
    pub fn provide_default(&mut self) -> Result<(), StoreError> {
        let resource = self.resource_path();
        if !self.has_default {
            return Err(StoreError::NoDefault { resource });
        }

        let content = match self.resources.read_resource(&resource) {
            Ok(Some(content)) => content,
            Ok(None) => return Err(StoreError::ResourceMissing { resource }),
            Err(error) => return Err(StoreError::Resource { resource, error }),
        };

        self.create()?;
        log::debug!(
            "Writing default {} to {}...",
            resource,
            self.file.display()
        );
        fs::write(&self.file, &content).map_err(|e| self.io_error(&self.file, e))?;
        self.load()
    }

    fn io_error(&self, path: &Path, error: io::Error) -> StoreError {
        StoreError::io(self.resource_path(), path, error)
    }

    /// Remove the file if it exists. The loaded data is kept.
    pub fn delete(&self) -> Result<(), StoreError> {
        if self.exists() {
            log::debug!("Deleting {}...", self.file.display());
            fs::remove_file(&self.file).map_err(|e| self.io_error(&self.file, e))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("format", &self.format)
            .field("file", &self.file)
            .field("resource", &self.resource_path())
            .field("has_default", &self.has_default)
            .field("loaded", &self.data.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::StaticResources;

    fn store(root: &str, path: &str) -> FileStore {
        FileStore::new(
            Format::Yaml,
            "/nonexistent",
            root,
            path,
            false,
            Arc::new(StaticResources::new()),
        )
    }

    #[test]
    fn resource_path_joins_root_and_path() {
        assert_eq!(store("defaults", "blocks.yml").resource_path(), "defaults/blocks.yml");
        assert_eq!(store("defaults/", "blocks.yml").resource_path(), "defaults/blocks.yml");
        assert_eq!(store("", "blocks.yml").resource_path(), "blocks.yml");
    }

    #[test]
    fn file_path_is_under_data_dir() {
        let store = store("", "data/blocks.yml");
        assert_eq!(
            store.file_path(),
            Path::new("/nonexistent").join("data/blocks.yml")
        );
        assert!(!store.exists());
        assert!(store.data().is_none());
    }

    #[test]
    fn set_data_checks_format() {
        let mut store = store("", "blocks.yml");
        let error = store.set_data(TreeData::empty(Format::Json)).unwrap_err();
        assert!(matches!(
            error,
            StoreError::Data {
                error: Error::FormatMismatch { .. },
                ..
            }
        ));
        store.set_data(TreeData::empty(Format::Yaml)).unwrap();
        assert!(store.data().is_some());
    }

    #[test]
    fn provide_default_requires_default() {
        let mut store = store("defaults", "blocks.yml");
        assert!(matches!(
            store.provide_default(),
            Err(StoreError::NoDefault { resource }) if resource == "defaults/blocks.yml"
        ));
    }
}
