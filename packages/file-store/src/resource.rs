//! Sources of default file content.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::{fs, io};

use bytes::Bytes;

/// Provides the bytes of bundled default files.
///
/// Resource paths are `/`-separated and relative.
pub trait ResourceProvider: Send + Sync {
    /// The content of `path`, or `None` if there is no such resource.
    fn read_resource(&self, path: &str) -> io::Result<Option<Bytes>>;
}

/// Resources read from files under a directory.
#[derive(Clone, Debug)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryResources { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, resource: &str) -> io::Result<PathBuf> {
        let mut file = self.root.clone();
        for segment in resource.split('/').filter(|s| !s.is_empty()) {
            match Path::new(segment).components().next() {
                Some(Component::Normal(_)) => file.push(segment),
                Some(Component::CurDir) => {}
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("resource path {:?} leaves the resource root", resource),
                    ))
                }
            }
        }
        Ok(file)
    }
}

impl ResourceProvider for DirectoryResources {
    fn read_resource(&self, path: &str) -> io::Result<Option<Bytes>> {
        let file = self.resolve(path)?;
        log::debug!("Reading resource {}...", file.display());
        match fs::read(&file) {
            Ok(content) => Ok(Some(Bytes::from(content))),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }
}

/// Resources held in memory, e.g. filled from `include_bytes!`.
#[derive(Clone, Debug, Default)]
pub struct StaticResources {
    entries: HashMap<String, Bytes>,
}

impl StaticResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Bytes>) {
        self.entries.insert(path.into(), content.into());
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.insert(path, content);
        self
    }
}

impl ResourceProvider for StaticResources {
    fn read_resource(&self, path: &str) -> io::Result<Option<Bytes>> {
        Ok(self.entries.get(path).cloned())
    }
}
