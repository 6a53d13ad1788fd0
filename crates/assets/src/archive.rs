//! Module archives: ordered `(relative path, bytes)` collections.
//!
//! Paths always use `/` separators regardless of platform, and are relative
//! to the module root (`Items/Sword.png`, `Sounds/Item/Zap.wav`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{AssetError, Result};

/// Read access to the files shipped with one module.
pub trait ModArchive: Send + Sync {
    /// Every file path, in archive order.
    fn paths(&self) -> Vec<String>;

    fn get_file(&self, path: &str) -> Option<&[u8]>;

    fn has_file(&self, path: &str) -> bool {
        self.get_file(path).is_some()
    }

    /// Modification time of the archive's source, used to invalidate stale
    /// disk-cache entries. `None` disables the staleness check.
    fn modified(&self) -> Option<SystemTime> {
        None
    }
}

/// Archive held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryArchive {
    files: BTreeMap<String, Vec<u8>>,
    modified: Option<SystemTime>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    #[must_use]
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ModArchive for MemoryArchive {
    fn paths(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    fn get_file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}

/// Archive backed by an unpacked module folder.
///
/// The folder is read eagerly on open; later changes on disk are not seen.
/// The reported modification time is the newest among the files read.
#[derive(Clone, Debug)]
pub struct DirectoryArchive {
    root: PathBuf,
    inner: MemoryArchive,
}

impl DirectoryArchive {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut inner = MemoryArchive::new();
        let mut newest: Option<SystemTime> = None;

        let mut pending = vec![root.clone()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                let file_type = entry.file_type()?;

                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                if !file_type.is_file() {
                    continue;
                }

                let relative = relative_path(&root, &path)?;
                let modified = entry.metadata()?.modified()?;
                newest = Some(newest.map_or(modified, |current| current.max(modified)));
                inner.insert(relative, fs::read(&path)?);
            }
        }

        inner.modified = newest;
        tracing::debug!(
            target: "modloader::assets",
            root = %root.display(),
            files = inner.len(),
            "opened module directory"
        );

        Ok(Self { root, inner })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModArchive for DirectoryArchive {
    fn paths(&self) -> Vec<String> {
        self.inner.paths()
    }

    fn get_file(&self, path: &str) -> Option<&[u8]> {
        self.inner.get_file(path)
    }

    fn modified(&self) -> Option<SystemTime> {
        self.inner.modified()
    }
}

fn relative_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        AssetError::Cache(format!(
            "{} is outside module root {}",
            path.display(),
            root.display()
        ))
    })?;

    let parts = relative
        .components()
        .map(|component| {
            component.as_os_str().to_str().ok_or_else(|| {
                AssetError::Cache(format!("non UTF-8 path: {}", path.display()))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join("/"))
}
