//! Module folder layout.

use std::path::{Path, PathBuf};

use modloader_core::ModuleInfo;

use crate::data::ContentCatalog;
use crate::loaders::{ContentLoader, LoadResult, ManifestLoader};

pub const MANIFEST_FILE: &str = "mod.toml";
pub const CATALOG_FILE: &str = "content.ron";

/// An unpacked module folder.
///
/// # Directory Structure
///
/// ```text
/// Foo/
/// ├── mod.toml
/// ├── content.ron        (optional)
/// ├── Items/Sword.png
/// ├── Gores/Explosion.png
/// └── Sounds/Item/Zap.wav
/// ```
pub struct ModFolder {
    root: PathBuf,
}

impl ModFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lists module folders under `mods_dir` (those with a manifest), sorted
    /// by folder name.
    pub fn discover(mods_dir: &Path) -> LoadResult<Vec<ModFolder>> {
        let entries = std::fs::read_dir(mods_dir).map_err(|e| {
            anyhow::anyhow!("Failed to read mods directory {}: {}", mods_dir.display(), e)
        })?;

        let mut roots = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.join(MANIFEST_FILE).is_file() {
                roots.push(path);
            }
        }
        roots.sort();

        Ok(roots.into_iter().map(ModFolder::new).collect())
    }

    pub fn load_manifest(&self) -> LoadResult<ModuleInfo> {
        ManifestLoader::load(&self.root.join(MANIFEST_FILE))
    }

    /// Loads `content.ron`; a folder without one has an empty catalog.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let path = self.root.join(CATALOG_FILE);
        if !path.exists() {
            return Ok(ContentCatalog::default());
        }
        ContentLoader::load(&path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_module(root: &Path, name: &str, catalog: Option<&str>) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(MANIFEST_FILE),
            format!("name = \"{name}\"\nversion = \"1.0.0\"\n"),
        )
        .unwrap();
        if let Some(catalog) = catalog {
            fs::write(dir.join(CATALOG_FILE), catalog).unwrap();
        }
    }

    #[test]
    fn discover_sorts_and_skips_folders_without_manifest() {
        let dir = tempfile::TempDir::new().unwrap();
        write_module(dir.path(), "Zeta", None);
        write_module(dir.path(), "Alpha", Some("(items: [(name: \"Sword\")])"));
        fs::create_dir_all(dir.path().join("NotAMod")).unwrap();

        let folders = ModFolder::discover(dir.path()).unwrap();
        let names: Vec<_> = folders
            .iter()
            .map(|folder| folder.load_manifest().unwrap().name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);

        assert_eq!(folders[0].load_catalog().unwrap().items.len(), 1);
        assert!(folders[1].load_catalog().unwrap().is_empty());
    }
}
