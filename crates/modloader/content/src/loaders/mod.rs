//! Loaders for module folders and loader settings.
//!
//! Every loader reads one file format: `mod.toml` manifests, `content.ron`
//! catalogs and `modloader.toml` settings.

pub mod catalog;
pub mod config;
pub mod folder;
pub mod manifest;

pub use catalog::ContentLoader;
pub use config::ConfigLoader;
pub use folder::ModFolder;
pub use manifest::{AutoloadFlags, Manifest, ManifestLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
