//! Data-driven module content and loaders.
//!
//! This crate reads the files a module folder ships with:
//! - `mod.toml` manifests (identity, side, autoload switches)
//! - `content.ron` catalogs (content definitions per category)
//! - `modloader.toml` loader settings (headless mode, vanilla counts, cache root)
//!
//! Catalog entries are turned into registration-table entries backed by the
//! data-driven capability implementations in [`data`].

pub mod data;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use data::{
    ContentCatalog, ContentSpec, DataContent, DataItem, DataNpc, DataWaterStyle, ItemSpec,
    MusicBoxSpec, NpcSpec, WaterStyleSpec,
};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentLoader, LoadResult, ManifestLoader, ModFolder};
