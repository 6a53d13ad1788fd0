//! Loader settings loader.

use std::path::Path;

use modloader_core::LoaderSettings;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`LoaderSettings`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<LoaderSettings> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LoaderSettings> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loader settings TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modloader_core::VanillaCounts;

    #[test]
    fn partial_settings_keep_host_constants() {
        let settings = ConfigLoader::parse(
            r#"
            headless = true
            cache_dir = "/tmp/modloader"

            [vanilla]
            items = 4000
            "#,
        )
        .unwrap();

        assert!(settings.headless);
        assert_eq!(settings.vanilla.items, 4000);
        assert_eq!(settings.vanilla.tiles, VanillaCounts::default().tiles);
        assert_eq!(settings.vanilla.equips, VanillaCounts::default().equips);
        assert_eq!(
            settings.cache_dir.as_deref(),
            Some(Path::new("/tmp/modloader"))
        );
    }

    #[test]
    fn empty_file_is_default() {
        let settings = ConfigLoader::parse("").unwrap();
        assert_eq!(settings, LoaderSettings::default());
    }
}
