//! `mod.toml` manifest loader.

use std::path::Path;

use modloader_core::{ModProperties, ModSide, ModuleInfo, Version};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Per-convention autoload switches. Every switch defaults to on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoloadFlags {
    pub content: bool,
    pub gores: bool,
    pub sounds: bool,
    pub backgrounds: bool,
}

impl Default for AutoloadFlags {
    fn default() -> Self {
        Self {
            content: true,
            gores: true,
            sounds: true,
            backgrounds: true,
        }
    }
}

impl From<AutoloadFlags> for ModProperties {
    fn from(flags: AutoloadFlags) -> Self {
        let mut properties = ModProperties::empty();
        properties.set(ModProperties::AUTOLOAD, flags.content);
        properties.set(ModProperties::AUTOLOAD_GORES, flags.gores);
        properties.set(ModProperties::AUTOLOAD_SOUNDS, flags.sounds);
        properties.set(ModProperties::AUTOLOAD_BACKGROUNDS, flags.backgrounds);
        properties
    }
}

/// Module manifest as written in `mod.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub version: Version,
    #[serde(default)]
    pub side: ModSide,
    #[serde(default)]
    pub autoload: AutoloadFlags,
}

impl Manifest {
    pub fn into_info(self) -> ModuleInfo {
        let display_name = self.display_name.unwrap_or_else(|| self.name.clone());
        ModuleInfo::new(self.name, self.version)
            .with_display_name(display_name)
            .with_side(self.side)
            .with_properties(self.autoload.into())
    }
}

/// Loader for `mod.toml` manifests.
pub struct ManifestLoader;

impl ManifestLoader {
    pub fn load(path: &Path) -> LoadResult<ModuleInfo> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ModuleInfo> {
        let manifest: Manifest = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mod manifest TOML: {}", e))?;

        if manifest.name.is_empty() || manifest.name.contains(['/', '.']) {
            anyhow::bail!(
                "Invalid module name '{}': must be non-empty without '/' or '.'",
                manifest.name
            );
        }

        Ok(manifest.into_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_manifest_enables_every_convention() {
        let info = ManifestLoader::parse(
            r#"
            name = "Foo"
            version = "1.2.0"
            "#,
        )
        .unwrap();

        assert_eq!(info.name, "Foo");
        assert_eq!(info.display_name, "Foo");
        assert_eq!(info.version, Version::new(1, 2, 0));
        assert_eq!(info.side, ModSide::Both);
        assert_eq!(info.properties, ModProperties::all());
    }

    #[test]
    fn autoload_table_clears_individual_conventions() {
        let info = ManifestLoader::parse(
            r#"
            name = "Foo"
            display_name = "Foo's Things"
            version = "0.3.1.7"
            side = "client"

            [autoload]
            gores = false
            sounds = false
            "#,
        )
        .unwrap();

        assert_eq!(info.display_name, "Foo's Things");
        assert_eq!(info.side, ModSide::Client);
        assert!(info.properties.contains(ModProperties::AUTOLOAD));
        assert!(info.properties.contains(ModProperties::AUTOLOAD_BACKGROUNDS));
        assert!(!info.properties.contains(ModProperties::AUTOLOAD_GORES));
        assert!(!info.properties.contains(ModProperties::AUTOLOAD_SOUNDS));
    }

    #[test]
    fn qualified_module_names_are_rejected() {
        let err = ManifestLoader::parse("name = \"Foo/Bar\"\nversion = \"1.0\"").unwrap_err();
        assert!(err.to_string().contains("Invalid module name"));
        assert!(ManifestLoader::parse("name = \"Foo\"\nversion = \"one\"").is_err());
    }
}
