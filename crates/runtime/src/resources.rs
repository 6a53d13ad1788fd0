//! Name resolution over the asset caches of every loaded module.
//!
//! Resource names are either module-local (`Items/Sword`) or qualified with a
//! module name (`Foo/Items/Sword`). A qualified prefix that names neither the
//! current module nor a loaded one is treated as part of a local path.
//!
//! In headless mode caches are empty, so existence checks fall back to the
//! archive listing. That keeps slot assignment identical on client and
//! server.

use std::sync::Arc;

use modloader_assets::{
    AssetCache, AssetError, AssetKind, Font, ModArchive, Sound, Texture, logical_name,
};

use crate::host::BoundTexture;
use crate::loader::LoadedModule;

/// Borrowed assets of one module.
#[derive(Clone, Copy)]
pub struct ModuleAssets<'a> {
    pub name: &'a str,
    pub cache: &'a AssetCache,
    pub archive: &'a dyn ModArchive,
}

impl<'a> From<&'a LoadedModule> for ModuleAssets<'a> {
    fn from(module: &'a LoadedModule) -> Self {
        Self {
            name: &module.info.name,
            cache: &module.assets,
            archive: module.archive.as_ref(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Resources<'a> {
    current: ModuleAssets<'a>,
    loaded: &'a [LoadedModule],
    headless: bool,
}

impl<'a> Resources<'a> {
    pub fn new(current: ModuleAssets<'a>, loaded: &'a [LoadedModule], headless: bool) -> Self {
        Self {
            current,
            loaded,
            headless,
        }
    }

    pub fn is_headless(&self) -> bool {
        self.headless
    }

    fn locate<'n>(&self, name: &'n str) -> (ModuleAssets<'a>, &'n str) {
        if let Some((prefix, rest)) = name.split_once('/') {
            if prefix == self.current.name {
                return (self.current, rest);
            }
            if let Some(module) = self.loaded.iter().find(|module| module.info.name == prefix) {
                return (ModuleAssets::from(module), rest);
            }
        }
        (self.current, name)
    }

    fn archive_has(&self, name: &str, extensions: &[&str]) -> bool {
        let (module, path) = self.locate(name);
        extensions
            .iter()
            .any(|extension| module.archive.has_file(&format!("{path}.{extension}")))
    }

    pub fn texture(&self, name: &str) -> Result<Arc<Texture>, AssetError> {
        let (module, path) = self.locate(name);
        module.cache.get_texture(path)
    }

    pub fn texture_exists(&self, name: &str) -> bool {
        if self.headless {
            return self.archive_has(name, &["png"]);
        }
        let (module, path) = self.locate(name);
        module.cache.texture_exists(path)
    }

    /// Validates a texture reference; headless hosts skip validation.
    pub fn require_texture(&self, name: &str) -> Result<(), AssetError> {
        if self.headless {
            return Ok(());
        }
        self.texture(name).map(|_| ())
    }

    /// Resolves a texture for a host table. Empty references bind nothing.
    pub fn bind_texture(&self, name: Option<&str>) -> Result<BoundTexture, AssetError> {
        match name {
            Some(name) if !self.headless && !name.is_empty() => self.texture(name).map(Some),
            _ => Ok(None),
        }
    }

    pub fn sound(&self, name: &str) -> Result<Option<Arc<Sound>>, AssetError> {
        let (module, path) = self.locate(name);
        module.cache.get_sound(path)
    }

    /// Resolves a sound for registration. `Ok(None)` is a sound that exists
    /// but could not be decoded; headless hosts only check the archive.
    pub fn load_sound(&self, name: &str) -> Result<Option<Arc<Sound>>, AssetError> {
        if !self.headless {
            return self.sound(name);
        }
        if self.archive_has(name, &["wav", "mp3"]) {
            return Ok(None);
        }
        let (module, path) = self.locate(name);
        Err(AssetError::MissingResource(format!("{}/{}", module.name, path)))
    }

    pub fn sound_exists(&self, name: &str) -> bool {
        if self.headless {
            return self.archive_has(name, &["wav", "mp3"]);
        }
        let (module, path) = self.locate(name);
        module.cache.sound_exists(path)
    }

    pub fn font(&self, name: &str) -> Result<Option<Arc<Font>>, AssetError> {
        let (module, path) = self.locate(name);
        module.cache.get_font(path)
    }

    pub fn font_exists(&self, name: &str) -> bool {
        if self.headless {
            return self.archive_has(name, &["xnb"]);
        }
        let (module, path) = self.locate(name);
        module.cache.font_exists(path)
    }

    /// Raw archive bytes; `name` includes the extension.
    pub fn file_bytes(&self, name: &str) -> Result<&'a [u8], AssetError> {
        let (module, path) = self.locate(name);
        module
            .archive
            .get_file(path)
            .ok_or_else(|| AssetError::MissingResource(format!("{}/{}", module.name, path)))
    }

    pub fn file_exists(&self, name: &str) -> bool {
        let (module, path) = self.locate(name);
        module.archive.has_file(path)
    }

    /// Logical names of the current module's textures under `prefix`.
    pub fn textures_under(&self, prefix: &str) -> Vec<String> {
        if self.headless {
            return self.archive_names_under(prefix, |kind| kind == AssetKind::Image);
        }
        self.current
            .cache
            .texture_names()
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }

    /// Logical names of the current module's sounds under `prefix`.
    pub fn sounds_under(&self, prefix: &str) -> Vec<String> {
        if self.headless {
            return self.archive_names_under(prefix, |kind| {
                matches!(kind, AssetKind::RawAudio | AssetKind::CompressedAudio)
            });
        }
        self.current
            .cache
            .sound_names()
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }

    fn archive_names_under(&self, prefix: &str, keep: impl Fn(AssetKind) -> bool) -> Vec<String> {
        let mut names: Vec<String> = self
            .current
            .archive
            .paths()
            .iter()
            .filter(|path| path.starts_with(prefix))
            .filter(|path| AssetKind::classify(path).is_some_and(&keep))
            .map(|path| logical_name(path).to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modloader_assets::MemoryArchive;

    fn texture(name: &str) -> Texture {
        Texture {
            name: name.into(),
            width: 1,
            height: 1,
            rgba: vec![0; 4],
        }
    }

    #[test]
    fn qualified_and_local_names_resolve_to_current_module() {
        let archive = MemoryArchive::new().with_file("Items/Sword.png", vec![0]);
        let mut cache = AssetCache::new("Foo");
        cache.add_texture("Items/Sword", texture("Foo/Items/Sword")).unwrap();
        let resources = Resources::new(
            ModuleAssets {
                name: "Foo",
                cache: &cache,
                archive: &archive,
            },
            &[],
            false,
        );

        assert!(resources.texture_exists("Foo/Items/Sword"));
        assert!(resources.texture_exists("Items/Sword"));
        assert!(!resources.texture_exists("Bar/Items/Sword"));
        assert!(resources.file_exists("Foo/Items/Sword.png"));
        assert!(matches!(
            resources.texture("Foo/Items/Axe"),
            Err(AssetError::MissingResource(name)) if name == "Foo/Items/Axe"
        ));
    }

    #[test]
    fn headless_probes_consult_the_archive() {
        let archive = MemoryArchive::new()
            .with_file("NPCs/Slime_Head.png", vec![0])
            .with_file("Sounds/Item/Zap.wav", vec![0])
            .with_file("Gores/Chunk.png", vec![0])
            .with_file("Gores/readme.txt", vec![0]);
        let cache = AssetCache::new("Foo");
        let resources = Resources::new(
            ModuleAssets {
                name: "Foo",
                cache: &cache,
                archive: &archive,
            },
            &[],
            true,
        );

        assert!(resources.texture_exists("Foo/NPCs/Slime_Head"));
        assert!(resources.sound_exists("Foo/Sounds/Item/Zap"));
        assert!(resources.load_sound("Foo/Sounds/Item/Zap").unwrap().is_none());
        assert!(matches!(
            resources.load_sound("Foo/Sounds/Item/Nope"),
            Err(AssetError::MissingResource(name)) if name == "Foo/Sounds/Item/Nope"
        ));
        assert!(resources.require_texture("Foo/NPCs/Missing").is_ok());
        assert_eq!(resources.textures_under("Gores/"), vec!["Gores/Chunk".to_string()]);
        assert!(resources.bind_texture(Some("Foo/NPCs/Slime_Head")).unwrap().is_none());
    }
}
