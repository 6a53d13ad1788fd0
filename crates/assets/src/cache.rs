//! Per-module asset cache.
//!
//! Maps logical resource paths (archive path without extension) to decoded
//! assets. Sounds and fonts that failed to decode are kept as an explicit
//! "unavailable" entry: they exist, but resolve to `None`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::asset::{Font, Sound, Texture};
use crate::error::{AssetError, Result};

#[derive(Clone, Debug, Default)]
pub struct AssetCache {
    module: String,
    textures: BTreeMap<String, Arc<Texture>>,
    sounds: BTreeMap<String, Option<Arc<Sound>>>,
    fonts: BTreeMap<String, Option<Arc<Font>>>,
}

impl AssetCache {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn get_texture(&self, name: &str) -> Result<Arc<Texture>> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| self.missing(name))
    }

    pub fn texture_exists(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn add_texture(&mut self, name: impl Into<String>, texture: Texture) -> Result<()> {
        let name = name.into();
        if self.textures.contains_key(&name) {
            return Err(AssetError::DuplicateResource(self.qualified(&name)));
        }
        self.textures.insert(name, Arc::new(texture));
        Ok(())
    }

    /// `Ok(None)` for a sound that exists but could not be decoded.
    pub fn get_sound(&self, name: &str) -> Result<Option<Arc<Sound>>> {
        self.sounds
            .get(name)
            .cloned()
            .ok_or_else(|| self.missing(name))
    }

    pub fn sound_exists(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    pub fn add_sound(&mut self, name: impl Into<String>, sound: Option<Sound>) -> Result<()> {
        let name = name.into();
        if self.sounds.contains_key(&name) {
            return Err(AssetError::DuplicateResource(self.qualified(&name)));
        }
        self.sounds.insert(name, sound.map(Arc::new));
        Ok(())
    }

    /// `Ok(None)` for a font that exists but could not be loaded.
    pub fn get_font(&self, name: &str) -> Result<Option<Arc<Font>>> {
        self.fonts
            .get(name)
            .cloned()
            .ok_or_else(|| self.missing(name))
    }

    pub fn font_exists(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn add_font(&mut self, name: impl Into<String>, font: Option<Font>) -> Result<()> {
        let name = name.into();
        if self.fonts.contains_key(&name) {
            return Err(AssetError::DuplicateResource(self.qualified(&name)));
        }
        self.fonts.insert(name, font.map(Arc::new));
        Ok(())
    }

    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.textures.keys().map(String::as_str)
    }

    pub fn sound_names(&self) -> impl Iterator<Item = &str> {
        self.sounds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.textures.len() + self.sounds.len() + self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases every asset.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.sounds.clear();
        self.fonts.clear();
    }

    fn qualified(&self, name: &str) -> String {
        format!("{}/{}", self.module, name)
    }

    fn missing(&self, name: &str) -> AssetError {
        AssetError::MissingResource(self.qualified(name))
    }
}
