//! Shared fixtures for the runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use modloader_assets::{AssetDecoder, AssetLoader, MemoryArchive, Result, Sound, Texture};
use modloader_core::{ContentType, LoaderSettings, ModuleInfo, Version};
use runtime::{Mod, ModContext, ModLoader, ModSource};

/// Decoder that accepts any bytes; textures record their byte length as
/// width.
pub struct TestDecoder;

impl AssetDecoder for TestDecoder {
    fn decode_texture(&self, name: &str, bytes: &[u8]) -> Result<Texture> {
        Ok(Texture {
            name: name.to_string(),
            width: bytes.len() as u32,
            height: 1,
            rgba: Vec::new(),
        })
    }

    fn decode_sound(&self, _path: &str, bytes: &[u8]) -> Result<Sound> {
        Ok(Sound {
            sample_rate: 44_100,
            channels: 2,
            samples: vec![0.0; bytes.len()],
        })
    }

    fn decode_compressed(&self, path: &str, bytes: &[u8]) -> Result<Sound> {
        self.decode_sound(path, bytes)
    }
}

pub fn client_loader() -> ModLoader {
    ModLoader::new(
        LoaderSettings::default(),
        AssetLoader::new(Arc::new(TestDecoder)),
    )
}

pub fn headless_loader() -> ModLoader {
    ModLoader::new(
        LoaderSettings {
            headless: true,
            ..LoaderSettings::default()
        },
        AssetLoader::headless(),
    )
}

pub fn info(name: &str) -> ModuleInfo {
    ModuleInfo::new(name, Version::new(1, 0, 0))
}

pub fn png() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G']
}

type LoadHook = Box<dyn Fn(&mut ModContext<'_>) -> runtime::Result<()> + Send + Sync>;

/// A module built from a registration table and an optional manual load
/// step.
pub struct TestMod {
    types: Vec<ContentType>,
    on_load: Option<LoadHook>,
}

impl TestMod {
    pub fn new(types: Vec<ContentType>) -> Self {
        Self {
            types,
            on_load: None,
        }
    }

    pub fn on_load(
        mut self,
        hook: impl Fn(&mut ModContext<'_>) -> runtime::Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_load = Some(Box::new(hook));
        self
    }
}

impl Mod for TestMod {
    fn content_types(&self) -> Vec<ContentType> {
        self.types.clone()
    }

    fn load(&mut self, ctx: &mut ModContext<'_>) -> runtime::Result<()> {
        match &self.on_load {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }
}

pub fn source(name: &str, archive: MemoryArchive, module: TestMod) -> ModSource {
    ModSource::new(info(name), archive, module)
}
