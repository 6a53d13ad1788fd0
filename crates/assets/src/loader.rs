//! Populates a module's asset cache from its archive.

use std::fs;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, trace, warn};

use crate::archive::ModArchive;
use crate::asset::{AssetDecoder, AssetKind, Font, Sound, logical_name};
use crate::cache::AssetCache;
use crate::disk::DiskCache;
use crate::error::Result;

const FONT_PREFIX: &str = "Fonts/";

/// Classifies archive entries by extension and decodes them into an
/// [`AssetCache`].
///
/// Without a decoder the loader is headless: every module gets an empty
/// cache and no disk cache is touched.
#[derive(Clone, Default)]
pub struct AssetLoader {
    decoder: Option<Arc<dyn AssetDecoder>>,
    disk: Option<DiskCache>,
}

impl AssetLoader {
    pub fn new(decoder: Arc<dyn AssetDecoder>) -> Self {
        Self {
            decoder: Some(decoder),
            disk: None,
        }
    }

    pub fn headless() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_disk_cache(mut self, disk: DiskCache) -> Self {
        self.disk = Some(disk);
        self
    }

    pub fn is_headless(&self) -> bool {
        self.decoder.is_none()
    }

    /// Builds the cache for one module.
    ///
    /// Texture decode failures abort; audio and font failures degrade to an
    /// unavailable entry.
    pub fn load(&self, module: &str, version: &str, archive: &dyn ModArchive) -> Result<AssetCache> {
        let mut cache = AssetCache::new(module);
        let Some(decoder) = self.decoder.as_deref() else {
            return Ok(cache);
        };

        for path in archive.paths() {
            let Some(kind) = AssetKind::classify(&path) else {
                continue;
            };
            let Some(bytes) = archive.get_file(&path) else {
                continue;
            };
            let name = logical_name(&path);
            trace!(target: "modloader::assets", module, path = %path, ?kind, "classified");

            match kind {
                AssetKind::Image => {
                    let texture = decoder.decode_texture(&format!("{module}/{name}"), bytes)?;
                    cache.add_texture(name, texture)?;
                }
                AssetKind::RawAudio => {
                    let sound = decoder
                        .decode_sound(&path, bytes)
                        .inspect_err(|error| {
                            warn!(target: "modloader::assets", module, path = %path, %error, "sound unavailable");
                        })
                        .ok();
                    cache.add_sound(name, sound)?;
                }
                AssetKind::CompressedAudio => {
                    let sound = self
                        .transcode(decoder, module, version, &path, bytes, archive.modified())
                        .inspect_err(|error| {
                            warn!(target: "modloader::assets", module, path = %path, %error, "sound unavailable");
                        })
                        .ok();
                    cache.add_sound(name, sound)?;
                }
                AssetKind::Prebaked if path.starts_with(FONT_PREFIX) => {
                    let font = self
                        .load_font(decoder, module, version, &path, bytes, archive.modified())
                        .inspect_err(|error| {
                            warn!(target: "modloader::assets", module, path = %path, %error, "font unavailable");
                        })
                        .ok();
                    cache.add_font(name, font)?;
                }
                AssetKind::Prebaked => {}
            }
        }

        debug!(target: "modloader::assets", module, assets = cache.len(), "asset cache populated");
        Ok(cache)
    }

    fn transcode(
        &self,
        decoder: &dyn AssetDecoder,
        module: &str,
        version: &str,
        path: &str,
        bytes: &[u8],
        source_modified: Option<SystemTime>,
    ) -> Result<Sound> {
        let Some(disk) = &self.disk else {
            return decoder.decode_compressed(path, bytes);
        };

        let stem = DiskCache::entry_stem(module, logical_name(path), version);
        let cache_path = disk.audio_path(&stem);
        DiskCache::delete_if_older(&cache_path, source_modified)?;

        if let Some(sound) = disk.read_sound(&cache_path, bytes)? {
            trace!(target: "modloader::assets", module, path, "transcode cache hit");
            return Ok(sound);
        }

        let sound = decoder.decode_compressed(path, bytes)?;
        disk.write_sound(&cache_path, bytes, &sound)?;
        Ok(sound)
    }

    fn load_font(
        &self,
        decoder: &dyn AssetDecoder,
        module: &str,
        version: &str,
        path: &str,
        bytes: &[u8],
        source_modified: Option<SystemTime>,
    ) -> Result<Font> {
        let stem = DiskCache::entry_stem(module, logical_name(path), version);
        let resource_name = DiskCache::font_resource_name(&stem);

        let Some(disk) = &self.disk else {
            return decoder.load_font(&resource_name, bytes);
        };

        let cache_path = disk.font_path(&stem);
        DiskCache::delete_if_older(&cache_path, source_modified)?;
        disk.ensure_font(&cache_path, bytes)?;
        decoder.load_font(&resource_name, &fs::read(&cache_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use crate::asset::Texture;
    use crate::error::AssetError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Accepts any bytes; audio starting with `bad` fails.
    #[derive(Default)]
    struct FakeDecoder {
        transcodes: AtomicUsize,
    }

    impl AssetDecoder for FakeDecoder {
        fn decode_texture(&self, name: &str, bytes: &[u8]) -> Result<Texture> {
            Ok(Texture {
                name: name.to_string(),
                width: bytes.len() as u32,
                height: 1,
                rgba: Vec::new(),
            })
        }

        fn decode_sound(&self, path: &str, bytes: &[u8]) -> Result<Sound> {
            if bytes.starts_with(b"bad") {
                return Err(AssetError::decode(path, "corrupt"));
            }
            Ok(Sound {
                sample_rate: 22_050,
                channels: 1,
                samples: vec![0.0; bytes.len()],
            })
        }

        fn decode_compressed(&self, path: &str, bytes: &[u8]) -> Result<Sound> {
            self.transcodes.fetch_add(1, Ordering::SeqCst);
            self.decode_sound(path, bytes)
        }
    }

    fn archive() -> MemoryArchive {
        MemoryArchive::new()
            .with_file("Items/Sword.png", vec![0; 4])
            .with_file("Sounds/Item/Zap.wav", b"ok".to_vec())
            .with_file("Sounds/Broken.wav", b"bad".to_vec())
            .with_file("Sounds/Music/Theme.mp3", b"mp3 data".to_vec())
            .with_file("Fonts/Title.xnb", b"font".to_vec())
            .with_file("Effects/Shader.xnb", b"fx".to_vec())
            .with_file("build.txt", b"author = me".to_vec())
    }

    #[test]
    fn classifies_archive_entries() {
        let loader = AssetLoader::new(Arc::new(FakeDecoder::default()));
        let cache = loader.load("Foo", "1.0.0", &archive()).unwrap();

        let texture = cache.get_texture("Items/Sword").unwrap();
        assert_eq!(texture.name, "Foo/Items/Sword");
        assert!(cache.get_sound("Sounds/Item/Zap").unwrap().is_some());
        assert!(cache.get_sound("Sounds/Broken").unwrap().is_none());
        assert!(cache.get_sound("Sounds/Music/Theme").unwrap().is_some());

        let font = cache.get_font("Fonts/Title").unwrap().unwrap();
        assert_eq!(font.resource_name, "Fonts/ModFonts/Foo_Fonts_Title_1.0.0");
        assert!(!cache.font_exists("Effects/Shader"));
        assert!(!cache.texture_exists("build"));
    }

    #[test]
    fn headless_loader_skips_everything() {
        let cache = AssetLoader::headless()
            .load("Foo", "1.0.0", &archive())
            .unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn texture_decode_failure_aborts() {
        struct NoTextures;
        impl AssetDecoder for NoTextures {
            fn decode_texture(&self, name: &str, _: &[u8]) -> Result<Texture> {
                Err(AssetError::decode(name, "unsupported"))
            }
            fn decode_sound(&self, path: &str, _: &[u8]) -> Result<Sound> {
                Err(AssetError::decode(path, "unsupported"))
            }
            fn decode_compressed(&self, path: &str, _: &[u8]) -> Result<Sound> {
                Err(AssetError::decode(path, "unsupported"))
            }
        }

        let loader = AssetLoader::new(Arc::new(NoTextures));
        let err = loader.load("Foo", "1.0.0", &archive()).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn transcoded_audio_is_reused_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let decoder = Arc::new(FakeDecoder::default());
        let loader = AssetLoader::new(decoder.clone())
            .with_disk_cache(DiskCache::new(dir.path()).unwrap());

        loader.load("Foo", "1.0.0", &archive()).unwrap();
        loader.load("Foo", "1.0.0", &archive()).unwrap();
        assert_eq!(decoder.transcodes.load(Ordering::SeqCst), 1);

        let cached = DiskCache::new(dir.path())
            .unwrap()
            .audio_path("Foo_Sounds_Music_Theme_1.0.0");
        assert!(cached.exists());

        // A new version is a new cache key.
        loader.load("Foo", "1.1.0", &archive()).unwrap();
        assert_eq!(decoder.transcodes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn corrupt_cache_entry_is_transcoded_again() {
        let dir = tempfile::TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path()).unwrap();
        let cached = disk.audio_path("Foo_Sounds_Music_Theme_1.0.0");
        fs::write(&cached, b"not a pcm record").unwrap();

        let decoder = Arc::new(FakeDecoder::default());
        let loader = AssetLoader::new(decoder.clone()).with_disk_cache(disk);

        let cache = loader.load("Foo", "1.0.0", &archive()).unwrap();
        assert!(cache.get_sound("Sounds/Music/Theme").unwrap().is_some());
        assert_eq!(decoder.transcodes.load(Ordering::SeqCst), 1);

        // The rewritten entry is served from disk.
        loader.load("Foo", "1.0.0", &archive()).unwrap();
        assert_eq!(decoder.transcodes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stale_entries_are_transcoded_again() {
        let dir = tempfile::TempDir::new().unwrap();
        let decoder = Arc::new(FakeDecoder::default());
        let loader = AssetLoader::new(decoder.clone())
            .with_disk_cache(DiskCache::new(dir.path()).unwrap());

        loader.load("Foo", "1.0.0", &archive()).unwrap();

        let newer = SystemTime::now() + std::time::Duration::from_secs(3600);
        let rebuilt = archive().with_modified(newer);
        loader.load("Foo", "1.0.0", &rebuilt).unwrap();
        assert_eq!(decoder.transcodes.load(Ordering::SeqCst), 2);
    }
}
