//! On-disk caches for transcoded audio and pre-baked fonts.
//!
//! Entries are keyed by `(module, path, version)` through the file name and
//! carry a SHA-256 digest of the source bytes. An entry older than the
//! module archive is deleted before it is read. Loading is single-threaded
//! and no other process writes these folders, so the check-then-act is safe.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::asset::Sound;
use crate::error::{AssetError, Result};

const AUDIO_DIR: &str = "audio";
const FONT_DIR: &str = "Fonts/ModFonts";

/// Root folder of the transcode and font caches.
#[derive(Clone, Debug)]
pub struct DiskCache {
    root: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct CachedSound {
    source_digest: String,
    sound: Sound,
}

impl DiskCache {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(AUDIO_DIR))?;
        fs::create_dir_all(root.join(FONT_DIR))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<module>_<path with '/' as '_'>_<version>`, without extension.
    pub fn entry_stem(module: &str, logical_path: &str, version: &str) -> String {
        format!("{}_{}_{}", module, logical_path.replace('/', "_"), version)
    }

    pub fn audio_path(&self, stem: &str) -> PathBuf {
        self.root.join(AUDIO_DIR).join(format!("{stem}.pcm"))
    }

    pub fn font_path(&self, stem: &str) -> PathBuf {
        self.root.join(FONT_DIR).join(format!("{stem}.xnb"))
    }

    /// Resource name the host's content pipeline loads a cached font under.
    pub fn font_resource_name(stem: &str) -> String {
        format!("{FONT_DIR}/{stem}")
    }

    /// Deletes `path` when it predates `source_modified`.
    ///
    /// Returns whether an entry was removed.
    pub fn delete_if_older(path: &Path, source_modified: Option<SystemTime>) -> Result<bool> {
        let Some(source_modified) = source_modified else {
            return Ok(false);
        };
        if !path.exists() {
            return Ok(false);
        }

        let cached = fs::metadata(path)?.modified()?;
        if cached < source_modified {
            fs::remove_file(path)?;
            tracing::debug!(
                target: "modloader::assets",
                path = %path.display(),
                "deleted stale cache entry"
            );
            return Ok(true);
        }
        Ok(false)
    }

    /// Reads a transcoded sound. Entries produced from other bytes, or that
    /// no longer deserialize, read as missing so they get rewritten.
    pub fn read_sound(&self, path: &Path, source: &[u8]) -> Result<Option<Sound>> {
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(path)?;
        let cached: CachedSound = match bincode::deserialize(&bytes) {
            Ok(cached) => cached,
            Err(error) => {
                tracing::debug!(
                    target: "modloader::assets",
                    path = %path.display(),
                    %error,
                    "unreadable cache entry"
                );
                return Ok(None);
            }
        };

        if cached.source_digest != digest(source) {
            tracing::debug!(
                target: "modloader::assets",
                path = %path.display(),
                "cache entry digest mismatch"
            );
            return Ok(None);
        }
        Ok(Some(cached.sound))
    }

    pub fn write_sound(&self, path: &Path, source: &[u8], sound: &Sound) -> Result<()> {
        let record = CachedSound {
            source_digest: digest(source),
            sound: sound.clone(),
        };
        let bytes = bincode::serialize(&record).map_err(|e| AssetError::Cache(e.to_string()))?;
        write_atomic(path, &bytes)
    }

    /// Writes font bytes unless an entry already exists.
    pub fn ensure_font(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if path.exists() {
            return Ok(());
        }
        write_atomic(path, bytes)
    }
}

fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sound() -> Sound {
        Sound {
            sample_rate: 44_100,
            channels: 2,
            samples: vec![0.0, 0.5, -0.5, 1.0],
        }
    }

    #[test]
    fn entry_stem_flattens_path() {
        assert_eq!(
            DiskCache::entry_stem("Foo", "Sounds/Music/Theme", "1.2.0"),
            "Foo_Sounds_Music_Theme_1.2.0"
        );
        assert_eq!(
            DiskCache::font_resource_name("Foo_Fonts_Title_1.0.0"),
            "Fonts/ModFonts/Foo_Fonts_Title_1.0.0"
        );
    }

    #[test]
    fn sound_round_trips_through_cache() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path()).unwrap();
        let path = cache.audio_path("Foo_Sounds_Theme_1.0.0");

        assert!(cache.read_sound(&path, b"mp3").unwrap().is_none());
        cache.write_sound(&path, b"mp3", &sound()).unwrap();
        assert_eq!(cache.read_sound(&path, b"mp3").unwrap(), Some(sound()));
    }

    #[test]
    fn digest_mismatch_reads_as_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path()).unwrap();
        let path = cache.audio_path("Foo_Sounds_Theme_1.0.0");

        cache.write_sound(&path, b"old bytes", &sound()).unwrap();
        assert!(cache.read_sound(&path, b"new bytes").unwrap().is_none());
    }

    #[test]
    fn corrupt_entry_reads_as_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path()).unwrap();
        let path = cache.audio_path("Foo_Sounds_Theme_1.0.0");

        fs::write(&path, b"\xff\xff garbage").unwrap();
        assert!(cache.read_sound(&path, b"mp3").unwrap().is_none());

        cache.write_sound(&path, b"mp3", &sound()).unwrap();
        assert_eq!(cache.read_sound(&path, b"mp3").unwrap(), Some(sound()));
    }

    #[test]
    fn entries_older_than_source_are_deleted() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path()).unwrap();
        let path = cache.font_path("Foo_Fonts_Title_1.0.0");
        cache.ensure_font(&path, b"font").unwrap();

        let written = fs::metadata(&path).unwrap().modified().unwrap();

        assert!(!DiskCache::delete_if_older(&path, None).unwrap());
        assert!(!DiskCache::delete_if_older(&path, Some(written - Duration::from_secs(60))).unwrap());
        assert!(path.exists());

        assert!(DiskCache::delete_if_older(&path, Some(written + Duration::from_secs(60))).unwrap());
        assert!(!path.exists());
    }
}
