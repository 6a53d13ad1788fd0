//! Decoded asset types and the host decoding seam.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    /// Diagnostic identity, `"<module>/<path>"`.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Interleaved PCM audio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl Sound {
    pub fn frames(&self) -> usize {
        match self.channels {
            0 => 0,
            channels => self.samples.len() / usize::from(channels),
        }
    }
}

/// Pre-baked font resource, loaded by its derived resource name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Font {
    pub resource_name: String,
    pub data: Vec<u8>,
}

/// How the cache treats a file, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    RawAudio,
    CompressedAudio,
    /// Pre-baked resource; only fonts under `Fonts/` are loaded.
    Prebaked,
}

impl AssetKind {
    pub fn classify(path: &str) -> Option<Self> {
        let (_, extension) = path.rsplit_once('.')?;
        match extension {
            "png" => Some(Self::Image),
            "wav" => Some(Self::RawAudio),
            "mp3" => Some(Self::CompressedAudio),
            "xnb" => Some(Self::Prebaked),
            _ => None,
        }
    }
}

/// Strips the extension from an archive path to get its logical name.
pub fn logical_name(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |slash| slash + 1);
    match path[file_start..].rfind('.') {
        Some(dot) => &path[..file_start + dot],
        None => path,
    }
}

/// Host decoding primitives.
pub trait AssetDecoder: Send + Sync {
    fn decode_texture(&self, name: &str, bytes: &[u8]) -> Result<Texture>;

    fn decode_sound(&self, path: &str, bytes: &[u8]) -> Result<Sound>;

    /// Transcodes compressed audio into playable PCM.
    fn decode_compressed(&self, path: &str, bytes: &[u8]) -> Result<Sound>;

    /// Loads a font from its cached bytes under `resource_name`.
    fn load_font(&self, resource_name: &str, bytes: &[u8]) -> Result<Font> {
        Ok(Font {
            resource_name: resource_name.to_string(),
            data: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_extension() {
        assert_eq!(AssetKind::classify("Items/Sword.png"), Some(AssetKind::Image));
        assert_eq!(AssetKind::classify("Sounds/Zap.wav"), Some(AssetKind::RawAudio));
        assert_eq!(AssetKind::classify("Sounds/Music/Theme.mp3"), Some(AssetKind::CompressedAudio));
        assert_eq!(AssetKind::classify("Fonts/Title.xnb"), Some(AssetKind::Prebaked));
        assert_eq!(AssetKind::classify("build.txt"), None);
        assert_eq!(AssetKind::classify("README"), None);
    }

    #[test]
    fn logical_name_strips_only_final_extension() {
        assert_eq!(logical_name("Items/Sword.png"), "Items/Sword");
        assert_eq!(logical_name("Items/Sword.old.png"), "Items/Sword.old");
        assert_eq!(logical_name("Fonts.v2/Title"), "Fonts.v2/Title");
    }
}
