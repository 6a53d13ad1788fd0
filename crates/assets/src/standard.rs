//! Standard decoders: PNG through `image`, WAV and MP3 through `kira`.

use std::io::Cursor;

use kira::sound::static_sound::StaticSoundData;

use crate::asset::{AssetDecoder, Sound, Texture};
use crate::error::{AssetError, Result};

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDecoder;

impl StandardDecoder {
    fn decode_audio(path: &str, bytes: &[u8]) -> Result<Sound> {
        let data = StaticSoundData::from_cursor(Cursor::new(bytes.to_vec()))
            .map_err(|e| AssetError::decode(path, e))?;

        let samples = data
            .frames
            .iter()
            .flat_map(|frame| [frame.left, frame.right])
            .collect();

        Ok(Sound {
            sample_rate: data.sample_rate,
            channels: 2,
            samples,
        })
    }
}

impl AssetDecoder for StandardDecoder {
    fn decode_texture(&self, name: &str, bytes: &[u8]) -> Result<Texture> {
        let image = image::load_from_memory(bytes).map_err(|e| AssetError::decode(name, e))?;
        let rgba = image.to_rgba8();

        Ok(Texture {
            name: name.to_string(),
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    fn decode_sound(&self, path: &str, bytes: &[u8]) -> Result<Sound> {
        Self::decode_audio(path, bytes)
    }

    fn decode_compressed(&self, path: &str, bytes: &[u8]) -> Result<Sound> {
        Self::decode_audio(path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let texture = StandardDecoder
            .decode_texture("Foo/Items/Sword", &png(3, 2))
            .unwrap();

        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.rgba.len(), 3 * 2 * 4);
        assert_eq!(&texture.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = StandardDecoder.decode_texture("Foo/Bad", b"nope").unwrap_err();
        assert!(matches!(err, AssetError::Decode { path, .. } if path == "Foo/Bad"));

        let err = StandardDecoder.decode_sound("Sounds/Bad.wav", b"nope").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }
}
