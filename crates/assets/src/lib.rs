//! Asset resolution for loaded modules.
//!
//! A module ships an archive ([`ModArchive`]); at load time [`AssetLoader`]
//! classifies its files by extension and decodes them into a per-module
//! [`AssetCache`]. Compressed audio and fonts go through the version-keyed
//! [`DiskCache`]. Decoding itself is delegated to the host's
//! [`AssetDecoder`]; the `decoders` feature provides [`StandardDecoder`].
pub mod archive;
pub mod asset;
pub mod cache;
pub mod disk;
pub mod error;
pub mod loader;
#[cfg(feature = "decoders")]
pub mod standard;

pub use archive::{DirectoryArchive, MemoryArchive, ModArchive};
pub use asset::{AssetDecoder, AssetKind, Font, Sound, Texture, logical_name};
pub use cache::AssetCache;
pub use disk::DiskCache;
pub use error::{AssetError, Result};
pub use loader::AssetLoader;
#[cfg(feature = "decoders")]
pub use standard::StandardDecoder;
