//! Error types raised by archives, the asset cache and the disk caches.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing resource: {0}")]
    MissingResource(String),

    #[error("resource already exists: {0}")]
    DuplicateResource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode '{path}': {reason}")]
    Decode { path: String, reason: String },

    #[error("cache error: {0}")]
    Cache(String),
}

impl AssetError {
    pub(crate) fn decode(path: impl Into<String>, reason: impl ToString) -> Self {
        AssetError::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;
