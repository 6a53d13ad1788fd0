//! Errors surfaced by the module lifecycle.
//!
//! Registry and asset failures pass through unchanged, so callers can match
//! on the underlying kind.
use modloader_assets::AssetError;
use modloader_core::RegistryError;
use thiserror::Error;

use crate::loader::ModState;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("module '{0}' is already loaded")]
    DuplicateModule(String),

    #[error("module '{0}' is not loaded")]
    UnknownModule(String),

    #[error("module '{module}' is {state}; cannot {operation}")]
    InvalidState {
        module: String,
        state: ModState,
        operation: &'static str,
    },
}
