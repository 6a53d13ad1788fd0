//! Registry error types.
//!
//! Every variant here aborts the current module's load. None of them leave
//! entries behind in other modules' tables, because rollback is scoped to the
//! failing module.

/// Errors raised while registering content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(
        "module '{module}' registered two {table} entries named '{name}'; two types may share \
         a simple name across namespaces, or the same name was registered manually twice"
    )]
    DuplicateName {
        table: &'static str,
        module: String,
        name: String,
    },

    #[error("module '{module}' has no {table} named '{name}'")]
    UnknownContent {
        table: &'static str,
        module: String,
        name: String,
    },

    #[error("{hook} uses a retired hook signature and must be migrated")]
    DeprecatedHook { hook: String },

    #[error(transparent)]
    MusicBox(#[from] MusicBoxError),
}

/// Music-box binding validation failures.
///
/// Every check runs before anything is committed, so a failed call leaves the
/// binding tables untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MusicBoxError {
    #[error("cannot assign music box to vanilla music ID {0}")]
    VanillaMusic(u32),

    #[error("music ID {0} does not exist")]
    UnknownMusic(u32),

    #[error("cannot assign music box to vanilla item ID {0}")]
    VanillaItem(u32),

    #[error("item ID {0} does not exist")]
    UnknownItem(u32),

    #[error("cannot assign music box to vanilla tile ID {0}")]
    VanillaTile(u32),

    #[error("tile ID {0} does not exist")]
    UnknownTile(u32),

    #[error("music ID {0} has already been assigned a music box")]
    MusicTaken(u32),

    #[error("item ID {0} has already been assigned a music")]
    ItemTaken(u32),

    #[error("Y-frame {frame_y} of tile type {tile} has already been assigned a music")]
    FrameTaken { tile: u32, frame_y: u32 },

    #[error("Y-frame {0} must be divisible by 36")]
    FrameAlignment(u32),
}
