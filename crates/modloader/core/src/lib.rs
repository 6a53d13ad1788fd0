//! Identity model shared by the loader crates.
//!
//! `modloader-core` defines the numeric ID spaces and their allocator, the
//! capability traits module content implements, module metadata, and the
//! errors raised while registering content. It performs no I/O; the asset
//! cache lives in `modloader-assets` and the registry in `runtime`.
pub mod category;
pub mod content;
pub mod discovery;
pub mod error;
pub mod hooks;
pub mod ids;
pub mod module;

pub use category::{ContentCategory, EquipType, MountTextureType, SoundType};
pub use content::{
    BuffDefaults, DrawAnimation, EquipTextures, GlobalBgStyle, GlobalBuff, GlobalItem, GlobalNpc,
    GlobalProjectile, GlobalTile, GlobalWall, HOOK_AI_STYLE, ItemDefaults, ModBuff, ModDust,
    ModGore, ModItem, ModMount, ModNpc, ModPlayer, ModProjectile, ModSound, ModSurfaceBgStyle,
    ModTile, ModTileEntity, ModUgBgStyle, ModWall, ModWaterStyle, ModWaterfallStyle, ModWorld,
    MountData, NpcDefaults, ProjectileDefaults, SoundInstance, TileDefaults, WallDefaults,
};
pub use discovery::{ContentFactory, ContentType, Factory};
pub use error::{MusicBoxError, RegistryError};
pub use hooks::{HookName, HookOwner, HookVersion, RETIRED_HOOKS, RetiredHook, check_hooks};
pub use ids::{EquipCounts, IdAllocator, IdSpace, SoundCounts, VanillaCounts};
pub use module::{LoaderSettings, ModProperties, ModSide, ModuleInfo, ParseVersionError, Version};

/// Height in pixels of one music-box frame; tile Y-frames must be multiples.
pub const MUSIC_BOX_FRAME_HEIGHT: u32 = 36;
