//! Content registry and module lifecycle for the mod loader.
//!
//! [`ModLoader`] drives each module through discovery, registration, setup
//! and unload. Modules register content through [`ModContext`]; the
//! [`Registry`] owns every descriptor and secondary table, and setup binds
//! them into the host's [`HostTables`].
//!
//! Modules are organized by responsibility:
//! - [`loader`] hosts the lifecycle and the [`ModState`] machine
//! - [`context`] is the registration surface handed to [`Mod::load`]
//! - [`registry`] holds per-category tables and cross-referenced slot tables
//! - [`resources`] resolves asset names across loaded modules
//! - [`host`] is the in-process stand-in for the host's flat content arrays
pub mod context;
pub mod error;
pub mod host;
pub mod loader;
pub mod modding;
pub mod registry;
pub mod resources;

mod autoload;
mod setup;

pub use context::ModContext;
pub use error::{LoadError, Result};
pub use host::{
    BoundTexture, BuffSlot, HostTables, ItemSlot, LiquidSlot, MountSlot, NpcSlot, ProjectileSlot,
    SlotVec, TileSlot, WallSlot,
};
pub use loader::{LoadedModule, ModLoader, ModSource, ModState};
pub use modding::Mod;
pub use registry::{
    ContentTable, Descriptor, EquipTable, EquipTexture, GoreHook, HookEntry, HookList, ItemMeta,
    MountMeta, MusicBox, MusicBoxTable, NamedSlots, NpcMeta, Registry, SlotEntry, SoundBinding,
    WaterMeta,
};
pub use resources::{ModuleAssets, Resources};
