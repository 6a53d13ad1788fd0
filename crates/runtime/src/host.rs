//! In-process stand-in for the host game's flat content tables.
//!
//! Setup writes one slot per registered descriptor, indexed by its ID.
//! Unload never touches these tables; the host clears them in its own reload
//! cycle through [`HostTables::reset_modded`].

use std::collections::BTreeMap;
use std::sync::Arc;

use modloader_assets::Texture;
use modloader_core::{
    BuffDefaults, DrawAnimation, ItemDefaults, MountData, MountTextureType, NpcDefaults,
    ProjectileDefaults, TileDefaults, VanillaCounts, WallDefaults,
};

/// A bound texture; `None` in headless mode.
pub type BoundTexture = Option<Arc<Texture>>;

/// Table indexed by ID that grows on write.
#[derive(Clone, Debug)]
pub struct SlotVec<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for SlotVec<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> SlotVec<T> {
    pub fn set(&mut self, id: u32, value: T) {
        let index = id as usize;
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(value);
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    /// Length of the backing array; every written ID is below it.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of written slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|value| (id as u32, value)))
    }

    /// Drops every slot at or above `base`.
    pub fn truncate(&mut self, base: u32) {
        self.slots.truncate(base as usize);
    }
}

#[derive(Clone, Debug)]
pub struct ItemSlot {
    pub name: String,
    pub texture: BoundTexture,
    pub defaults: ItemDefaults,
    pub animation: Option<DrawAnimation>,
    pub flame_texture: BoundTexture,
}

#[derive(Clone, Debug)]
pub struct TileSlot {
    pub texture: BoundTexture,
    pub defaults: TileDefaults,
}

#[derive(Clone, Debug)]
pub struct WallSlot {
    pub texture: BoundTexture,
    pub defaults: WallDefaults,
}

#[derive(Clone, Debug)]
pub struct ProjectileSlot {
    pub texture: BoundTexture,
    pub defaults: ProjectileDefaults,
    pub frames: u32,
    pub hostile: bool,
    /// Grappling hook (AI style 7).
    pub hook: bool,
}

#[derive(Clone, Debug)]
pub struct NpcSlot {
    pub name: String,
    pub texture: BoundTexture,
    pub defaults: NpcDefaults,
    pub life_bytes: u8,
    /// `extra_texture_count + 1` entries; slot 0 is the main texture when
    /// the NPC has alternates, otherwise the array is empty.
    pub alt_textures: Vec<BoundTexture>,
}

#[derive(Clone, Debug)]
pub struct BuffSlot {
    pub name: String,
    pub texture: BoundTexture,
    pub defaults: BuffDefaults,
}

#[derive(Clone, Debug)]
pub struct MountSlot {
    pub texture: BoundTexture,
    pub data: MountData,
    pub extra_textures: BTreeMap<MountTextureType, BoundTexture>,
}

#[derive(Clone, Debug)]
pub struct LiquidSlot {
    pub texture: BoundTexture,
    pub block_texture: BoundTexture,
}

/// Host arrays written by setup.
#[derive(Clone, Debug, Default)]
pub struct HostTables {
    pub items: SlotVec<ItemSlot>,
    pub dust_textures: SlotVec<BoundTexture>,
    pub tiles: SlotVec<TileSlot>,
    pub walls: SlotVec<WallSlot>,
    pub projectiles: SlotVec<ProjectileSlot>,
    pub npcs: SlotVec<NpcSlot>,
    /// Banner ID to the item that places it.
    pub banner_to_item: BTreeMap<i32, i32>,
    pub buffs: SlotVec<BuffSlot>,
    pub mounts: SlotVec<MountSlot>,
    mount_table_sized: bool,
    pub liquids: SlotVec<LiquidSlot>,
    pub waterfalls: SlotVec<BoundTexture>,
}

impl HostTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the mount table has been sized for modded mounts.
    pub fn mount_table_sized(&self) -> bool {
        self.mount_table_sized
    }

    /// Sizes the mount table once; later calls are no-ops.
    pub(crate) fn ensure_mount_table(&mut self, vanilla_mounts: u32) -> bool {
        if self.mount_table_sized {
            return false;
        }
        self.mounts.truncate(vanilla_mounts);
        self.mount_table_sized = true;
        true
    }

    /// Drops every modded slot, leaving the vanilla ranges.
    pub fn reset_modded(&mut self, vanilla: &VanillaCounts) {
        self.items.truncate(vanilla.items);
        self.dust_textures.truncate(vanilla.dusts);
        self.tiles.truncate(vanilla.tiles);
        self.walls.truncate(vanilla.walls);
        self.projectiles.truncate(vanilla.projectiles);
        self.npcs.truncate(vanilla.npcs);
        self.banner_to_item.clear();
        self.buffs.truncate(vanilla.buffs);
        self.mounts.truncate(vanilla.mounts);
        self.mount_table_sized = false;
        self.liquids.truncate(vanilla.water_styles);
        self.waterfalls.truncate(vanilla.waterfall_styles);
    }
}
