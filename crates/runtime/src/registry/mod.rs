//! Content registry: every table a loaded module can register into.
//!
//! One [`Registry`] value replaces the host's process-wide static tables.
//! Content tables key descriptors by `(module, name)`; hook lists keep
//! registration order; slot tables cover equip textures, head icons, gores,
//! sounds, backgrounds and music boxes. Unloading a module removes its
//! entries everywhere, but IDs it reserved are never handed out again until
//! [`Registry::reset`].

mod slots;
mod table;

pub use slots::{EquipTable, EquipTexture, MusicBox, MusicBoxTable, NamedSlots, SlotEntry};
pub use table::{ContentTable, Descriptor, HookEntry, HookList};

use std::collections::BTreeMap;
use std::sync::Arc;

use modloader_assets::Sound;
use modloader_core::{
    ContentCategory, GlobalBgStyle, GlobalBuff, GlobalItem, GlobalNpc, GlobalProjectile,
    GlobalTile, GlobalWall, IdAllocator, IdSpace, MUSIC_BOX_FRAME_HEIGHT, ModBuff, ModDust,
    ModGore, ModItem, ModMount, ModNpc, ModPlayer, ModProjectile, ModSound, ModSurfaceBgStyle,
    ModTile, ModTileEntity, ModUgBgStyle, ModWall, ModWaterStyle, ModWaterfallStyle, ModWorld,
    MountTextureType, MusicBoxError, RegistryError, SoundType, VanillaCounts,
};
use tracing::{debug, info};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemMeta {
    pub flame_texture: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NpcMeta {
    pub alt_textures: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountMeta {
    pub extra_textures: BTreeMap<MountTextureType, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaterMeta {
    pub block_texture: Option<String>,
}

/// A sound slot: the loaded sound (absent when decoding failed or in
/// headless mode) and the optional playback hook.
pub struct SoundBinding {
    pub sound: Option<Arc<Sound>>,
    pub hook: Option<Box<dyn ModSound>>,
}

pub type GoreHook = Option<Box<dyn ModGore>>;

pub struct Registry {
    pub(crate) ids: IdAllocator,

    pub items: ContentTable<dyn ModItem, ItemMeta>,
    pub dusts: ContentTable<dyn ModDust>,
    pub tiles: ContentTable<dyn ModTile>,
    pub tile_entities: ContentTable<dyn ModTileEntity>,
    pub walls: ContentTable<dyn ModWall>,
    pub projectiles: ContentTable<dyn ModProjectile>,
    pub npcs: ContentTable<dyn ModNpc, NpcMeta>,
    pub buffs: ContentTable<dyn ModBuff>,
    pub mounts: ContentTable<dyn ModMount, MountMeta>,
    pub ug_bg_styles: ContentTable<dyn ModUgBgStyle>,
    pub surface_bg_styles: ContentTable<dyn ModSurfaceBgStyle>,
    pub water_styles: ContentTable<dyn ModWaterStyle, WaterMeta>,
    pub waterfall_styles: ContentTable<dyn ModWaterfallStyle>,

    pub global_items: HookList<dyn GlobalItem>,
    pub global_tiles: HookList<dyn GlobalTile>,
    pub global_walls: HookList<dyn GlobalWall>,
    pub global_projectiles: HookList<dyn GlobalProjectile>,
    pub global_npcs: HookList<dyn GlobalNpc>,
    pub global_buffs: HookList<dyn GlobalBuff>,
    pub global_bg_styles: HookList<dyn GlobalBgStyle>,
    pub players: HookList<dyn ModPlayer>,
    pub worlds: HookList<dyn ModWorld>,

    pub equips: EquipTable,
    /// Keyed by texture; the value is the NPC type the head belongs to.
    pub npc_heads: NamedSlots<Option<u32>>,
    pub boss_heads: NamedSlots<Option<u32>>,
    pub gores: NamedSlots<GoreHook>,
    pub sounds: BTreeMap<SoundType, NamedSlots<SoundBinding>>,
    pub backgrounds: NamedSlots<()>,
    pub music_boxes: MusicBoxTable,
    /// `(module, item type)` of every quest fish, in registration order.
    pub quest_fish: Vec<(String, u32)>,
}

impl Registry {
    pub fn new(vanilla: VanillaCounts) -> Self {
        Self {
            ids: IdAllocator::new(vanilla),
            items: ContentTable::new("item"),
            dusts: ContentTable::new("dust"),
            tiles: ContentTable::new("tile"),
            tile_entities: ContentTable::new("tile entity"),
            walls: ContentTable::new("wall"),
            projectiles: ContentTable::new("projectile"),
            npcs: ContentTable::new("npc"),
            buffs: ContentTable::new("buff"),
            mounts: ContentTable::new("mount"),
            ug_bg_styles: ContentTable::new("underground background style"),
            surface_bg_styles: ContentTable::new("surface background style"),
            water_styles: ContentTable::new("water style"),
            waterfall_styles: ContentTable::new("waterfall style"),
            global_items: HookList::new("global item"),
            global_tiles: HookList::new("global tile"),
            global_walls: HookList::new("global wall"),
            global_projectiles: HookList::new("global projectile"),
            global_npcs: HookList::new("global npc"),
            global_buffs: HookList::new("global buff"),
            global_bg_styles: HookList::new("global background style"),
            players: HookList::new("player"),
            worlds: HookList::new("world"),
            equips: EquipTable::default(),
            npc_heads: NamedSlots::new("npc head"),
            boss_heads: NamedSlots::new("boss head"),
            gores: NamedSlots::new("gore"),
            sounds: BTreeMap::new(),
            backgrounds: NamedSlots::new("background"),
            music_boxes: MusicBoxTable::default(),
            quest_fish: Vec::new(),
        }
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn vanilla(&self) -> &VanillaCounts {
        self.ids.vanilla()
    }

    /// Total slots of a sound type, vanilla included.
    pub fn sound_count(&self, sound_type: SoundType) -> u32 {
        self.ids.count(IdSpace::Sound(sound_type))
    }

    pub fn sound_slots(&self, sound_type: SoundType) -> Option<&NamedSlots<SoundBinding>> {
        self.sounds.get(&sound_type)
    }

    pub(crate) fn sound_slots_mut(&mut self, sound_type: SoundType) -> &mut NamedSlots<SoundBinding> {
        self.sounds
            .entry(sound_type)
            .or_insert_with(|| NamedSlots::new("sound"))
    }

    /// Head slot registered for an NPC type.
    pub fn npc_head_slot(&self, npc_type: u32) -> Option<u32> {
        self.npc_heads
            .iter()
            .find(|(_, entry)| entry.value == Some(npc_type))
            .map(|(_, entry)| entry.slot)
    }

    pub fn boss_head_slot(&self, npc_type: u32) -> Option<u32> {
        self.boss_heads
            .iter()
            .find(|(_, entry)| entry.value == Some(npc_type))
            .map(|(_, entry)| entry.slot)
    }

    /// Reserves an ID and stores a descriptor in `table`.
    ///
    /// The name is checked before reserving, so a duplicate consumes no ID.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn register<T: ?Sized, M>(
        ids: &mut IdAllocator,
        table: &mut ContentTable<T, M>,
        category: ContentCategory,
        module: &str,
        name: &str,
        texture: Option<String>,
        meta: M,
        content: Box<T>,
    ) -> Result<u32, RegistryError> {
        table.ensure_vacant(module, name)?;
        let id = ids.reserve(IdSpace::Content(category));
        table.insert(Descriptor {
            module: module.to_string(),
            name: name.to_string(),
            id,
            texture,
            meta,
            content,
        })?;

        debug!(
            target: "modloader::registry",
            module,
            name,
            id,
            table = table.label(),
            "registered content"
        );
        Ok(id)
    }

    /// Validates and commits a music-box binding.
    ///
    /// Checks run in a fixed order and nothing is written unless all pass.
    pub fn add_music_box(
        &mut self,
        module: &str,
        music: u32,
        item: u32,
        tile: u32,
        frame_y: u32,
    ) -> Result<(), RegistryError> {
        let vanilla = self.ids.vanilla();

        if music < vanilla.music {
            return Err(MusicBoxError::VanillaMusic(music).into());
        }
        if music >= self.sound_count(SoundType::Music) {
            return Err(MusicBoxError::UnknownMusic(music).into());
        }
        if item < vanilla.items {
            return Err(MusicBoxError::VanillaItem(item).into());
        }
        if self.items.by_id(item).is_none() {
            return Err(MusicBoxError::UnknownItem(item).into());
        }
        if tile < vanilla.tiles {
            return Err(MusicBoxError::VanillaTile(tile).into());
        }
        if self.tiles.by_id(tile).is_none() {
            return Err(MusicBoxError::UnknownTile(tile).into());
        }
        self.music_boxes.check_unique(music, item, tile, frame_y)?;
        if frame_y % MUSIC_BOX_FRAME_HEIGHT != 0 {
            return Err(MusicBoxError::FrameAlignment(frame_y).into());
        }

        self.music_boxes.insert(MusicBox {
            module: module.to_string(),
            music,
            item,
            tile,
            frame_y,
        });
        debug!(target: "modloader::registry", module, music, item, tile, frame_y, "added music box");
        Ok(())
    }

    /// Removes every entry `module` owns, in every table.
    ///
    /// Returns how many entries were removed. Reserved IDs stay consumed.
    pub fn unload_module(&mut self, module: &str) -> usize {
        let mut removed = 0;

        removed += self.items.remove_module(module);
        removed += self.dusts.remove_module(module);
        removed += self.tiles.remove_module(module);
        removed += self.tile_entities.remove_module(module);
        removed += self.walls.remove_module(module);
        removed += self.projectiles.remove_module(module);
        removed += self.npcs.remove_module(module);
        removed += self.buffs.remove_module(module);
        removed += self.mounts.remove_module(module);
        removed += self.ug_bg_styles.remove_module(module);
        removed += self.surface_bg_styles.remove_module(module);
        removed += self.water_styles.remove_module(module);
        removed += self.waterfall_styles.remove_module(module);

        removed += self.global_items.remove_module(module);
        removed += self.global_tiles.remove_module(module);
        removed += self.global_walls.remove_module(module);
        removed += self.global_projectiles.remove_module(module);
        removed += self.global_npcs.remove_module(module);
        removed += self.global_buffs.remove_module(module);
        removed += self.global_bg_styles.remove_module(module);
        removed += self.players.remove_module(module);
        removed += self.worlds.remove_module(module);

        removed += self.equips.remove_module(module);
        removed += self.npc_heads.remove_module(module);
        removed += self.boss_heads.remove_module(module);
        removed += self.gores.remove_module(module);
        for slots in self.sounds.values_mut() {
            removed += slots.remove_module(module);
        }
        removed += self.backgrounds.remove_module(module);
        removed += self.music_boxes.remove_module(module);

        let before = self.quest_fish.len();
        self.quest_fish.retain(|(owner, _)| owner != module);
        removed += before - self.quest_fish.len();

        debug!(target: "modloader::registry", module, removed, "unloaded module entries");
        removed
    }

    /// Clears every table and rewinds every ID counter to its vanilla base.
    pub fn reset(&mut self) {
        *self = Self::new(self.ids.vanilla().clone());
        info!(target: "modloader::registry", "registry reset");
    }

    /// Number of descriptors with IDs, across every content table.
    pub fn content_len(&self) -> usize {
        self.items.len()
            + self.dusts.len()
            + self.tiles.len()
            + self.tile_entities.len()
            + self.walls.len()
            + self.projectiles.len()
            + self.npcs.len()
            + self.buffs.len()
            + self.mounts.len()
            + self.ug_bg_styles.len()
            + self.surface_bg_styles.len()
            + self.water_styles.len()
            + self.waterfall_styles.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(VanillaCounts::default())
    }
}
