//! Secondary slot tables: equip textures, named slots (gores, sounds,
//! backgrounds, head icons) and music-box bindings.

use std::collections::BTreeMap;

use modloader_core::{EquipType, MusicBoxError, RegistryError};

/// A slot registered under a module-qualified name (`Foo/Gores/Explosion`).
#[derive(Debug)]
pub struct SlotEntry<V> {
    pub module: String,
    pub slot: u32,
    pub value: V,
}

/// Slots keyed by qualified name.
#[derive(Debug)]
pub struct NamedSlots<V> {
    label: &'static str,
    entries: BTreeMap<String, SlotEntry<V>>,
}

impl<V> NamedSlots<V> {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn ensure_vacant(&self, module: &str, name: &str) -> Result<(), RegistryError> {
        if self.entries.contains_key(name) {
            return Err(RegistryError::DuplicateName {
                table: self.label,
                module: module.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, module: &str, name: String, slot: u32, value: V) {
        self.entries.insert(
            name,
            SlotEntry {
                module: module.to_string(),
                slot,
                value,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&SlotEntry<V>> {
        self.entries.get(name)
    }

    pub fn slot(&self, name: &str) -> Option<u32> {
        self.entries.get(name).map(|entry| entry.slot)
    }

    pub fn by_slot(&self, slot: u32) -> Option<(&str, &SlotEntry<V>)> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.slot == slot)
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotEntry<V>)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub(crate) fn remove_module(&mut self, module: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.module != module);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Texture rendered into one body slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipTexture {
    pub module: String,
    pub name: String,
    pub equip_type: EquipType,
    pub slot: u32,
    pub texture: String,
    /// Owning item type, when registered for an item.
    pub item: Option<u32>,
    /// Body slots only.
    pub arm_texture: Option<String>,
    /// Body slots only; falls back to the body texture.
    pub female_texture: Option<String>,
}

type EquipKey = (String, String, EquipType);

#[derive(Debug, Default)]
pub struct EquipTable {
    by_slot: BTreeMap<(EquipType, u32), EquipTexture>,
    by_name: BTreeMap<EquipKey, u32>,
    slot_to_item: BTreeMap<(EquipType, u32), u32>,
    item_slots: BTreeMap<u32, BTreeMap<EquipType, u32>>,
}

impl EquipTable {
    pub(crate) fn ensure_vacant(
        &self,
        module: &str,
        name: &str,
        equip_type: EquipType,
    ) -> Result<(), RegistryError> {
        let key = (module.to_string(), name.to_string(), equip_type);
        if self.by_name.contains_key(&key) {
            return Err(RegistryError::DuplicateName {
                table: "equip texture",
                module: module.to_string(),
                name: format!("{name} ({equip_type})"),
            });
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, equip: EquipTexture) {
        let slot_key = (equip.equip_type, equip.slot);
        if let Some(item) = equip.item {
            self.item_slots
                .entry(item)
                .or_default()
                .insert(equip.equip_type, equip.slot);
            if equip.equip_type.is_armor() {
                self.slot_to_item.insert(slot_key, item);
            }
        }
        self.by_name.insert(
            (equip.module.clone(), equip.name.clone(), equip.equip_type),
            equip.slot,
        );
        self.by_slot.insert(slot_key, equip);
    }

    pub fn get(&self, module: &str, name: &str, equip_type: EquipType) -> Option<&EquipTexture> {
        let slot = self.slot(module, name, equip_type)?;
        self.by_slot.get(&(equip_type, slot))
    }

    pub fn slot(&self, module: &str, name: &str, equip_type: EquipType) -> Option<u32> {
        self.by_name
            .get(&(module.to_string(), name.to_string(), equip_type))
            .copied()
    }

    pub fn by_slot(&self, equip_type: EquipType, slot: u32) -> Option<&EquipTexture> {
        self.by_slot.get(&(equip_type, slot))
    }

    /// Item owning an armor slot.
    pub fn item_for_slot(&self, equip_type: EquipType, slot: u32) -> Option<u32> {
        self.slot_to_item.get(&(equip_type, slot)).copied()
    }

    /// Every slot bound to an item, by equip type.
    pub fn item_slots(&self, item: u32) -> Option<&BTreeMap<EquipType, u32>> {
        self.item_slots.get(&item)
    }

    pub(crate) fn remove_module(&mut self, module: &str) -> usize {
        let removed: Vec<EquipTexture> = self
            .by_slot
            .values()
            .filter(|equip| equip.module == module)
            .cloned()
            .collect();

        for equip in &removed {
            let slot_key = (equip.equip_type, equip.slot);
            self.by_slot.remove(&slot_key);
            self.slot_to_item.remove(&slot_key);
            self.by_name
                .remove(&(equip.module.clone(), equip.name.clone(), equip.equip_type));
            if let Some(item) = equip.item
                && let Some(slots) = self.item_slots.get_mut(&item)
            {
                slots.remove(&equip.equip_type);
                if slots.is_empty() {
                    self.item_slots.remove(&item);
                }
            }
        }
        removed.len()
    }

    pub fn len(&self) -> usize {
        self.by_slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }
}

/// One committed music-box binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MusicBox {
    pub module: String,
    pub music: u32,
    pub item: u32,
    pub tile: u32,
    pub frame_y: u32,
}

/// Three-way music ↔ item ↔ (tile, frame) association, unique per axis.
#[derive(Debug, Default)]
pub struct MusicBoxTable {
    music_to_item: BTreeMap<u32, u32>,
    item_to_music: BTreeMap<u32, u32>,
    tile_to_music: BTreeMap<u32, BTreeMap<u32, u32>>,
    boxes: Vec<MusicBox>,
}

impl MusicBoxTable {
    pub(crate) fn check_unique(
        &self,
        music: u32,
        item: u32,
        tile: u32,
        frame_y: u32,
    ) -> Result<(), MusicBoxError> {
        if self.music_to_item.contains_key(&music) {
            return Err(MusicBoxError::MusicTaken(music));
        }
        if self.item_to_music.contains_key(&item) {
            return Err(MusicBoxError::ItemTaken(item));
        }
        if self
            .tile_to_music
            .get(&tile)
            .is_some_and(|frames| frames.contains_key(&frame_y))
        {
            return Err(MusicBoxError::FrameTaken { tile, frame_y });
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, music_box: MusicBox) {
        self.music_to_item.insert(music_box.music, music_box.item);
        self.item_to_music.insert(music_box.item, music_box.music);
        self.tile_to_music
            .entry(music_box.tile)
            .or_default()
            .insert(music_box.frame_y, music_box.music);
        self.boxes.push(music_box);
    }

    pub fn item_for_music(&self, music: u32) -> Option<u32> {
        self.music_to_item.get(&music).copied()
    }

    pub fn music_for_item(&self, item: u32) -> Option<u32> {
        self.item_to_music.get(&item).copied()
    }

    pub fn music_for_tile(&self, tile: u32, frame_y: u32) -> Option<u32> {
        self.tile_to_music.get(&tile)?.get(&frame_y).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MusicBox> {
        self.boxes.iter()
    }

    pub(crate) fn remove_module(&mut self, module: &str) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.boxes)
            .into_iter()
            .partition(|music_box| music_box.module == module);

        *self = Self::default();
        for music_box in kept {
            self.insert(music_box);
        }
        removed.len()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
