//! Numeric ID spaces and the monotonic allocator that hands out modded IDs.
//!
//! Vanilla content occupies `0..count` of every space; modded content is
//! allocated upwards from the vanilla count. Counters never rewind while the
//! allocator lives, so unloading a module never frees an ID for reuse. Only
//! [`IdAllocator::reset`] (a full registry reset) rewinds them.
//!
//! ID `0` is reserved as the "no such content" sentinel and is never handed
//! out, even in spaces whose vanilla count is zero.

use std::collections::HashMap;

use crate::category::{ContentCategory, EquipType, SoundType};

/// An independent numeric ID space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdSpace {
    Content(ContentCategory),
    Equip(EquipType),
    Sound(SoundType),
    Gore,
    Background,
    NpcHead,
    BossHead,
}

impl std::fmt::Display for IdSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdSpace::Content(category) => write!(f, "{}", category),
            IdSpace::Equip(equip) => write!(f, "equip:{}", equip),
            IdSpace::Sound(sound) => write!(f, "sound:{}", sound),
            IdSpace::Gore => f.write_str("gore"),
            IdSpace::Background => f.write_str("background"),
            IdSpace::NpcHead => f.write_str("npc_head"),
            IdSpace::BossHead => f.write_str("boss_head"),
        }
    }
}

/// Vanilla content counts per ID space.
///
/// These are fixed constants defined by the host game. The defaults match the
/// host build this loader targets; hosts with different tables override them
/// through [`crate::LoaderSettings`]. Range checks compare against these
/// values as-is and never re-derive them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VanillaCounts {
    pub items: u32,
    pub dusts: u32,
    pub tiles: u32,
    pub tile_entities: u32,
    pub walls: u32,
    pub projectiles: u32,
    pub npcs: u32,
    pub buffs: u32,
    pub mounts: u32,
    pub ug_bg_styles: u32,
    pub surface_bg_styles: u32,
    pub water_styles: u32,
    pub waterfall_styles: u32,
    pub gores: u32,
    pub backgrounds: u32,
    pub npc_heads: u32,
    pub boss_heads: u32,
    /// Highest vanilla music slot plus one.
    pub music: u32,
    pub equips: EquipCounts,
    pub sounds: SoundCounts,
}

impl Default for VanillaCounts {
    fn default() -> Self {
        Self {
            items: 3930,
            dusts: 275,
            tiles: 470,
            tile_entities: 3,
            walls: 231,
            projectiles: 714,
            npcs: 580,
            buffs: 206,
            mounts: 15,
            ug_bg_styles: 18,
            surface_bg_styles: 14,
            water_styles: 12,
            waterfall_styles: 22,
            gores: 1087,
            backgrounds: 207,
            npc_heads: 25,
            boss_heads: 37,
            music: 42,
            equips: EquipCounts::default(),
            sounds: SoundCounts::default(),
        }
    }
}

impl VanillaCounts {
    /// Vanilla count for a content category.
    pub fn content(&self, category: ContentCategory) -> u32 {
        match category {
            ContentCategory::Item => self.items,
            ContentCategory::Dust => self.dusts,
            ContentCategory::Tile => self.tiles,
            ContentCategory::TileEntity => self.tile_entities,
            ContentCategory::Wall => self.walls,
            ContentCategory::Projectile => self.projectiles,
            ContentCategory::Npc => self.npcs,
            ContentCategory::Buff => self.buffs,
            ContentCategory::Mount => self.mounts,
            ContentCategory::UgBgStyle => self.ug_bg_styles,
            ContentCategory::SurfaceBgStyle => self.surface_bg_styles,
            ContentCategory::WaterStyle => self.water_styles,
            ContentCategory::WaterfallStyle => self.waterfall_styles,
        }
    }

    /// Vanilla count for any ID space.
    pub fn count(&self, space: IdSpace) -> u32 {
        match space {
            IdSpace::Content(category) => self.content(category),
            IdSpace::Equip(equip) => self.equips.get(equip),
            IdSpace::Sound(sound) => self.sounds.get(sound),
            IdSpace::Gore => self.gores,
            IdSpace::Background => self.backgrounds,
            IdSpace::NpcHead => self.npc_heads,
            IdSpace::BossHead => self.boss_heads,
        }
    }

    /// First ID the allocator hands out for `space`.
    pub fn base(&self, space: IdSpace) -> u32 {
        self.count(space).max(1)
    }
}

/// Vanilla slot counts per equip type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipCounts {
    pub head: u32,
    pub body: u32,
    pub legs: u32,
    pub hands_on: u32,
    pub hands_off: u32,
    pub back: u32,
    pub front: u32,
    pub shoe: u32,
    pub waist: u32,
    pub wings: u32,
    pub shield: u32,
    pub neck: u32,
    pub face: u32,
    pub balloon: u32,
}

impl Default for EquipCounts {
    fn default() -> Self {
        Self {
            head: 216,
            body: 210,
            legs: 161,
            hands_on: 20,
            hands_off: 12,
            back: 11,
            front: 5,
            shoe: 18,
            waist: 13,
            wings: 40,
            shield: 7,
            neck: 10,
            face: 9,
            balloon: 18,
        }
    }
}

impl EquipCounts {
    pub fn get(&self, equip: EquipType) -> u32 {
        match equip {
            EquipType::Head => self.head,
            EquipType::Body => self.body,
            EquipType::Legs => self.legs,
            EquipType::HandsOn => self.hands_on,
            EquipType::HandsOff => self.hands_off,
            EquipType::Back => self.back,
            EquipType::Front => self.front,
            EquipType::Shoe => self.shoe,
            EquipType::Waist => self.waist,
            EquipType::Wings => self.wings,
            EquipType::Shield => self.shield,
            EquipType::Neck => self.neck,
            EquipType::Face => self.face,
            EquipType::Balloon => self.balloon,
        }
    }
}

/// Vanilla slot counts per sound type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoundCounts {
    pub custom: u32,
    pub item: u32,
    pub npc_hit: u32,
    pub npc_killed: u32,
    pub music: u32,
}

impl Default for SoundCounts {
    fn default() -> Self {
        Self {
            custom: 0,
            item: 126,
            npc_hit: 58,
            npc_killed: 63,
            music: 42,
        }
    }
}

impl SoundCounts {
    pub fn get(&self, sound: SoundType) -> u32 {
        match sound {
            SoundType::Custom => self.custom,
            SoundType::Item => self.item,
            SoundType::NPCHit => self.npc_hit,
            SoundType::NPCKilled => self.npc_killed,
            SoundType::Music => self.music,
        }
    }
}

/// Monotonic per-space ID counters.
///
/// Requires `&mut self` for every reservation, so the borrow checker enforces
/// the single-writer discipline the load phase relies on.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    vanilla: VanillaCounts,
    next: HashMap<IdSpace, u32>,
}

impl IdAllocator {
    pub fn new(vanilla: VanillaCounts) -> Self {
        Self {
            vanilla,
            next: HashMap::new(),
        }
    }

    /// Reserves the next unused ID in `space`.
    pub fn reserve(&mut self, space: IdSpace) -> u32 {
        let base = self.vanilla.base(space);
        let next = self.next.entry(space).or_insert(base);
        let id = *next;
        *next += 1;
        id
    }

    /// Total number of IDs in `space`, vanilla included.
    ///
    /// Every valid ID is strictly below this value.
    pub fn count(&self, space: IdSpace) -> u32 {
        self.next
            .get(&space)
            .copied()
            .unwrap_or_else(|| self.vanilla.base(space))
    }

    /// Number of modded IDs reserved so far in `space`.
    pub fn reserved(&self, space: IdSpace) -> u32 {
        self.count(space) - self.vanilla.base(space)
    }

    /// Rewinds every counter to its vanilla base.
    pub fn reset(&mut self) {
        self.next.clear();
    }

    pub fn vanilla(&self) -> &VanillaCounts {
        &self.vanilla
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(VanillaCounts::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_starts_above_vanilla_and_increases() {
        let mut ids = IdAllocator::default();
        let space = IdSpace::Content(ContentCategory::Item);

        let first = ids.reserve(space);
        let second = ids.reserve(space);
        let third = ids.reserve(space);

        assert_eq!(first, 3930);
        assert!(first < second && second < third);
        assert_eq!(ids.count(space), 3933);
        assert_eq!(ids.reserved(space), 3);
    }

    #[test]
    fn spaces_are_independent() {
        let mut ids = IdAllocator::default();
        let items = ids.reserve(IdSpace::Content(ContentCategory::Item));
        let tiles = ids.reserve(IdSpace::Content(ContentCategory::Tile));
        let heads = ids.reserve(IdSpace::Equip(EquipType::Head));
        let bodies = ids.reserve(IdSpace::Equip(EquipType::Body));

        assert_eq!(items, 3930);
        assert_eq!(tiles, 470);
        assert_eq!(heads, 216);
        assert_eq!(bodies, 210);
    }

    #[test]
    fn zero_vanilla_count_never_yields_zero() {
        let mut ids = IdAllocator::default();
        let custom = ids.reserve(IdSpace::Sound(SoundType::Custom));
        assert_eq!(custom, 1);
        assert_eq!(ids.count(IdSpace::Sound(SoundType::Custom)), 2);
    }

    #[test]
    fn reset_rewinds_counters() {
        let mut ids = IdAllocator::default();
        let space = IdSpace::Gore;
        let before = ids.reserve(space);
        ids.reserve(space);
        ids.reset();
        assert_eq!(ids.reserve(space), before);
    }
}
