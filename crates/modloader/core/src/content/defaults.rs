//! Category-specific metadata filled in by each descriptor's defaults hook.
//!
//! Setup writes the derived parts of these records into the host tables
//! (frame counts, life-byte width, alternate texture counts, ...).

use std::collections::BTreeMap;

use crate::category::EquipType;

/// Frame animation registered for an item's inventory icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawAnimation {
    pub ticks_per_frame: u32,
    pub frame_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemDefaults {
    pub width: u32,
    pub height: u32,
    pub max_stack: u32,
    pub value: u32,
    pub rarity: i32,
    pub damage: i32,
    pub use_time: u32,
    /// Equip slots bound to this item, filled in by setup before the
    /// defaults hook runs.
    pub equip_slots: BTreeMap<EquipType, u32>,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            max_stack: 1,
            value: 0,
            rarity: 0,
            damage: -1,
            use_time: 100,
            equip_slots: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileDefaults {
    pub solid: bool,
    pub frame_important: bool,
    pub light_source: bool,
    pub drop_item: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WallDefaults {
    pub house: bool,
    pub drop_item: u32,
}

/// AI style the host treats as a grappling hook.
pub const HOOK_AI_STYLE: i32 = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectileDefaults {
    pub width: u32,
    pub height: u32,
    /// Animation frames in the projectile sheet. Reset to 1 before the
    /// defaults hook runs.
    pub frames: u32,
    pub hostile: bool,
    pub friendly: bool,
    pub ai_style: i32,
    pub penetrate: i32,
}

impl Default for ProjectileDefaults {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            frames: 1,
            hostile: false,
            friendly: false,
            ai_style: 0,
            penetrate: 1,
        }
    }
}

impl ProjectileDefaults {
    pub const fn is_hook(&self) -> bool {
        self.ai_style == HOOK_AI_STYLE
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NpcDefaults {
    pub width: u32,
    pub height: u32,
    pub life_max: i32,
    pub damage: i32,
    pub defense: i32,
    pub boss: bool,
    /// Number of alternate textures beyond the main one.
    pub extra_texture_count: u32,
    /// Banner this NPC contributes kills to; `0` for none.
    pub banner: i32,
    pub banner_item: i32,
}

impl Default for NpcDefaults {
    fn default() -> Self {
        Self {
            width: 18,
            height: 40,
            life_max: 5,
            damage: 0,
            defense: 0,
            boss: false,
            extra_texture_count: 0,
            banner: 0,
            banner_item: 0,
        }
    }
}

impl NpcDefaults {
    /// Bytes the host uses to sync this NPC's life over the wire.
    pub const fn life_bytes(&self) -> u8 {
        if self.life_max > 32767 || self.boss {
            4
        } else if self.life_max > 127 {
            2
        } else {
            1
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuffDefaults {
    pub display_name: String,
    pub tooltip: String,
    pub debuff: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MountData {
    pub buff: u32,
    pub height_boost: i32,
    pub fall_damage: f32,
    pub run_speed: f32,
    pub jump_height: i32,
    pub total_frames: u32,
}

impl Default for MountData {
    fn default() -> Self {
        Self {
            buff: 0,
            height_boost: 0,
            fall_damage: 1.0,
            run_speed: 1.0,
            jump_height: 5,
            total_frames: 1,
        }
    }
}

/// Playback parameters handed to sound hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundInstance {
    pub volume: f32,
    pub pan: f32,
    pub pitch: f32,
}

impl Default for SoundInstance {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pan: 0.0,
            pitch: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn life_bytes_tiers() {
        let npc = |life_max, boss| NpcDefaults {
            life_max,
            boss,
            ..NpcDefaults::default()
        };

        assert_eq!(npc(100, false).life_bytes(), 1);
        assert_eq!(npc(127, false).life_bytes(), 1);
        assert_eq!(npc(128, false).life_bytes(), 2);
        assert_eq!(npc(32767, false).life_bytes(), 2);
        assert_eq!(npc(32768, false).life_bytes(), 4);
        assert_eq!(npc(10, true).life_bytes(), 4);
    }

    #[test]
    fn hook_projectiles_are_detected_by_ai_style() {
        let mut projectile = ProjectileDefaults::default();
        assert!(!projectile.is_hook());
        projectile.ai_style = HOOK_AI_STYLE;
        assert!(projectile.is_hook());
    }
}
