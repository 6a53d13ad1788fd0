//! Capability traits implemented by module content.
//!
//! Each trait carries only the hooks the loader itself drives: naming
//! overrides and vetoes during autoload, and the defaults hook that runs
//! during setup. Gameplay behavior lives on a separate surface and is not
//! modeled here.
//!
//! Every autoload hook receives the conventional name (and texture, where the
//! category has one) already filled in. Rewriting the strings changes what
//! gets registered; returning `false` skips registration entirely.

mod defaults;
mod naming;

pub use defaults::{
    BuffDefaults, DrawAnimation, HOOK_AI_STYLE, ItemDefaults, MountData, NpcDefaults,
    ProjectileDefaults, SoundInstance, TileDefaults, WallDefaults,
};
pub use naming::{default_texture, namespace, simple_name, type_simple_name};

use std::collections::BTreeMap;

use crate::category::{EquipType, MountTextureType, SoundType};
use crate::hooks::HookVersion;

/// Textures derived for one equip slot during item autoload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipTextures {
    pub texture: String,
    /// Arm texture; only consulted for [`EquipType::Body`].
    pub arm_texture: String,
    /// Female body texture; only consulted for [`EquipType::Body`].
    pub female_texture: String,
}

pub trait ModItem: Send + Sync {
    fn hook_versions(&self) -> &'static [HookVersion] {
        &[]
    }

    /// `equips` starts empty; every pushed type gets an equip texture named
    /// `<texture>_<EquipType>`.
    fn autoload(
        &mut self,
        _name: &mut String,
        _texture: &mut String,
        _equips: &mut Vec<EquipType>,
    ) -> bool {
        true
    }

    fn autoload_equip(&self, _equip: EquipType, _textures: &mut EquipTextures) {}

    /// Rewrites the probed flame texture; an empty string disables it.
    fn autoload_flame(&self, _texture: &mut String) {}

    fn set_defaults(&mut self, _item: &mut ItemDefaults) {}

    fn animation(&self) -> Option<DrawAnimation> {
        None
    }

    fn is_quest_fish(&self) -> bool {
        false
    }
}

pub trait GlobalItem: Send + Sync {
    fn hook_versions(&self) -> &'static [HookVersion] {
        &[]
    }

    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModDust: Send + Sync {
    fn autoload(&mut self, _name: &mut String, _texture: &mut String) -> bool {
        true
    }

    fn set_defaults(&mut self) {}
}

pub trait ModTile: Send + Sync {
    fn autoload(&mut self, _name: &mut String, _texture: &mut String) -> bool {
        true
    }

    fn set_defaults(&mut self, _tile: &mut TileDefaults) {}
}

pub trait GlobalTile: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }

    fn set_defaults(&mut self) {}
}

pub trait ModTileEntity: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModWall: Send + Sync {
    fn autoload(&mut self, _name: &mut String, _texture: &mut String) -> bool {
        true
    }

    fn set_defaults(&mut self, _wall: &mut WallDefaults) {}
}

pub trait GlobalWall: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }

    fn set_defaults(&mut self) {}
}

pub trait ModProjectile: Send + Sync {
    fn autoload(&mut self, _name: &mut String, _texture: &mut String) -> bool {
        true
    }

    fn set_defaults(&mut self, _projectile: &mut ProjectileDefaults) {}
}

pub trait GlobalProjectile: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModNpc: Send + Sync {
    /// `alt_textures` starts empty; setup sizes the alternate texture array
    /// from [`NpcDefaults::extra_texture_count`] and fills it from this list.
    fn autoload(
        &mut self,
        _name: &mut String,
        _texture: &mut String,
        _alt_textures: &mut Vec<String>,
    ) -> bool {
        true
    }

    /// Rewrites the probed head textures; an empty string disables one.
    fn autoload_head(&self, _head_texture: &mut String, _boss_head_texture: &mut String) {}

    fn set_defaults(&mut self, _npc: &mut NpcDefaults) {}
}

pub trait GlobalNpc: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModPlayer: Send + Sync {
    fn hook_versions(&self) -> &'static [HookVersion] {
        &[]
    }

    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModBuff: Send + Sync {
    fn autoload(&mut self, _name: &mut String, _texture: &mut String) -> bool {
        true
    }

    fn set_defaults(&mut self, _buff: &mut BuffDefaults) {}
}

pub trait GlobalBuff: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModMount: Send + Sync {
    /// `extra_textures` arrives holding `<texture>_<Variant>` for every
    /// variant; entries whose texture does not exist are dropped afterwards.
    fn autoload(
        &mut self,
        _name: &mut String,
        _texture: &mut String,
        _extra_textures: &mut BTreeMap<MountTextureType, String>,
    ) -> bool {
        true
    }

    fn set_defaults(&mut self, _mount: &mut MountData) {}
}

pub trait ModWorld: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModUgBgStyle: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModSurfaceBgStyle: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait GlobalBgStyle: Send + Sync {
    fn autoload(&mut self, _name: &mut String) -> bool {
        true
    }
}

pub trait ModWaterStyle: Send + Sync {
    fn autoload(
        &mut self,
        _name: &mut String,
        _texture: &mut String,
        _block_texture: &mut String,
    ) -> bool {
        true
    }
}

pub trait ModWaterfallStyle: Send + Sync {
    fn autoload(&mut self, _name: &mut String, _texture: &mut String) -> bool {
        true
    }
}

/// Behavior bound to a gore texture of the same name.
pub trait ModGore: Send + Sync {
    /// Whether the host runs its own update logic after this hook.
    fn update(&self) -> bool {
        true
    }
}

/// Behavior bound to a sound slot of the same name.
pub trait ModSound: Send + Sync {
    fn play_sound(
        &self,
        instance: SoundInstance,
        volume: f32,
        pan: f32,
        _sound_type: SoundType,
    ) -> SoundInstance {
        SoundInstance {
            volume,
            pan,
            ..instance
        }
    }
}
