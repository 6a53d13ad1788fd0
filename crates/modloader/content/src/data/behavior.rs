//! Capability implementations backed by content definitions.
//!
//! A definition's `texture` replaces the conventional texture during autoload and
//! its defaults record replaces the host defaults during setup.

use std::collections::BTreeMap;

use modloader_core::{
    BuffDefaults, DrawAnimation, EquipType, ItemDefaults, ModBuff, ModDust, ModItem, ModMount,
    ModNpc, ModProjectile, ModSurfaceBgStyle, ModTile, ModTileEntity, ModUgBgStyle, ModWall,
    ModWaterStyle, ModWaterfallStyle, MountData, MountTextureType, NpcDefaults,
    ProjectileDefaults, TileDefaults, WallDefaults,
};

use super::specs::{ContentSpec, ItemSpec, NpcSpec, WaterStyleSpec};

fn override_texture(spec: Option<&String>, texture: &mut String) {
    if let Some(custom) = spec {
        texture.clone_from(custom);
    }
}

/// Generic data-backed content for categories without extra hooks.
#[derive(Clone, Debug)]
pub struct DataContent<D> {
    spec: ContentSpec<D>,
}

impl<D> DataContent<D> {
    pub fn new(spec: ContentSpec<D>) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &ContentSpec<D> {
        &self.spec
    }

    fn autoload_texture(&self, texture: &mut String) -> bool {
        override_texture(self.spec.texture.as_ref(), texture);
        true
    }
}

impl ModDust for DataContent<()> {
    fn autoload(&mut self, _name: &mut String, texture: &mut String) -> bool {
        self.autoload_texture(texture)
    }
}

impl ModTileEntity for DataContent<()> {}

impl ModUgBgStyle for DataContent<()> {}

impl ModSurfaceBgStyle for DataContent<()> {}

impl ModWaterfallStyle for DataContent<()> {
    fn autoload(&mut self, _name: &mut String, texture: &mut String) -> bool {
        self.autoload_texture(texture)
    }
}

impl ModTile for DataContent<TileDefaults> {
    fn autoload(&mut self, _name: &mut String, texture: &mut String) -> bool {
        self.autoload_texture(texture)
    }

    fn set_defaults(&mut self, tile: &mut TileDefaults) {
        tile.clone_from(&self.spec.defaults);
    }
}

impl ModWall for DataContent<WallDefaults> {
    fn autoload(&mut self, _name: &mut String, texture: &mut String) -> bool {
        self.autoload_texture(texture)
    }

    fn set_defaults(&mut self, wall: &mut WallDefaults) {
        wall.clone_from(&self.spec.defaults);
    }
}

impl ModProjectile for DataContent<ProjectileDefaults> {
    fn autoload(&mut self, _name: &mut String, texture: &mut String) -> bool {
        self.autoload_texture(texture)
    }

    fn set_defaults(&mut self, projectile: &mut ProjectileDefaults) {
        projectile.clone_from(&self.spec.defaults);
    }
}

impl ModBuff for DataContent<BuffDefaults> {
    fn autoload(&mut self, _name: &mut String, texture: &mut String) -> bool {
        self.autoload_texture(texture)
    }

    fn set_defaults(&mut self, buff: &mut BuffDefaults) {
        buff.clone_from(&self.spec.defaults);
        if buff.display_name.is_empty() {
            buff.display_name.clone_from(&self.spec.name);
        }
    }
}

impl ModMount for DataContent<MountData> {
    fn autoload(
        &mut self,
        _name: &mut String,
        texture: &mut String,
        _extra_textures: &mut BTreeMap<MountTextureType, String>,
    ) -> bool {
        self.autoload_texture(texture)
    }

    fn set_defaults(&mut self, mount: &mut MountData) {
        mount.clone_from(&self.spec.defaults);
    }
}

#[derive(Clone, Debug)]
pub struct DataItem {
    spec: ItemSpec,
}

impl DataItem {
    pub fn new(spec: ItemSpec) -> Self {
        Self { spec }
    }
}

impl ModItem for DataItem {
    fn autoload(
        &mut self,
        _name: &mut String,
        texture: &mut String,
        equips: &mut Vec<EquipType>,
    ) -> bool {
        override_texture(self.spec.texture.as_ref(), texture);
        equips.extend(self.spec.equips.iter().copied());
        true
    }

    fn set_defaults(&mut self, item: &mut ItemDefaults) {
        // Equip slots are assigned by setup, not by the definition.
        let equip_slots = std::mem::take(&mut item.equip_slots);
        item.clone_from(&self.spec.defaults);
        item.equip_slots = equip_slots;
    }

    fn animation(&self) -> Option<DrawAnimation> {
        self.spec.animation
    }

    fn is_quest_fish(&self) -> bool {
        self.spec.quest_fish
    }
}

#[derive(Clone, Debug)]
pub struct DataNpc {
    spec: NpcSpec,
}

impl DataNpc {
    pub fn new(spec: NpcSpec) -> Self {
        Self { spec }
    }
}

impl ModNpc for DataNpc {
    fn autoload(
        &mut self,
        _name: &mut String,
        texture: &mut String,
        alt_textures: &mut Vec<String>,
    ) -> bool {
        override_texture(self.spec.texture.as_ref(), texture);
        alt_textures.extend(self.spec.alt_textures.iter().cloned());
        true
    }

    fn set_defaults(&mut self, npc: &mut NpcDefaults) {
        npc.clone_from(&self.spec.defaults);
    }
}

#[derive(Clone, Debug)]
pub struct DataWaterStyle {
    spec: WaterStyleSpec,
}

impl DataWaterStyle {
    pub fn new(spec: WaterStyleSpec) -> Self {
        Self { spec }
    }
}

impl ModWaterStyle for DataWaterStyle {
    fn autoload(
        &mut self,
        _name: &mut String,
        texture: &mut String,
        block_texture: &mut String,
    ) -> bool {
        override_texture(self.spec.texture.as_ref(), texture);
        override_texture(self.spec.block_texture.as_ref(), block_texture);
        true
    }
}
