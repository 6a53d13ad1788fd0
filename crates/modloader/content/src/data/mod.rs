//! Data-driven module content.
//!
//! A [`ContentCatalog`] lists a module's content by category. Each entry
//! becomes a [`ContentType`] named `<namespace>.<Folder>.<name>`, so the
//! conventional texture of item `Sword` in module `Foo` is
//! `Foo/Items/Sword`, the module-qualified form of `Items/Sword.png`.

mod behavior;
mod specs;

pub use behavior::{DataContent, DataItem, DataNpc, DataWaterStyle};
pub use specs::{
    BuffSpec, ContentSpec, DustSpec, ItemSpec, MountSpec, MusicBoxSpec, NamedSpec, NpcSpec,
    ProjectileSpec, TileSpec, WallSpec, WaterStyleSpec,
};

use std::sync::Arc;

use modloader_core::{
    ContentFactory, ContentType, Factory, ModBuff, ModDust, ModItem, ModMount, ModNpc,
    ModProjectile, ModSurfaceBgStyle, ModTile, ModTileEntity, ModUgBgStyle, ModWall,
    ModWaterStyle, ModWaterfallStyle,
};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentCatalog {
    /// Namespace for qualified names; the module name when absent.
    pub namespace: Option<String>,
    pub items: Vec<ItemSpec>,
    pub dusts: Vec<DustSpec>,
    pub tiles: Vec<TileSpec>,
    pub tile_entities: Vec<NamedSpec>,
    pub walls: Vec<WallSpec>,
    pub projectiles: Vec<ProjectileSpec>,
    pub npcs: Vec<NpcSpec>,
    pub buffs: Vec<BuffSpec>,
    pub mounts: Vec<MountSpec>,
    pub ug_bg_styles: Vec<NamedSpec>,
    pub surface_bg_styles: Vec<NamedSpec>,
    pub water_styles: Vec<WaterStyleSpec>,
    pub waterfall_styles: Vec<NamedSpec>,
    pub music_boxes: Vec<MusicBoxSpec>,
}

macro_rules! push_types {
    ($types:ident, $prefix:expr, $specs:expr, $folder:literal, $variant:ident, $trait_:ident, $wrap:expr) => {
        for spec in &$specs {
            let spec = spec.clone();
            let full_name = format!("{}.{}.{}", $prefix, $folder, spec.name);
            let factory: Factory<dyn $trait_> =
                Arc::new(move || Box::new($wrap(spec.clone())) as Box<dyn $trait_>);
            $types.push(ContentType::new(full_name, ContentFactory::$variant(factory)));
        }
    };
}

impl ContentCatalog {
    /// Registration table for `module`, in catalog order.
    pub fn content_types(&self, module: &str) -> Vec<ContentType> {
        let prefix = self.namespace.as_deref().unwrap_or(module);
        let mut types = Vec::new();

        push_types!(types, prefix, self.items, "Items", Item, ModItem, DataItem::new);
        push_types!(types, prefix, self.dusts, "Dusts", Dust, ModDust, DataContent::new);
        push_types!(types, prefix, self.tiles, "Tiles", Tile, ModTile, DataContent::new);
        push_types!(
            types, prefix, self.tile_entities, "TileEntities", TileEntity, ModTileEntity,
            DataContent::new
        );
        push_types!(types, prefix, self.walls, "Walls", Wall, ModWall, DataContent::new);
        push_types!(
            types, prefix, self.projectiles, "Projectiles", Projectile, ModProjectile,
            DataContent::new
        );
        push_types!(types, prefix, self.npcs, "NPCs", Npc, ModNpc, DataNpc::new);
        push_types!(types, prefix, self.buffs, "Buffs", Buff, ModBuff, DataContent::new);
        push_types!(types, prefix, self.mounts, "Mounts", Mount, ModMount, DataContent::new);
        push_types!(
            types, prefix, self.ug_bg_styles, "Backgrounds", UgBgStyle, ModUgBgStyle,
            DataContent::new
        );
        push_types!(
            types, prefix, self.surface_bg_styles, "Backgrounds", SurfaceBgStyle,
            ModSurfaceBgStyle, DataContent::new
        );
        push_types!(
            types, prefix, self.water_styles, "Waters", WaterStyle, ModWaterStyle,
            DataWaterStyle::new
        );
        push_types!(
            types, prefix, self.waterfall_styles, "Waters", WaterfallStyle, ModWaterfallStyle,
            DataContent::new
        );

        types
    }

    pub fn len(&self) -> usize {
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

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
