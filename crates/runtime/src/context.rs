//! Registration surface handed to a module while it loads.
//!
//! [`ModContext`] scopes every add/get/type call to the loading module and
//! validates texture references against the asset caches. Lookups by name
//! only see the loading module's entries; the [`Registry`] itself is
//! readable for cross-module queries.

use std::collections::BTreeMap;
use std::sync::Arc;

use modloader_assets::{AssetCache, AssetError, Font, ModArchive, Sound, Texture};
use modloader_core::{
    ContentCategory, EquipType, GlobalBgStyle, GlobalBuff, GlobalItem, GlobalNpc,
    GlobalProjectile, GlobalTile, GlobalWall, HookOwner, IdSpace, ModBuff, ModDust, ModGore,
    ModItem, ModMount, ModNpc, ModPlayer, ModProjectile, ModSound, ModSurfaceBgStyle, ModTile,
    ModTileEntity, ModUgBgStyle, ModWall, ModWaterStyle, ModWaterfallStyle, ModWorld,
    ModuleInfo, MountTextureType, RegistryError, SoundType, check_hooks,
    content::type_simple_name,
};
use tracing::debug;

use crate::error::Result;
use crate::loader::LoadedModule;
use crate::registry::{
    Descriptor, EquipTexture, ItemMeta, MountMeta, NpcMeta, Registry, SoundBinding, WaterMeta,
};
use crate::resources::{ModuleAssets, Resources};

pub struct ModContext<'a> {
    info: &'a ModuleInfo,
    registry: &'a mut Registry,
    assets: &'a mut AssetCache,
    archive: &'a dyn ModArchive,
    loaded: &'a [LoadedModule],
    headless: bool,
}

impl<'a> ModContext<'a> {
    pub(crate) fn new(
        info: &'a ModuleInfo,
        registry: &'a mut Registry,
        assets: &'a mut AssetCache,
        archive: &'a dyn ModArchive,
        loaded: &'a [LoadedModule],
        headless: bool,
    ) -> Self {
        Self {
            info,
            registry,
            assets,
            archive,
            loaded,
            headless,
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> &ModuleInfo {
        self.info
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn is_headless(&self) -> bool {
        self.headless
    }

    pub fn resources(&self) -> Resources<'_> {
        Resources::new(
            ModuleAssets {
                name: &self.info.name,
                cache: self.assets,
                archive: self.archive,
            },
            self.loaded,
            self.headless,
        )
    }

    /// `"<Module>/<name>"`.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}/{}", self.info.name, name)
    }

    fn log_hook(&self, table: &'static str, name: &str) {
        debug!(
            target: "modloader::registry",
            module = %self.info.name,
            name,
            table,
            "registered hook"
        );
    }

    // Items

    pub fn add_item(&mut self, name: &str, item: Box<dyn ModItem>, texture: &str) -> Result<u32> {
        check_hooks(HookOwner::ModItem, item.hook_versions())?;
        let quest_fish = item.is_quest_fish();
        let id = Registry::register(
            &mut self.registry.ids,
            &mut self.registry.items,
            ContentCategory::Item,
            &self.info.name,
            name,
            Some(texture.to_string()),
            ItemMeta::default(),
            item,
        )?;
        if quest_fish {
            self.registry.quest_fish.push((self.info.name.clone(), id));
        }
        Ok(id)
    }

    pub fn add_global_item(&mut self, name: &str, global: Box<dyn GlobalItem>) -> Result<()> {
        check_hooks(HookOwner::GlobalItem, global.hook_versions())?;
        self.registry
            .global_items
            .push(&self.info.name, name, global)?;
        self.log_hook("global item", name);
        Ok(())
    }

    /// Validates `texture` and binds it as the item's flame texture.
    pub fn add_flame_texture(&mut self, item: &str, texture: &str) -> Result<()> {
        self.resources().require_texture(texture)?;
        let descriptor = self
            .registry
            .items
            .get_mut(&self.info.name, item)
            .ok_or_else(|| RegistryError::UnknownContent {
                table: "item",
                module: self.info.name.clone(),
                name: item.to_string(),
            })?;
        descriptor.meta.flame_texture = Some(texture.to_string());
        Ok(())
    }

    /// Reserves an equip slot for `texture`.
    ///
    /// Body textures also get an arm texture and a female texture. An
    /// explicit path must exist. Without one the arm texture is
    /// `<texture>_Arms` and the female texture is `<texture>_FemaleBody` when
    /// that exists, otherwise the body texture. When `item` is set the slot is
    /// linked to that item type.
    pub fn add_equip_texture(
        &mut self,
        item: Option<u32>,
        equip_type: EquipType,
        name: &str,
        texture: &str,
        arm_texture: Option<&str>,
        female_texture: Option<&str>,
    ) -> Result<u32> {
        self.registry
            .equips
            .ensure_vacant(&self.info.name, name, equip_type)?;

        let (arm_texture, female_texture) = {
            let resources = self.resources();
            resources.require_texture(texture)?;
            if equip_type == EquipType::Body {
                let arm = arm_texture
                    .filter(|arm| !arm.is_empty())
                    .map_or_else(|| format!("{texture}_Arms"), str::to_string);
                resources.require_texture(&arm)?;
                let female = match female_texture.filter(|female| !female.is_empty()) {
                    Some(female) => {
                        resources.require_texture(female)?;
                        female.to_string()
                    }
                    None => {
                        let derived = format!("{texture}_FemaleBody");
                        if resources.texture_exists(&derived) {
                            derived
                        } else {
                            texture.to_string()
                        }
                    }
                };
                (Some(arm), Some(female))
            } else {
                (None, None)
            }
        };

        let slot = self.registry.ids.reserve(IdSpace::Equip(equip_type));
        self.registry.equips.insert(EquipTexture {
            module: self.info.name.clone(),
            name: name.to_string(),
            equip_type,
            slot,
            texture: texture.to_string(),
            item,
            arm_texture,
            female_texture,
        });
        debug!(
            target: "modloader::registry",
            module = %self.info.name,
            name,
            %equip_type,
            slot,
            "registered equip texture"
        );
        Ok(slot)
    }

    pub fn get_equip_texture(&self, name: &str, equip_type: EquipType) -> Option<&EquipTexture> {
        self.registry.equips.get(&self.info.name, name, equip_type)
    }

    pub fn get_equip_slot(&self, name: &str, equip_type: EquipType) -> Option<u32> {
        self.registry.equips.slot(&self.info.name, name, equip_type)
    }

    // Dusts, tiles, walls, projectiles

    /// An empty `texture` keeps the host's shared dust sheet.
    pub fn add_dust(&mut self, name: &str, dust: Box<dyn ModDust>, texture: &str) -> Result<u32> {
        let texture = if texture.is_empty() {
            None
        } else {
            self.resources().require_texture(texture)?;
            Some(texture.to_string())
        };
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.dusts,
            ContentCategory::Dust,
            &self.info.name,
            name,
            texture,
            (),
            dust,
        )?)
    }

    pub fn add_tile(&mut self, name: &str, tile: Box<dyn ModTile>, texture: &str) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.tiles,
            ContentCategory::Tile,
            &self.info.name,
            name,
            Some(texture.to_string()),
            (),
            tile,
        )?)
    }

    pub fn add_global_tile(&mut self, name: &str, global: Box<dyn GlobalTile>) -> Result<()> {
        self.registry
            .global_tiles
            .push(&self.info.name, name, global)?;
        self.log_hook("global tile", name);
        Ok(())
    }

    pub fn add_tile_entity(&mut self, name: &str, entity: Box<dyn ModTileEntity>) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.tile_entities,
            ContentCategory::TileEntity,
            &self.info.name,
            name,
            None,
            (),
            entity,
        )?)
    }

    pub fn add_wall(&mut self, name: &str, wall: Box<dyn ModWall>, texture: &str) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.walls,
            ContentCategory::Wall,
            &self.info.name,
            name,
            Some(texture.to_string()),
            (),
            wall,
        )?)
    }

    pub fn add_global_wall(&mut self, name: &str, global: Box<dyn GlobalWall>) -> Result<()> {
        self.registry
            .global_walls
            .push(&self.info.name, name, global)?;
        self.log_hook("global wall", name);
        Ok(())
    }

    pub fn add_projectile(
        &mut self,
        name: &str,
        projectile: Box<dyn ModProjectile>,
        texture: &str,
    ) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.projectiles,
            ContentCategory::Projectile,
            &self.info.name,
            name,
            Some(texture.to_string()),
            (),
            projectile,
        )?)
    }

    pub fn add_global_projectile(
        &mut self,
        name: &str,
        global: Box<dyn GlobalProjectile>,
    ) -> Result<()> {
        self.registry
            .global_projectiles
            .push(&self.info.name, name, global)?;
        self.log_hook("global projectile", name);
        Ok(())
    }

    // NPCs and head icons

    pub fn add_npc(
        &mut self,
        name: &str,
        npc: Box<dyn ModNpc>,
        texture: &str,
        alt_textures: Vec<String>,
    ) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.npcs,
            ContentCategory::Npc,
            &self.info.name,
            name,
            Some(texture.to_string()),
            NpcMeta { alt_textures },
            npc,
        )?)
    }

    pub fn add_global_npc(&mut self, name: &str, global: Box<dyn GlobalNpc>) -> Result<()> {
        self.registry
            .global_npcs
            .push(&self.info.name, name, global)?;
        self.log_hook("global npc", name);
        Ok(())
    }

    /// Reserves a town-NPC head slot.
    ///
    /// Headless hosts cannot decode the texture but still require its file,
    /// so both sides agree on slot numbers.
    pub fn add_npc_head_texture(&mut self, npc_type: u32, texture: &str) -> Result<u32> {
        self.registry
            .npc_heads
            .ensure_vacant(&self.info.name, texture)?;
        {
            let resources = self.resources();
            if self.headless {
                if !resources.file_exists(&format!("{texture}.png")) {
                    return Err(AssetError::MissingResource(texture.to_string()).into());
                }
            } else {
                resources.texture(texture)?;
            }
        }

        let slot = self.registry.ids.reserve(IdSpace::NpcHead);
        self.registry
            .npc_heads
            .insert(&self.info.name, texture.to_string(), slot, Some(npc_type));
        debug!(target: "modloader::registry", module = %self.info.name, texture, npc_type, slot, "registered npc head");
        Ok(slot)
    }

    /// Reserves a boss-head slot; a texture already registered keeps its
    /// slot.
    pub fn add_boss_head_texture(&mut self, texture: &str, npc_type: Option<u32>) -> Result<u32> {
        if let Some(slot) = self.registry.boss_heads.slot(texture) {
            return Ok(slot);
        }
        self.resources().require_texture(texture)?;

        let slot = self.registry.ids.reserve(IdSpace::BossHead);
        self.registry
            .boss_heads
            .insert(&self.info.name, texture.to_string(), slot, npc_type);
        debug!(target: "modloader::registry", module = %self.info.name, texture, slot, "registered boss head");
        Ok(slot)
    }

    // Players and worlds

    pub fn add_player(&mut self, name: &str, player: Box<dyn ModPlayer>) -> Result<()> {
        check_hooks(HookOwner::ModPlayer, player.hook_versions())?;
        self.registry.players.push(&self.info.name, name, player)?;
        self.log_hook("player", name);
        Ok(())
    }

    pub fn add_world(&mut self, name: &str, world: Box<dyn ModWorld>) -> Result<()> {
        self.registry.worlds.push(&self.info.name, name, world)?;
        self.log_hook("world", name);
        Ok(())
    }

    // Buffs and mounts

    pub fn add_buff(&mut self, name: &str, buff: Box<dyn ModBuff>, texture: &str) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.buffs,
            ContentCategory::Buff,
            &self.info.name,
            name,
            Some(texture.to_string()),
            (),
            buff,
        )?)
    }

    pub fn add_global_buff(&mut self, name: &str, global: Box<dyn GlobalBuff>) -> Result<()> {
        self.registry
            .global_buffs
            .push(&self.info.name, name, global)?;
        self.log_hook("global buff", name);
        Ok(())
    }

    /// Extra textures that do not exist are dropped.
    pub fn add_mount(
        &mut self,
        name: &str,
        mount: Box<dyn ModMount>,
        texture: &str,
        mut extra_textures: BTreeMap<MountTextureType, String>,
    ) -> Result<u32> {
        {
            let resources = self.resources();
            extra_textures.retain(|_, extra| resources.texture_exists(extra));
        }
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.mounts,
            ContentCategory::Mount,
            &self.info.name,
            name,
            Some(texture.to_string()),
            MountMeta { extra_textures },
            mount,
        )?)
    }

    // Backgrounds and liquids

    pub fn add_ug_bg_style(&mut self, name: &str, style: Box<dyn ModUgBgStyle>) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.ug_bg_styles,
            ContentCategory::UgBgStyle,
            &self.info.name,
            name,
            None,
            (),
            style,
        )?)
    }

    pub fn add_surface_bg_style(
        &mut self,
        name: &str,
        style: Box<dyn ModSurfaceBgStyle>,
    ) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.surface_bg_styles,
            ContentCategory::SurfaceBgStyle,
            &self.info.name,
            name,
            None,
            (),
            style,
        )?)
    }

    pub fn get_surface_bg_style_slot(&self, name: &str) -> Option<u32> {
        self.get_surface_bg_style(name).map(|style| style.id)
    }

    pub fn add_global_bg_style(&mut self, name: &str, global: Box<dyn GlobalBgStyle>) -> Result<()> {
        self.registry
            .global_bg_styles
            .push(&self.info.name, name, global)?;
        self.log_hook("global background style", name);
        Ok(())
    }

    pub fn add_water_style(
        &mut self,
        name: &str,
        style: Box<dyn ModWaterStyle>,
        texture: &str,
        block_texture: &str,
    ) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.water_styles,
            ContentCategory::WaterStyle,
            &self.info.name,
            name,
            Some(texture.to_string()),
            WaterMeta {
                block_texture: Some(block_texture.to_string()),
            },
            style,
        )?)
    }

    pub fn add_waterfall_style(
        &mut self,
        name: &str,
        style: Box<dyn ModWaterfallStyle>,
        texture: &str,
    ) -> Result<u32> {
        Ok(Registry::register(
            &mut self.registry.ids,
            &mut self.registry.waterfall_styles,
            ContentCategory::WaterfallStyle,
            &self.info.name,
            name,
            Some(texture.to_string()),
            (),
            style,
        )?)
    }

    pub fn get_waterfall_style_slot(&self, name: &str) -> Option<u32> {
        self.get_waterfall_style(name).map(|style| style.id)
    }

    // Gores, sounds, background textures

    /// `texture` is module-qualified (`Foo/Gores/Chunk`).
    pub fn add_gore(&mut self, texture: &str, hook: Option<Box<dyn ModGore>>) -> Result<u32> {
        self.registry.gores.ensure_vacant(&self.info.name, texture)?;
        let slot = self.registry.ids.reserve(IdSpace::Gore);
        let bound = hook.is_some();
        self.registry
            .gores
            .insert(&self.info.name, texture.to_string(), slot, hook);
        debug!(target: "modloader::registry", module = %self.info.name, texture, slot, bound, "registered gore");
        Ok(slot)
    }

    /// `name` is relative to the module (`Gores/Chunk`).
    pub fn get_gore_slot(&self, name: &str) -> Option<u32> {
        self.registry.gores.slot(&self.qualify(name))
    }

    /// `path` is module-qualified (`Foo/Sounds/Item/Zap`) and must name a
    /// sound the module ships. A sound that failed to decode registers
    /// unbound.
    pub fn add_sound(
        &mut self,
        sound_type: SoundType,
        path: &str,
        hook: Option<Box<dyn ModSound>>,
    ) -> Result<u32> {
        if let Some(slots) = self.registry.sound_slots(sound_type) {
            slots.ensure_vacant(&self.info.name, path)?;
        }
        let sound = self.resources().load_sound(path)?;

        let slot = self.registry.ids.reserve(IdSpace::Sound(sound_type));
        let bound = hook.is_some();
        let module = self.info.name.as_str();
        self.registry.sound_slots_mut(sound_type).insert(
            module,
            path.to_string(),
            slot,
            SoundBinding { sound, hook },
        );
        debug!(target: "modloader::registry", module, path, %sound_type, slot, bound, "registered sound");
        Ok(slot)
    }

    pub fn get_sound_slot(&self, sound_type: SoundType, name: &str) -> Option<u32> {
        self.registry
            .sound_slots(sound_type)
            .and_then(|slots| slots.slot(&self.qualify(name)))
    }

    /// `texture` is module-qualified (`Foo/Backgrounds/Sky`).
    pub fn add_background_texture(&mut self, texture: &str) -> Result<u32> {
        self.registry
            .backgrounds
            .ensure_vacant(&self.info.name, texture)?;
        self.resources().require_texture(texture)?;

        let slot = self.registry.ids.reserve(IdSpace::Background);
        self.registry
            .backgrounds
            .insert(&self.info.name, texture.to_string(), slot, ());
        debug!(target: "modloader::registry", module = %self.info.name, texture, slot, "registered background");
        Ok(slot)
    }

    pub fn get_background_slot(&self, name: &str) -> Option<u32> {
        self.registry.backgrounds.slot(&self.qualify(name))
    }

    pub fn add_music_box(&mut self, music: u32, item: u32, tile: u32, frame_y: u32) -> Result<()> {
        self.registry
            .add_music_box(&self.info.name, music, item, tile, frame_y)?;
        Ok(())
    }

    // Resources

    pub fn get_texture(&self, name: &str) -> Result<Arc<Texture>> {
        Ok(self.resources().texture(name)?)
    }

    pub fn texture_exists(&self, name: &str) -> bool {
        self.resources().texture_exists(name)
    }

    /// Adds a texture to this module's cache; a leading module prefix is
    /// stripped.
    pub fn add_texture(&mut self, name: &str, texture: Texture) -> Result<()> {
        let local = name
            .strip_prefix(self.info.name.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(name);
        self.assets.add_texture(local, texture)?;
        Ok(())
    }

    pub fn get_sound(&self, name: &str) -> Result<Option<Arc<Sound>>> {
        Ok(self.resources().sound(name)?)
    }

    pub fn sound_exists(&self, name: &str) -> bool {
        self.resources().sound_exists(name)
    }

    pub fn get_font(&self, name: &str) -> Result<Option<Arc<Font>>> {
        Ok(self.resources().font(name)?)
    }

    pub fn font_exists(&self, name: &str) -> bool {
        self.resources().font_exists(name)
    }

    pub fn get_file_bytes(&self, name: &str) -> Result<&[u8]> {
        Ok(self.resources().file_bytes(name)?)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.resources().file_exists(name)
    }
}

macro_rules! content_lookups {
    ($( $table:ident: $trait_:ident, $meta:ty => $get:ident, $type_fn:ident, $type_of:ident; )+) => {
        impl ModContext<'_> {
            $(
                pub fn $get(&self, name: &str) -> Option<&Descriptor<dyn $trait_, $meta>> {
                    self.registry.$table.get(&self.info.name, name)
                }

                /// Registered ID, or `0` when the name is unknown.
                pub fn $type_fn(&self, name: &str) -> u32 {
                    self.registry.$table.type_of(&self.info.name, name)
                }

                /// Looks up by the simple name of `T`.
                pub fn $type_of<T>(&self) -> u32 {
                    self.$type_fn(type_simple_name::<T>())
                }
            )+
        }
    };
}

content_lookups! {
    items: ModItem, ItemMeta => get_item, item_type, item_type_of;
    dusts: ModDust, () => get_dust, dust_type, dust_type_of;
    tiles: ModTile, () => get_tile, tile_type, tile_type_of;
    tile_entities: ModTileEntity, () => get_tile_entity, tile_entity_type, tile_entity_type_of;
    walls: ModWall, () => get_wall, wall_type, wall_type_of;
    projectiles: ModProjectile, () => get_projectile, projectile_type, projectile_type_of;
    npcs: ModNpc, NpcMeta => get_npc, npc_type, npc_type_of;
    buffs: ModBuff, () => get_buff, buff_type, buff_type_of;
    mounts: ModMount, MountMeta => get_mount, mount_type, mount_type_of;
    ug_bg_styles: ModUgBgStyle, () => get_ug_bg_style, ug_bg_style_type, ug_bg_style_type_of;
    surface_bg_styles: ModSurfaceBgStyle, () => get_surface_bg_style, surface_bg_style_type,
        surface_bg_style_type_of;
    water_styles: ModWaterStyle, WaterMeta => get_water_style, water_style_type,
        water_style_type_of;
    waterfall_styles: ModWaterfallStyle, () => get_waterfall_style, waterfall_style_type,
        waterfall_style_type_of;
}

macro_rules! hook_lookups {
    ($( $list:ident: $trait_:ident => $get:ident; )+) => {
        impl ModContext<'_> {
            $(
                pub fn $get(&self, name: &str) -> Option<&dyn $trait_> {
                    self.registry.$list.get(&self.info.name, name)
                }
            )+
        }
    };
}

hook_lookups! {
    global_items: GlobalItem => get_global_item;
    global_tiles: GlobalTile => get_global_tile;
    global_walls: GlobalWall => get_global_wall;
    global_projectiles: GlobalProjectile => get_global_projectile;
    global_npcs: GlobalNpc => get_global_npc;
    global_buffs: GlobalBuff => get_global_buff;
    global_bg_styles: GlobalBgStyle => get_global_bg_style;
    players: ModPlayer => get_player;
    worlds: ModWorld => get_world;
}
