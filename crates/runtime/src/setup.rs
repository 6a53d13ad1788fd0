//! Setup: binds one module's registered content into the host tables.
//!
//! Each descriptor's texture is resolved (a missing texture is fatal), its
//! defaults hook runs, and the derived host metadata is written at its ID.
//! Headless hosts bind no textures.

use std::collections::BTreeMap;

use modloader_assets::AssetError;
use modloader_core::{
    BuffDefaults, ItemDefaults, MountData, NpcDefaults, ProjectileDefaults, TileDefaults,
    WallDefaults,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::host::{
    BuffSlot, HostTables, ItemSlot, LiquidSlot, MountSlot, NpcSlot, ProjectileSlot, TileSlot,
    WallSlot,
};
use crate::registry::Registry;
use crate::resources::Resources;

pub(crate) fn setup_module(
    registry: &mut Registry,
    module: &str,
    resources: Resources<'_>,
    host: &mut HostTables,
) -> Result<()> {
    let vanilla_mounts = registry.vanilla().mounts;

    for item in registry.items.module_mut(module) {
        let texture = resources.bind_texture(item.texture.as_deref())?;
        let mut defaults = ItemDefaults::default();
        if let Some(slots) = registry.equips.item_slots(item.id) {
            defaults.equip_slots = slots.clone();
        }
        item.content.set_defaults(&mut defaults);
        let flame_texture = resources.bind_texture(item.meta.flame_texture.as_deref())?;

        host.items.set(
            item.id,
            ItemSlot {
                name: item.name.clone(),
                texture,
                defaults,
                animation: item.content.animation(),
                flame_texture,
            },
        );
    }

    for dust in registry.dusts.module_mut(module) {
        let texture = resources.bind_texture(dust.texture.as_deref())?;
        dust.content.set_defaults();
        host.dust_textures.set(dust.id, texture);
    }

    for tile in registry.tiles.module_mut(module) {
        let texture = resources.bind_texture(tile.texture.as_deref())?;
        let mut defaults = TileDefaults::default();
        tile.content.set_defaults(&mut defaults);
        host.tiles.set(tile.id, TileSlot { texture, defaults });
    }
    for entry in registry.global_tiles.module_mut(module) {
        entry.hook.set_defaults();
    }

    for wall in registry.walls.module_mut(module) {
        let texture = resources.bind_texture(wall.texture.as_deref())?;
        let mut defaults = WallDefaults::default();
        wall.content.set_defaults(&mut defaults);
        host.walls.set(wall.id, WallSlot { texture, defaults });
    }
    for entry in registry.global_walls.module_mut(module) {
        entry.hook.set_defaults();
    }

    for projectile in registry.projectiles.module_mut(module) {
        let texture = resources.bind_texture(projectile.texture.as_deref())?;
        let mut defaults = ProjectileDefaults {
            frames: 1,
            ..ProjectileDefaults::default()
        };
        projectile.content.set_defaults(&mut defaults);

        host.projectiles.set(
            projectile.id,
            ProjectileSlot {
                texture,
                frames: defaults.frames,
                hostile: defaults.hostile,
                hook: defaults.is_hook(),
                defaults,
            },
        );
    }

    for npc in registry.npcs.module_mut(module) {
        let texture = resources.bind_texture(npc.texture.as_deref())?;
        let mut defaults = NpcDefaults::default();
        npc.content.set_defaults(&mut defaults);

        if defaults.banner != 0 {
            host.banner_to_item.insert(defaults.banner, defaults.banner_item);
        }

        let extra = defaults.extra_texture_count as usize;
        let mut alt_textures = Vec::with_capacity(extra + 1);
        alt_textures.push(if extra > 0 { texture.clone() } else { None });
        for index in 0..extra {
            let alt = match npc.meta.alt_textures.get(index) {
                Some(path) => resources.bind_texture(Some(path.as_str()))?,
                None if resources.is_headless() => None,
                None => {
                    return Err(AssetError::MissingResource(format!(
                        "{module}/{} alternate texture {}",
                        npc.name,
                        index + 1
                    ))
                    .into());
                }
            };
            alt_textures.push(alt);
        }

        host.npcs.set(
            npc.id,
            NpcSlot {
                name: npc.name.clone(),
                texture,
                life_bytes: defaults.life_bytes(),
                defaults,
                alt_textures,
            },
        );
    }

    for mount in registry.mounts.module_mut(module) {
        if host.ensure_mount_table(vanilla_mounts) {
            debug!(target: "modloader::setup", vanilla_mounts, "sized mount table");
        }
        let texture = resources.bind_texture(mount.texture.as_deref())?;
        let mut data = MountData::default();
        mount.content.set_defaults(&mut data);

        let mut extra_textures = BTreeMap::new();
        for (variant, path) in &mount.meta.extra_textures {
            extra_textures.insert(*variant, resources.bind_texture(Some(path.as_str()))?);
        }
        host.mounts.set(
            mount.id,
            MountSlot {
                texture,
                data,
                extra_textures,
            },
        );
    }

    for buff in registry.buffs.module_mut(module) {
        let texture = resources.bind_texture(buff.texture.as_deref())?;
        let mut defaults = BuffDefaults::default();
        buff.content.set_defaults(&mut defaults);
        host.buffs.set(
            buff.id,
            BuffSlot {
                name: buff.name.clone(),
                texture,
                defaults,
            },
        );
    }

    for style in registry.water_styles.module_mut(module) {
        let texture = resources.bind_texture(style.texture.as_deref())?;
        let block_texture = resources.bind_texture(style.meta.block_texture.as_deref())?;
        host.liquids.set(
            style.id,
            LiquidSlot {
                texture,
                block_texture,
            },
        );
    }

    for style in registry.waterfall_styles.module_mut(module) {
        let texture = resources.bind_texture(style.texture.as_deref())?;
        host.waterfalls.set(style.id, texture);
    }

    info!(
        target: "modloader::setup",
        module,
        headless = resources.is_headless(),
        "set up module content"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modloader_assets::{AssetCache, MemoryArchive};
    use modloader_core::{ContentCategory, ModNpc, ModProjectile};

    use crate::registry::NpcMeta;
    use crate::resources::ModuleAssets;

    struct Hook;
    impl ModProjectile for Hook {
        fn set_defaults(&mut self, projectile: &mut ProjectileDefaults) {
            assert_eq!(projectile.frames, 1);
            projectile.ai_style = 7;
            projectile.hostile = true;
        }
    }

    struct Boss;
    impl ModNpc for Boss {
        fn set_defaults(&mut self, npc: &mut NpcDefaults) {
            npc.life_max = 100;
            npc.boss = true;
            npc.extra_texture_count = 1;
            npc.banner = 3;
            npc.banner_item = 4000;
        }
    }

    fn headless<'a>(cache: &'a AssetCache, archive: &'a MemoryArchive) -> Resources<'a> {
        Resources::new(
            ModuleAssets {
                name: "Foo",
                cache,
                archive,
            },
            &[],
            true,
        )
    }

    #[test]
    fn derived_metadata_is_written_headless() {
        let mut registry = Registry::default();
        let hook = Registry::register(
            &mut registry.ids,
            &mut registry.projectiles,
            ContentCategory::Projectile,
            "Foo",
            "Grapple",
            Some("Foo/Projectiles/Grapple".into()),
            (),
            Box::new(Hook),
        )
        .unwrap();
        let boss = Registry::register(
            &mut registry.ids,
            &mut registry.npcs,
            ContentCategory::Npc,
            "Foo",
            "King",
            Some("Foo/NPCs/King".into()),
            NpcMeta::default(),
            Box::new(Boss),
        )
        .unwrap();

        let cache = AssetCache::new("Foo");
        let archive = MemoryArchive::new();
        let mut host = HostTables::new();
        setup_module(&mut registry, "Foo", headless(&cache, &archive), &mut host).unwrap();

        let projectile = host.projectiles.get(hook).unwrap();
        assert!(projectile.hook && projectile.hostile);
        assert_eq!(projectile.frames, 1);
        assert!(projectile.texture.is_none());

        let npc = host.npcs.get(boss).unwrap();
        assert_eq!(npc.life_bytes, 4);
        assert_eq!(npc.alt_textures.len(), 2);
        assert_eq!(host.banner_to_item.get(&3), Some(&4000));
    }

    #[test]
    fn missing_texture_is_fatal_on_clients() {
        let mut registry = Registry::default();
        Registry::register(
            &mut registry.ids,
            &mut registry.projectiles,
            ContentCategory::Projectile,
            "Foo",
            "Grapple",
            Some("Foo/Projectiles/Grapple".into()),
            (),
            Box::new(Hook),
        )
        .unwrap();

        let cache = AssetCache::new("Foo");
        let archive = MemoryArchive::new();
        let resources = Resources::new(
            ModuleAssets {
                name: "Foo",
                cache: &cache,
                archive: &archive,
            },
            &[],
            false,
        );
        let err = setup_module(&mut registry, "Foo", resources, &mut HostTables::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::LoadError::Asset(AssetError::MissingResource(name)) if name == "Foo/Projectiles/Grapple"
        ));
    }
}
