//! Discovery: turns a module's registration table into registry entries.
//!
//! Content types are visited in full-name order. Each one is instantiated,
//! given its conventional name and texture, offered its autoload hook, and
//! registered unless the hook vetoes it. Gore and sound types are not
//! registered directly; they bind to assets under `Gores/` and `Sounds/`
//! whose qualified path matches their full name.

use std::collections::BTreeMap;

use modloader_core::content::{default_texture, simple_name};
use modloader_core::{
    ContentFactory, ContentType, EquipTextures, Factory, ModGore, ModItem, ModMount, ModNpc,
    ModProperties, ModSound, ModWaterStyle, MountTextureType, RegistryError, SoundType,
    check_hooks,
};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::context::ModContext;
use crate::error::Result;
use crate::modding::Mod;

const GORE_FOLDER: &str = "Gores/";
const SOUND_FOLDER: &str = "Sounds/";
const BACKGROUND_FOLDER: &str = "Backgrounds/";

/// Rejects the module, then any content type, that declares a retired hook.
pub(crate) fn check_deprecated_hooks(
    module: &dyn Mod,
    types: &[ContentType],
) -> std::result::Result<(), RegistryError> {
    check_hooks(modloader_core::HookOwner::Mod, module.hook_versions())?;
    for content_type in types {
        if let Some((owner, declared)) = content_type.factory().declared_hooks() {
            check_hooks(owner, declared)?;
        }
    }
    Ok(())
}

/// Runs every discovery convention enabled in the module's properties.
pub(crate) fn autoload(ctx: &mut ModContext<'_>, types: &[ContentType]) -> Result<()> {
    let properties = ctx.info().properties;
    let mut gores: BTreeMap<&str, &Factory<dyn ModGore>> = BTreeMap::new();
    let mut sounds: BTreeMap<&str, &Factory<dyn ModSound>> = BTreeMap::new();

    if properties.contains(ModProperties::AUTOLOAD) {
        let mut sorted: Vec<&ContentType> = types.iter().collect();
        sorted.sort_by(|a, b| a.full_name().cmp(b.full_name()));

        for content_type in sorted {
            match content_type.factory() {
                ContentFactory::Gore(factory) => {
                    gores.insert(content_type.full_name(), factory);
                }
                ContentFactory::Sound(factory) => {
                    sounds.insert(content_type.full_name(), factory);
                }
                factory => autoload_type(ctx, content_type.full_name(), factory)?,
            }
        }
        info!(
            target: "modloader::autoload",
            module = %ctx.name(),
            types = types.len(),
            "autoloaded content types"
        );
    }

    if properties.contains(ModProperties::AUTOLOAD_GORES) {
        autoload_gores(ctx, &gores)?;
    }
    if properties.contains(ModProperties::AUTOLOAD_SOUNDS) {
        autoload_sounds(ctx, &sounds)?;
    }
    if properties.contains(ModProperties::AUTOLOAD_BACKGROUNDS) {
        autoload_backgrounds(ctx)?;
    }
    Ok(())
}

fn vetoed(ctx: &ModContext<'_>, full_name: &str) {
    debug!(target: "modloader::autoload", module = %ctx.name(), full_name, "autoload vetoed");
}

/// Autoload for hooks that only carry a name.
macro_rules! autoload_named {
    ($ctx:ident, $full_name:ident, $factory:ident, $name:ident, $add:ident) => {{
        let mut hook = $factory();
        if hook.autoload(&mut $name) {
            $ctx.$add(&$name, hook)?;
        } else {
            vetoed($ctx, $full_name);
        }
    }};
}

/// Autoload for content with a name and a single texture.
macro_rules! autoload_textured {
    ($ctx:ident, $full_name:ident, $factory:ident, $name:ident, $texture:ident, $add:ident) => {{
        let mut content = $factory();
        if content.autoload(&mut $name, &mut $texture) {
            $ctx.$add(&$name, content, &$texture)?;
        } else {
            vetoed($ctx, $full_name);
        }
    }};
}

fn autoload_type(ctx: &mut ModContext<'_>, full_name: &str, factory: &ContentFactory) -> Result<()> {
    let mut name = simple_name(full_name).to_string();
    let mut texture = default_texture(full_name);

    match factory {
        ContentFactory::Item(factory) => autoload_item(ctx, full_name, factory(), name, texture)?,
        ContentFactory::GlobalItem(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_global_item)
        }
        ContentFactory::Dust(factory) => {
            autoload_textured!(ctx, full_name, factory, name, texture, add_dust)
        }
        ContentFactory::Tile(factory) => {
            autoload_textured!(ctx, full_name, factory, name, texture, add_tile)
        }
        ContentFactory::GlobalTile(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_global_tile)
        }
        ContentFactory::TileEntity(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_tile_entity)
        }
        ContentFactory::Wall(factory) => {
            autoload_textured!(ctx, full_name, factory, name, texture, add_wall)
        }
        ContentFactory::GlobalWall(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_global_wall)
        }
        ContentFactory::Projectile(factory) => {
            autoload_textured!(ctx, full_name, factory, name, texture, add_projectile)
        }
        ContentFactory::GlobalProjectile(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_global_projectile)
        }
        ContentFactory::Npc(factory) => autoload_npc(ctx, full_name, factory(), name, texture)?,
        ContentFactory::GlobalNpc(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_global_npc)
        }
        ContentFactory::Player(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_player)
        }
        ContentFactory::Buff(factory) => {
            autoload_textured!(ctx, full_name, factory, name, texture, add_buff)
        }
        ContentFactory::GlobalBuff(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_global_buff)
        }
        ContentFactory::Mount(factory) => {
            autoload_mount(ctx, full_name, factory(), name, texture)?
        }
        ContentFactory::World(factory) => autoload_named!(ctx, full_name, factory, name, add_world),
        ContentFactory::UgBgStyle(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_ug_bg_style)
        }
        ContentFactory::SurfaceBgStyle(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_surface_bg_style)
        }
        ContentFactory::GlobalBgStyle(factory) => {
            autoload_named!(ctx, full_name, factory, name, add_global_bg_style)
        }
        ContentFactory::WaterStyle(factory) => {
            autoload_water_style(ctx, full_name, factory(), name, texture)?
        }
        ContentFactory::WaterfallStyle(factory) => {
            autoload_textured!(ctx, full_name, factory, name, texture, add_waterfall_style)
        }
        // Collected by the caller and bound by folder convention.
        ContentFactory::Gore(_) | ContentFactory::Sound(_) => {}
    }
    Ok(())
}

fn autoload_item(
    ctx: &mut ModContext<'_>,
    full_name: &str,
    mut item: Box<dyn ModItem>,
    mut name: String,
    mut texture: String,
) -> Result<()> {
    let mut equips = Vec::new();
    if !item.autoload(&mut name, &mut texture, &mut equips) {
        vetoed(ctx, full_name);
        return Ok(());
    }

    // The item moves into the registry, so its naming hooks run first.
    let equip_textures: Vec<_> = equips
        .into_iter()
        .map(|equip| {
            let mut textures = EquipTextures {
                texture: format!("{texture}_{equip}"),
                arm_texture: format!("{texture}_Arms"),
                female_texture: format!("{texture}_FemaleBody"),
            };
            item.autoload_equip(equip, &mut textures);
            (equip, textures)
        })
        .collect();
    let mut flame = format!("{texture}_Flame");
    item.autoload_flame(&mut flame);

    let id = ctx.add_item(&name, item, &texture)?;
    for (equip, textures) in equip_textures {
        // The female variant is optional by convention.
        let female = Some(textures.female_texture.as_str())
            .filter(|female| ctx.texture_exists(female));
        ctx.add_equip_texture(
            Some(id),
            equip,
            &name,
            &textures.texture,
            Some(textures.arm_texture.as_str()),
            female,
        )?;
    }
    if !flame.is_empty() && ctx.texture_exists(&flame) {
        ctx.add_flame_texture(&name, &flame)?;
    }
    Ok(())
}

fn autoload_npc(
    ctx: &mut ModContext<'_>,
    full_name: &str,
    mut npc: Box<dyn ModNpc>,
    mut name: String,
    mut texture: String,
) -> Result<()> {
    // Head icons follow the conventional texture, not the overridden one.
    let mut head = format!("{texture}_Head");
    let mut boss_head = format!("{head}_Boss");
    let mut alt_textures = Vec::new();
    if !npc.autoload(&mut name, &mut texture, &mut alt_textures) {
        vetoed(ctx, full_name);
        return Ok(());
    }
    npc.autoload_head(&mut head, &mut boss_head);

    let id = ctx.add_npc(&name, npc, &texture, alt_textures)?;
    if !head.is_empty() && ctx.texture_exists(&head) {
        ctx.add_npc_head_texture(id, &head)?;
    }
    if !boss_head.is_empty() && ctx.texture_exists(&boss_head) {
        ctx.add_boss_head_texture(&boss_head, Some(id))?;
    }
    Ok(())
}

fn autoload_mount(
    ctx: &mut ModContext<'_>,
    full_name: &str,
    mut mount: Box<dyn ModMount>,
    mut name: String,
    mut texture: String,
) -> Result<()> {
    let mut extra_textures: BTreeMap<MountTextureType, String> = MountTextureType::iter()
        .map(|variant| (variant, format!("{texture}_{variant}")))
        .collect();
    if !mount.autoload(&mut name, &mut texture, &mut extra_textures) {
        vetoed(ctx, full_name);
        return Ok(());
    }
    ctx.add_mount(&name, mount, &texture, extra_textures)?;
    Ok(())
}

fn autoload_water_style(
    ctx: &mut ModContext<'_>,
    full_name: &str,
    mut style: Box<dyn ModWaterStyle>,
    mut name: String,
    mut texture: String,
) -> Result<()> {
    let mut block_texture = format!("{texture}_Block");
    if !style.autoload(&mut name, &mut texture, &mut block_texture) {
        vetoed(ctx, full_name);
        return Ok(());
    }
    ctx.add_water_style(&name, style, &texture, &block_texture)?;
    Ok(())
}

/// Full name a behavior type needs to bind to the asset at `path`.
fn class_name(module: &str, path: &str) -> String {
    format!("{module}.{}", path.replace('/', "."))
}

fn autoload_gores(
    ctx: &mut ModContext<'_>,
    hooks: &BTreeMap<&str, &Factory<dyn ModGore>>,
) -> Result<()> {
    let module = ctx.name().to_string();
    let textures = ctx.resources().textures_under(GORE_FOLDER);
    for texture in &textures {
        let hook = hooks
            .get(class_name(&module, texture).as_str())
            .map(|factory| factory());
        ctx.add_gore(&format!("{module}/{texture}"), hook)?;
    }
    debug!(target: "modloader::autoload", module = %module, gores = textures.len(), "autoloaded gores");
    Ok(())
}

fn autoload_sounds(
    ctx: &mut ModContext<'_>,
    hooks: &BTreeMap<&str, &Factory<dyn ModSound>>,
) -> Result<()> {
    let module = ctx.name().to_string();
    let sounds = ctx.resources().sounds_under(SOUND_FOLDER);
    for sound in &sounds {
        let sound_type = SoundType::from_folder(&sound[SOUND_FOLDER.len()..]);
        let hook = hooks
            .get(class_name(&module, sound).as_str())
            .map(|factory| factory());
        ctx.add_sound(sound_type, &format!("{module}/{sound}"), hook)?;
    }
    debug!(target: "modloader::autoload", module = %module, sounds = sounds.len(), "autoloaded sounds");
    Ok(())
}

fn autoload_backgrounds(ctx: &mut ModContext<'_>) -> Result<()> {
    let module = ctx.name().to_string();
    let textures = ctx.resources().textures_under(BACKGROUND_FOLDER);
    for texture in &textures {
        ctx.add_background_texture(&format!("{module}/{texture}"))?;
    }
    debug!(
        target: "modloader::autoload",
        module = %module,
        backgrounds = textures.len(),
        "autoloaded backgrounds"
    );
    Ok(())
}
