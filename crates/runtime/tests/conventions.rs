mod common;

use std::collections::BTreeMap;

use common::{TestMod, client_loader, headless_loader, png, source};
use modloader_assets::{AssetError, MemoryArchive};
use modloader_core::{
    ContentType, EquipType, ItemDefaults, ModGore, ModItem, ModMount, ModNpc, ModProjectile,
    ModSound, ModTile, ModWaterStyle, MountData, MountTextureType, MusicBoxError, NpcDefaults,
    ProjectileDefaults, RegistryError, SoundType,
};
use runtime::{HostTables, LoadError};

#[derive(Default)]
struct Explosion;
impl ModGore for Explosion {}

#[derive(Default)]
struct Zap;
impl ModSound for Zap {}

#[derive(Default)]
struct Disc;
impl ModItem for Disc {}

#[derive(Default)]
struct Stand;
impl ModTile for Stand {}

#[derive(Default)]
struct Townsfolk;
impl ModNpc for Townsfolk {}

#[derive(Default)]
struct Slime;
impl ModNpc for Slime {
    fn autoload(
        &mut self,
        _name: &mut String,
        texture: &mut String,
        alt_textures: &mut Vec<String>,
    ) -> bool {
        alt_textures.push(format!("{texture}_Blue"));
        alt_textures.push(format!("{texture}_Red"));
        true
    }

    fn set_defaults(&mut self, npc: &mut NpcDefaults) {
        npc.life_max = 200;
        npc.extra_texture_count = 2;
        npc.banner = 7;
        npc.banner_item = 4100;
    }
}

#[derive(Default)]
struct Grapple;
impl ModProjectile for Grapple {
    fn set_defaults(&mut self, projectile: &mut ProjectileDefaults) {
        projectile.ai_style = modloader_core::HOOK_AI_STYLE;
        projectile.frames = 4;
    }
}

#[derive(Default)]
struct Horse;
impl ModMount for Horse {
    fn set_defaults(&mut self, mount: &mut MountData) {
        mount.run_speed = 4.0;
    }
}

#[derive(Default)]
struct Lake;
impl ModWaterStyle for Lake {}

#[derive(Default)]
struct Breastplate;
impl ModItem for Breastplate {
    fn autoload(
        &mut self,
        _name: &mut String,
        _texture: &mut String,
        equips: &mut Vec<EquipType>,
    ) -> bool {
        equips.push(EquipType::Body);
        true
    }

    fn set_defaults(&mut self, item: &mut ItemDefaults) {
        item.value = 500;
    }
}

fn music_box_error(result: runtime::Result<()>) -> MusicBoxError {
    match result {
        Err(LoadError::Registry(RegistryError::MusicBox(err))) => err,
        other => panic!("expected a music box error, got {other:?}"),
    }
}

#[test]
fn gore_hooks_bind_only_within_their_module() {
    let mut loader = headless_loader();
    let foo = TestMod::new(vec![ContentType::gore::<Explosion>("Foo.Gores.Explosion")]);
    let foo_archive = MemoryArchive::new()
        .with_file("Gores/Explosion.png", png())
        .with_file("Gores/Debris.png", png());
    loader.load(source("Foo", foo_archive, foo)).unwrap();

    // Bar ships the same asset and a class named after Foo's namespace.
    let bar = TestMod::new(vec![ContentType::gore::<Explosion>("Foo.Gores.Explosion")]);
    let bar_archive = MemoryArchive::new().with_file("Gores/Explosion.png", png());
    loader.load(source("Bar", bar_archive, bar)).unwrap();

    let gores = &loader.registry().gores;
    let vanilla_gores = loader.registry().vanilla().gores;
    assert_eq!(gores.len(), 3);

    let bound = gores.get("Foo/Gores/Explosion").unwrap();
    assert!(bound.value.is_some());
    assert!(bound.slot >= vanilla_gores);
    assert!(gores.get("Foo/Gores/Debris").unwrap().value.is_none());
    assert!(gores.get("Bar/Gores/Explosion").unwrap().value.is_none());
}

#[test]
fn sounds_are_slotted_by_subfolder() {
    let mut loader = headless_loader();
    let module = TestMod::new(vec![ContentType::sound::<Zap>("Foo.Sounds.Item.Zap")]).on_load(
        |ctx| {
            assert!(ctx.get_sound_slot(SoundType::Item, "Sounds/Item/Zap").is_some());
            assert!(ctx.get_sound_slot(SoundType::Music, "Sounds/Item/Zap").is_none());
            Ok(())
        },
    );
    let archive = MemoryArchive::new()
        .with_file("Sounds/Item/Zap.wav", b"zap".to_vec())
        .with_file("Sounds/NPCHit/Ouch.wav", b"ouch".to_vec())
        .with_file("Sounds/Music/Theme.mp3", b"theme".to_vec())
        .with_file("Sounds/Ambient.wav", b"wind".to_vec());
    loader.load(source("Foo", archive, module)).unwrap();

    let registry = loader.registry();
    let vanilla = registry.vanilla().sounds.clone();

    let item = registry.sound_slots(SoundType::Item).unwrap();
    let zap = item.get("Foo/Sounds/Item/Zap").unwrap();
    assert_eq!(zap.slot, vanilla.item);
    assert!(zap.value.hook.is_some());
    // Headless hosts never decode audio.
    assert!(zap.value.sound.is_none());

    let hit = registry.sound_slots(SoundType::NPCHit).unwrap();
    assert!(hit.get("Foo/Sounds/NPCHit/Ouch").unwrap().value.hook.is_none());

    assert_eq!(registry.sound_count(SoundType::Music), vanilla.music + 1);
    let custom = registry.sound_slots(SoundType::Custom).unwrap();
    assert_eq!(custom.slot("Foo/Sounds/Ambient"), Some(1));
}

#[test]
fn music_box_bindings_are_validated_before_commit() {
    let mut loader = headless_loader();
    let module = TestMod::new(vec![
        ContentType::item::<Disc>("Foo.Items.MusicBoxTheme"),
        ContentType::item::<Disc>("Foo.Items.MusicBoxOther"),
        ContentType::tile::<Stand>("Foo.Tiles.MusicBoxes"),
    ])
    .on_load(|ctx| {
        let theme = ctx
            .get_sound_slot(SoundType::Music, "Sounds/Music/Theme")
            .unwrap();
        let other = ctx
            .get_sound_slot(SoundType::Music, "Sounds/Music/Other")
            .unwrap();
        let item = ctx.item_type("MusicBoxTheme");
        let other_item = ctx.item_type("MusicBoxOther");
        let tile = ctx.tile_type("MusicBoxes");
        let unknown_music = ctx.registry().sound_count(SoundType::Music);

        ctx.add_music_box(theme, item, tile, 0)?;

        // Range checks.
        assert_eq!(
            music_box_error(ctx.add_music_box(5, other_item, tile, 36)),
            MusicBoxError::VanillaMusic(5)
        );
        assert_eq!(
            music_box_error(ctx.add_music_box(unknown_music, other_item, tile, 36)),
            MusicBoxError::UnknownMusic(unknown_music)
        );
        assert_eq!(
            music_box_error(ctx.add_music_box(other, 100, tile, 36)),
            MusicBoxError::VanillaItem(100)
        );
        assert_eq!(
            music_box_error(ctx.add_music_box(other, 99_999, tile, 36)),
            MusicBoxError::UnknownItem(99_999)
        );
        assert_eq!(
            music_box_error(ctx.add_music_box(other, other_item, 10, 36)),
            MusicBoxError::VanillaTile(10)
        );

        // Uniqueness checks.
        assert_eq!(
            music_box_error(ctx.add_music_box(theme, other_item, tile, 36)),
            MusicBoxError::MusicTaken(theme)
        );
        assert_eq!(
            music_box_error(ctx.add_music_box(other, item, tile, 36)),
            MusicBoxError::ItemTaken(item)
        );
        assert_eq!(
            music_box_error(ctx.add_music_box(other, other_item, tile, 0)),
            MusicBoxError::FrameTaken { tile, frame_y: 0 }
        );
        assert_eq!(
            music_box_error(ctx.add_music_box(other, other_item, tile, 10)),
            MusicBoxError::FrameAlignment(10)
        );

        ctx.add_music_box(other, other_item, tile, 36)?;
        Ok(())
    });
    let archive = MemoryArchive::new()
        .with_file("Sounds/Music/Theme.mp3", b"theme".to_vec())
        .with_file("Sounds/Music/Other.mp3", b"other".to_vec());
    loader.load(source("Foo", archive, module)).unwrap();

    let registry = loader.registry();
    let boxes = &registry.music_boxes;
    assert_eq!(boxes.len(), 2);
    let tile = registry.tiles.type_of("Foo", "MusicBoxes");
    let item = registry.items.type_of("Foo", "MusicBoxOther");
    let music = boxes.music_for_tile(tile, 36).unwrap();
    assert_eq!(boxes.item_for_music(music), Some(item));

    loader.unload("Foo").unwrap();
    assert!(loader.registry().music_boxes.is_empty());
}

#[test]
fn headless_head_slots_follow_archive_files() {
    let mut loader = headless_loader();
    let module = TestMod::new(vec![
        ContentType::npc::<Townsfolk>("Foo.NPCs.Guide"),
        ContentType::npc::<Townsfolk>("Foo.NPCs.King"),
    ])
    .on_load(|ctx| {
        let guide = ctx.npc_type("Guide");
        let err = ctx
            .add_npc_head_texture(guide, "Foo/NPCs/Missing_Head")
            .unwrap_err();
        assert!(matches!(err, LoadError::Asset(AssetError::MissingResource(_))));

        // A boss head registered twice keeps its first slot.
        let king = ctx.npc_type("King");
        let first = ctx.registry().boss_head_slot(king).unwrap();
        let again = ctx.add_boss_head_texture("Foo/NPCs/King_Head_Boss", None)?;
        assert_eq!(first, again);
        Ok(())
    });
    let archive = MemoryArchive::new()
        .with_file("NPCs/Guide.png", png())
        .with_file("NPCs/Guide_Head.png", png())
        .with_file("NPCs/King.png", png())
        .with_file("NPCs/King_Head_Boss.png", png());
    loader.load(source("Foo", archive, module)).unwrap();

    let registry = loader.registry();
    let guide = registry.npcs.type_of("Foo", "Guide");
    let king = registry.npcs.type_of("Foo", "King");
    assert_eq!(registry.npc_head_slot(guide), Some(registry.vanilla().npc_heads));
    assert_eq!(registry.npc_head_slot(king), None);
    assert_eq!(registry.boss_head_slot(king), Some(registry.vanilla().boss_heads));
}

#[test]
fn setup_writes_derived_metadata() {
    let mut loader = client_loader();
    let module = TestMod::new(vec![
        ContentType::npc::<Slime>("Foo.NPCs.Slime"),
        ContentType::projectile::<Grapple>("Foo.Projectiles.Grapple"),
        ContentType::mount::<Horse>("Foo.Mounts.Horse"),
        ContentType::water_style::<Lake>("Foo.Waters.Lake"),
        ContentType::item::<Breastplate>("Foo.Items.Breastplate"),
    ]);
    let archive = MemoryArchive::new()
        .with_file("NPCs/Slime.png", png())
        .with_file("NPCs/Slime_Blue.png", png())
        .with_file("NPCs/Slime_Red.png", png())
        .with_file("Projectiles/Grapple.png", png())
        .with_file("Mounts/Horse.png", png())
        .with_file("Mounts/Horse_Back.png", png())
        .with_file("Waters/Lake.png", png())
        .with_file("Waters/Lake_Block.png", png())
        .with_file("Items/Breastplate.png", png())
        .with_file("Items/Breastplate_Body.png", png())
        .with_file("Items/Breastplate_Arms.png", png());
    loader.load(source("Foo", archive, module)).unwrap();

    let registry = loader.registry();
    let slime = registry.npcs.type_of("Foo", "Slime");
    let grapple = registry.projectiles.type_of("Foo", "Grapple");
    let horse = registry.mounts.type_of("Foo", "Horse");
    let lake = registry.water_styles.type_of("Foo", "Lake");
    let plate = registry.items.type_of("Foo", "Breastplate");
    let vanilla_mounts = registry.vanilla().mounts;

    let equip = registry.equips.get("Foo", "Breastplate", EquipType::Body).unwrap();
    assert_eq!(equip.arm_texture.as_deref(), Some("Foo/Items/Breastplate_Arms"));
    // No female variant shipped, so the body texture stands in.
    assert_eq!(equip.female_texture.as_deref(), Some("Foo/Items/Breastplate_Body"));
    let body_slot = equip.slot;
    assert_eq!(registry.equips.item_for_slot(EquipType::Body, body_slot), Some(plate));

    let extras: Vec<_> = registry
        .mounts
        .get("Foo", "Horse")
        .unwrap()
        .meta
        .extra_textures
        .keys()
        .copied()
        .collect();
    assert_eq!(extras, vec![MountTextureType::Back]);

    let mut host = HostTables::new();
    loader.setup_content(&mut host).unwrap();

    let npc = host.npcs.get(slime).unwrap();
    assert_eq!(npc.life_bytes, 2);
    assert_eq!(npc.alt_textures.len(), 3);
    let names: Vec<_> = npc
        .alt_textures
        .iter()
        .map(|texture| texture.as_ref().map(|t| t.name.clone()).unwrap_or_default())
        .collect();
    assert_eq!(names, ["Foo/NPCs/Slime", "Foo/NPCs/Slime_Blue", "Foo/NPCs/Slime_Red"]);
    assert_eq!(host.banner_to_item.get(&7), Some(&4100));

    let projectile = host.projectiles.get(grapple).unwrap();
    assert!(projectile.hook);
    assert_eq!(projectile.frames, 4);

    assert!(host.mount_table_sized());
    assert!(host.mounts.capacity() >= vanilla_mounts as usize);
    let mount = host.mounts.get(horse).unwrap();
    assert_eq!(mount.data.run_speed, 4.0);
    let extra: BTreeMap<_, _> = mount
        .extra_textures
        .iter()
        .map(|(variant, texture)| (*variant, texture.is_some()))
        .collect();
    assert_eq!(extra.get(&MountTextureType::Back), Some(&true));

    let liquid = host.liquids.get(lake).unwrap();
    assert!(liquid.texture.is_some() && liquid.block_texture.is_some());

    let item = host.items.get(plate).unwrap();
    assert_eq!(item.defaults.value, 500);
    assert_eq!(item.defaults.equip_slots.get(&EquipType::Body), Some(&body_slot));
}

#[test]
fn manual_body_equip_derives_female_texture() {
    let mut loader = client_loader();
    let module = TestMod::new(Vec::new()).on_load(|ctx| {
        ctx.add_equip_texture(None, EquipType::Body, "Plate", "Foo/Armor/Plate", None, None)?;
        let vest =
            ctx.add_equip_texture(None, EquipType::Body, "Vest", "Foo/Armor/Vest", None, None)?;

        let plate = ctx.get_equip_texture("Plate", EquipType::Body).unwrap();
        assert_eq!(plate.arm_texture.as_deref(), Some("Foo/Armor/Plate_Arms"));
        assert_eq!(plate.female_texture.as_deref(), Some("Foo/Armor/Plate_FemaleBody"));

        // No female variant shipped, so the body texture stands in.
        let vest_equip = ctx.get_equip_texture("Vest", EquipType::Body).unwrap();
        assert_eq!(vest_equip.female_texture.as_deref(), Some("Foo/Armor/Vest"));
        assert_eq!(ctx.get_equip_slot("Vest", EquipType::Body), Some(vest));
        Ok(())
    });
    let archive = MemoryArchive::new()
        .with_file("Armor/Plate.png", png())
        .with_file("Armor/Plate_Arms.png", png())
        .with_file("Armor/Plate_FemaleBody.png", png())
        .with_file("Armor/Vest.png", png())
        .with_file("Armor/Vest_Arms.png", png());
    loader.load(source("Foo", archive, module)).unwrap();
}

#[test]
fn explicit_female_texture_must_exist() {
    let mut loader = client_loader();
    let module = TestMod::new(Vec::new()).on_load(|ctx| {
        ctx.add_equip_texture(
            None,
            EquipType::Body,
            "Coat",
            "Foo/Armor/Coat",
            None,
            Some("Foo/Armor/Coat_Female"),
        )?;
        Ok(())
    });
    let archive = MemoryArchive::new()
        .with_file("Armor/Coat.png", png())
        .with_file("Armor/Coat_Arms.png", png());

    let err = loader.load(source("Foo", archive, module)).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Asset(AssetError::MissingResource(ref name)) if name == "Foo/Armor/Coat_Female"
    ));
}

#[test]
fn sound_outside_the_archive_aborts_the_load() {
    for mut loader in [client_loader(), headless_loader()] {
        let module = TestMod::new(Vec::new()).on_load(|ctx| {
            ctx.add_sound(SoundType::Item, "Foo/Sounds/Item/Nope", None)?;
            Ok(())
        });
        let archive = MemoryArchive::new().with_file("Sounds/Item/Zap.wav", b"zap".to_vec());

        let err = loader.load(source("Foo", archive, module)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Asset(AssetError::MissingResource(ref name)) if name == "Foo/Sounds/Item/Nope"
        ));
        let items = loader.registry().sound_slots(SoundType::Item);
        assert!(items.is_none_or(|slots| slots.get("Foo/Sounds/Item/Zap").is_none()));
    }
}

#[test]
fn failed_setup_clears_modded_host_slots() {
    let mut loader = client_loader();
    let foo = TestMod::new(vec![ContentType::item::<Disc>("Foo.Items.Disc")]);
    let foo_archive = MemoryArchive::new().with_file("Items/Disc.png", png());
    loader.load(source("Foo", foo_archive, foo)).unwrap();

    // Slime declares two alternate textures Bar does not ship.
    let bar = TestMod::new(vec![ContentType::npc::<Slime>("Bar.NPCs.Slime")]);
    let bar_archive = MemoryArchive::new().with_file("NPCs/Slime.png", png());
    loader.load(source("Bar", bar_archive, bar)).unwrap();

    let mut host = HostTables::new();
    let err = loader.setup_content(&mut host).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Asset(AssetError::MissingResource(ref name)) if name == "Bar/NPCs/Slime_Blue"
    ));

    let disc = loader.registry().items.type_of("Foo", "Disc");
    assert!(host.items.get(disc).is_none());
    assert_eq!(host.items.len(), 0);
    assert_eq!(host.npcs.len(), 0);
    assert_eq!(loader.module_state("Foo"), runtime::ModState::Registered);
    assert_eq!(loader.module_state("Bar"), runtime::ModState::Registered);
}
