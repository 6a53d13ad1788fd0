//! Post-setup summary of what every module registered.
use runtime::{ContentTable, HostTables, ModLoader};
use tracing::info;

fn owned_by<T: ?Sized, M>(table: &ContentTable<T, M>, module: &str) -> usize {
    table.iter().filter(|entry| entry.module == module).count()
}

pub fn log_report(loader: &ModLoader, host: &HostTables) {
    let registry = loader.registry();

    for module in loader.modules() {
        let name = module.info().name.as_str();
        info!(
            module = name,
            version = %module.info().version,
            state = %module.state(),
            items = owned_by(&registry.items, name),
            tiles = owned_by(&registry.tiles, name),
            walls = owned_by(&registry.walls, name),
            projectiles = owned_by(&registry.projectiles, name),
            npcs = owned_by(&registry.npcs, name),
            assets = module.assets().len(),
            "module report"
        );
    }

    info!(
        modules = loader.modules().len(),
        content = registry.content_len(),
        equips = registry.equips.len(),
        gores = registry.gores.len(),
        backgrounds = registry.backgrounds.len(),
        music_boxes = registry.music_boxes.len(),
        host_items = host.items.len(),
        host_npcs = host.npcs.len(),
        "registry report"
    );
}
