//! Content catalog loader.

use std::path::Path;

use crate::data::ContentCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for `content.ron` catalogs.
pub struct ContentLoader;

impl ContentLoader {
    pub fn load(path: &Path) -> LoadResult<ContentCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ContentCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse content catalog RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modloader_core::EquipType;

    #[test]
    fn parses_catalog_with_defaults() {
        let catalog = ContentLoader::parse(
            r#"(
                items: [
                    (name: "Sword", defaults: (damage: 12, rarity: 2)),
                    (name: "Helmet", equips: [Head]),
                    (name: "ThemeBox"),
                ],
                tiles: [(name: "ThemeBoxTile", defaults: (frame_important: true))],
                npcs: [(name: "Slime", defaults: (life_max: 300))],
                music_boxes: [
                    (music: "Sounds/Music/Theme", item: "ThemeBox", tile: "ThemeBoxTile"),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.items.len(), 3);
        assert_eq!(catalog.items[0].defaults.damage, 12);
        assert_eq!(catalog.items[0].defaults.width, 20);
        assert_eq!(catalog.items[1].equips, vec![EquipType::Head]);
        assert!(catalog.tiles[0].defaults.frame_important);
        assert_eq!(catalog.npcs[0].defaults.life_bytes(), 2);
        assert_eq!(catalog.music_boxes[0].frame_y, 0);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(ContentLoader::parse("(items: [(title: \"x\")])").is_err());
    }
}
