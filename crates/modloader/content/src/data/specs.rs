//! Content definitions as they appear in `content.ron`.

use modloader_core::{
    BuffDefaults, DrawAnimation, EquipType, ItemDefaults, MountData, NpcDefaults,
    ProjectileDefaults, TileDefaults, WallDefaults,
};

/// A content entry whose only extra data is its defaults record.
///
/// `texture` overrides the conventional texture path when set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentSpec<D> {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub texture: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defaults: D,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub texture: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equips: Vec<EquipType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defaults: ItemDefaults,
    #[cfg_attr(feature = "serde", serde(default))]
    pub animation: Option<DrawAnimation>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quest_fish: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub texture: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt_textures: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defaults: NpcDefaults,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterStyleSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub texture: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_texture: Option<String>,
}

/// Binds a module music track to a music-box item and tile.
///
/// `music` is the sound path (`Sounds/Music/Theme`); `item` and `tile` are
/// content names in the same module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MusicBoxSpec {
    pub music: String,
    pub item: String,
    pub tile: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame_y: u32,
}

pub type DustSpec = ContentSpec<()>;
pub type TileSpec = ContentSpec<TileDefaults>;
pub type WallSpec = ContentSpec<WallDefaults>;
pub type ProjectileSpec = ContentSpec<ProjectileDefaults>;
pub type BuffSpec = ContentSpec<BuffDefaults>;
pub type MountSpec = ContentSpec<MountData>;
pub type NamedSpec = ContentSpec<()>;
