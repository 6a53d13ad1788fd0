//! Content categories and the secondary slot kinds that hang off them.
//!
//! Every category that hands out numeric IDs has its own independent ID space
//! (see [`crate::ids::IdSpace`]). The `Display` form of [`EquipType`] and
//! [`MountTextureType`] doubles as the texture-path suffix used by autoload
//! conventions, so variant names are part of the asset naming contract.

/// Content categories whose descriptors receive a numeric ID.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ContentCategory {
    Item,
    Dust,
    Tile,
    TileEntity,
    Wall,
    Projectile,
    Npc,
    Buff,
    Mount,
    UgBgStyle,
    SurfaceBgStyle,
    WaterStyle,
    WaterfallStyle,
}

/// Body slots an item can render into.
///
/// Each equip type owns its own slot space.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum EquipType {
    Head,
    Body,
    Legs,
    HandsOn,
    HandsOff,
    Back,
    Front,
    Shoe,
    Waist,
    Wings,
    Shield,
    Neck,
    Face,
    Balloon,
}

impl EquipType {
    /// Armor slots whose slot number maps back to the owning item type.
    pub const fn is_armor(&self) -> bool {
        matches!(self, Self::Head | Self::Body | Self::Legs)
    }
}

/// Sound sub-categories, each with its own slot space.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum SoundType {
    Custom,
    Item,
    NPCHit,
    NPCKilled,
    Music,
}

impl SoundType {
    /// Classifies a path relative to the module's `Sounds/` folder.
    ///
    /// `Item/`, `NPCHit/`, `NPCKilled/` and `Music/` prefixes select their
    /// category; everything else is [`SoundType::Custom`].
    pub fn from_folder(relative: &str) -> Self {
        if relative.starts_with("Item/") {
            Self::Item
        } else if relative.starts_with("NPCHit/") {
            Self::NPCHit
        } else if relative.starts_with("NPCKilled/") {
            Self::NPCKilled
        } else if relative.starts_with("Music/") {
            Self::Music
        } else {
            Self::Custom
        }
    }
}

/// Optional extra mount textures, autoloaded as `<texture>_<Variant>`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MountTextureType {
    Back,
    BackGlow,
    BackExtra,
    BackExtraGlow,
    Front,
    FrontGlow,
    FrontExtra,
    FrontExtraGlow,
}
