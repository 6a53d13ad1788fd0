//! Module identity: name, version, side and autoload properties.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bitflags::bitflags;

use crate::ids::VanillaCounts;

/// Module version in `major.minor.patch[.build]` form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build: 0,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.build != 0 {
            write!(f, ".{}", self.build)?;
        }
        Ok(())
    }
}

/// Error returned when a version string is malformed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid version '{0}': expected major.minor[.patch[.build]]")]
pub struct ParseVersionError(pub String);

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseVersionError(s.to_string()))?;

        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            [major, minor, patch, build] => Ok(Self {
                major: *major,
                minor: *minor,
                patch: *patch,
                build: *build,
            }),
            _ => Err(ParseVersionError(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Which side of a multiplayer session a module must be present on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModSide {
    /// Required on both client and server.
    #[default]
    Both,
    /// Only loaded by clients.
    Client,
    /// Only loaded by servers.
    Server,
    /// Loaded wherever installed; not synced.
    NoSync,
}

impl ModSide {
    /// Whether a host running in the given mode loads modules of this side.
    pub const fn loads_on(&self, headless: bool) -> bool {
        match self {
            ModSide::Client => !headless,
            ModSide::Server => headless,
            ModSide::Both | ModSide::NoSync => true,
        }
    }
}

bitflags! {
    /// Module-level switches for the discovery conventions.
    ///
    /// Each flag gates one convention for the whole module; a cleared flag
    /// skips the convention entirely.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ModProperties: u8 {
        /// Register every content type in the module's registration table.
        const AUTOLOAD             = 1 << 0;
        /// Register `Gores/` textures as gore slots.
        const AUTOLOAD_GORES       = 1 << 1;
        /// Register `Sounds/` assets as sound slots.
        const AUTOLOAD_SOUNDS      = 1 << 2;
        /// Register `Backgrounds/` textures as background slots.
        const AUTOLOAD_BACKGROUNDS = 1 << 3;
    }
}

impl Default for ModProperties {
    fn default() -> Self {
        Self::all()
    }
}

/// Static metadata for one module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleInfo {
    pub name: String,
    pub display_name: String,
    pub version: Version,
    pub side: ModSide,
    pub properties: ModProperties,
}

impl ModuleInfo {
    /// Creates module metadata with default side and properties.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            version,
            side: ModSide::default(),
            properties: ModProperties::default(),
        }
    }

    #[must_use]
    pub fn with_side(mut self, side: ModSide) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: ModProperties) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}

/// Loader-wide settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoaderSettings {
    /// Server mode: no textures, sounds or fonts are decoded.
    pub headless: bool,
    pub vanilla: VanillaCounts,
    /// Root of the transcoded-audio and font caches.
    pub cache_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_version_forms() {
        assert_eq!("1.2".parse::<Version>().unwrap(), Version::new(1, 2, 0));
        assert_eq!("1.2.3".parse::<Version>().unwrap(), Version::new(1, 2, 3));
        let full: Version = "0.10.1.5".parse().unwrap();
        assert_eq!(full.build, 5);
        assert_eq!(full.to_string(), "0.10.1.5");
        assert!("1".parse::<Version>().is_err());
        assert!("1.x.2".parse::<Version>().is_err());
    }

    #[test]
    fn versions_order_numerically() {
        let older: Version = "0.9.2".parse().unwrap();
        let newer: Version = "0.10.0".parse().unwrap();
        assert!(older < newer);
    }

    #[test]
    fn side_filters_by_host_mode() {
        assert!(ModSide::Both.loads_on(true));
        assert!(!ModSide::Client.loads_on(true));
        assert!(ModSide::Client.loads_on(false));
        assert!(!ModSide::Server.loads_on(false));
    }

    #[test]
    fn default_properties_enable_every_convention() {
        let props = ModProperties::default();
        assert!(props.contains(ModProperties::AUTOLOAD | ModProperties::AUTOLOAD_SOUNDS));
    }
}
