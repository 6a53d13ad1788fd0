//! CLI configuration from the environment.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use modloader_content::ConfigLoader;
use modloader_core::LoaderSettings;

/// Where to find modules and how to host them.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub mods_dir: PathBuf,
    /// Overrides `cache_dir` from the settings file.
    pub cache_dir: Option<PathBuf>,
    /// Overrides `headless` from the settings file.
    pub headless: Option<bool>,
    /// Optional `modloader.toml`.
    pub config_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mods_dir: PathBuf::from("mods"),
            cache_dir: None,
            headless: None,
            config_path: None,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MODLOADER_MODS_DIR` - Folder holding one subfolder per module (default: `mods`)
    /// - `MODLOADER_CACHE_DIR` - Root of the transcoded-audio and font caches
    /// - `MODLOADER_HEADLESS` - `true` to run as a server (no asset decoding)
    /// - `MODLOADER_CONFIG` - Path to a `modloader.toml` settings file
    /// - `MODLOADER_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("MODLOADER_MODS_DIR") {
            config.mods_dir = dir;
        }
        config.cache_dir = read_env("MODLOADER_CACHE_DIR");
        config.headless = read_env("MODLOADER_HEADLESS");
        config.config_path = read_env("MODLOADER_CONFIG");
        config.log_dir = read_env("MODLOADER_LOG_DIR");

        config
    }

    /// Settings file (or defaults) with environment overrides applied.
    pub fn loader_settings(&self) -> Result<LoaderSettings> {
        let mut settings = match &self.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => LoaderSettings::default(),
        };
        if let Some(headless) = self.headless {
            settings.headless = headless;
        }
        if let Some(dir) = &self.cache_dir {
            settings.cache_dir = Some(dir.clone());
        }
        Ok(settings)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_settings_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("modloader.toml");
        std::fs::write(&path, "headless = false\n[vanilla]\nitems = 4000\n").unwrap();

        let config = CliConfig {
            headless: Some(true),
            config_path: Some(path),
            cache_dir: Some(dir.path().join("cache")),
            ..CliConfig::default()
        };
        let settings = config.loader_settings().unwrap();
        assert!(settings.headless);
        assert_eq!(settings.vanilla.items, 4000);
        assert_eq!(settings.cache_dir, Some(dir.path().join("cache")));
    }

    #[test]
    fn defaults_without_file() {
        let settings = CliConfig::default().loader_settings().unwrap();
        assert_eq!(settings, LoaderSettings::default());
    }
}
