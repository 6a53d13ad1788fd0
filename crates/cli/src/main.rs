//! Mod loader host binary.
//!
//! Discovers every module folder under the mods directory, loads them in
//! name order, sets their content up into fresh host tables, logs a report
//! and unloads everything again.
//!
//! ```bash
//! MODLOADER_MODS_DIR=./mods MODLOADER_HEADLESS=true cargo run -p modloader-cli
//! ```
mod config;
mod logging;
mod module;
mod report;

use std::sync::Arc;

use anyhow::Result;
use config::CliConfig;
use modloader_assets::{AssetDecoder, DirectoryArchive, StandardDecoder};
use modloader_content::ModFolder;
use module::DataModule;
use runtime::{HostTables, ModLoader, ModSource};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let settings = config.loader_settings()?;
    let decoder: Option<Arc<dyn AssetDecoder>> = if settings.headless {
        None
    } else {
        Some(Arc::new(StandardDecoder))
    };
    let mut loader = ModLoader::from_settings(settings, decoder)?;
    tracing::info!(
        mods_dir = %config.mods_dir.display(),
        headless = loader.is_headless(),
        "starting mod loader"
    );

    for folder in ModFolder::discover(&config.mods_dir)? {
        let info = folder.load_manifest()?;
        if !info.side.loads_on(loader.is_headless()) {
            tracing::info!(module = %info.name, side = %info.side, "skipping module for this host");
            continue;
        }

        let catalog = folder.load_catalog()?;
        let archive = DirectoryArchive::open(folder.root())?;
        let module = DataModule::new(info.name.clone(), catalog);
        let name = info.name.clone();
        if let Err(err) = loader.load(ModSource::new(info, archive, module)) {
            tracing::warn!(module = %name, error = %err, "module skipped");
        }
    }

    let mut host = HostTables::new();
    loader.setup_content(&mut host)?;
    report::log_report(&loader, &host);

    loader.unload_all();
    tracing::info!("mod loader shutdown complete");
    Ok(())
}
