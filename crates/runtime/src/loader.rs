//! Module lifecycle: load, setup, unload.
//!
//! Modules are processed one at a time in the order they are handed to
//! [`ModLoader::load`]. A load either registers the whole module or rolls
//! back everything it produced; setup then binds every registered module into
//! the host tables, and unload reverses registration without touching them.

use std::sync::Arc;

use modloader_assets::{AssetCache, AssetDecoder, AssetLoader, DiskCache, ModArchive};
use modloader_core::{LoaderSettings, ModuleInfo};
use tracing::{debug, error, info};

use crate::autoload::{autoload, check_deprecated_hooks};
use crate::context::ModContext;
use crate::error::{LoadError, Result};
use crate::host::HostTables;
use crate::modding::Mod;
use crate::registry::Registry;
use crate::resources::{ModuleAssets, Resources};
use crate::setup::setup_module;

/// Lifecycle state of one module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModState {
    #[default]
    Unloaded,
    Discovering,
    Registered,
    SetUp,
}

/// Everything needed to load one module.
pub struct ModSource {
    pub info: ModuleInfo,
    pub archive: Box<dyn ModArchive>,
    pub module: Box<dyn Mod>,
}

impl ModSource {
    pub fn new(
        info: ModuleInfo,
        archive: impl ModArchive + 'static,
        module: impl Mod + 'static,
    ) -> Self {
        Self {
            info,
            archive: Box::new(archive),
            module: Box::new(module),
        }
    }
}

/// A module that finished discovery.
pub struct LoadedModule {
    pub(crate) info: ModuleInfo,
    pub(crate) archive: Box<dyn ModArchive>,
    pub(crate) assets: AssetCache,
    pub(crate) module: Box<dyn Mod>,
    pub(crate) state: ModState,
}

impl LoadedModule {
    pub fn info(&self) -> &ModuleInfo {
        &self.info
    }

    pub fn state(&self) -> ModState {
        self.state
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("info", &self.info)
            .field("assets", &self.assets.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Owns the registry and every loaded module.
pub struct ModLoader {
    settings: LoaderSettings,
    registry: Registry,
    assets: AssetLoader,
    modules: Vec<LoadedModule>,
}

impl ModLoader {
    pub fn new(settings: LoaderSettings, assets: AssetLoader) -> Self {
        let registry = Registry::new(settings.vanilla.clone());
        Self {
            settings,
            registry,
            assets,
            modules: Vec::new(),
        }
    }

    /// Builds the asset loader from settings: headless hosts decode nothing,
    /// clients use `decoder` and the disk cache under `cache_dir` if set.
    pub fn from_settings(
        settings: LoaderSettings,
        decoder: Option<Arc<dyn AssetDecoder>>,
    ) -> Result<Self> {
        let assets = match decoder {
            Some(decoder) if !settings.headless => {
                let loader = AssetLoader::new(decoder);
                match &settings.cache_dir {
                    Some(dir) => loader.with_disk_cache(DiskCache::new(dir)?),
                    None => loader,
                }
            }
            _ => AssetLoader::headless(),
        };
        Ok(Self::new(settings, assets))
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn is_headless(&self) -> bool {
        self.settings.headless
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn modules(&self) -> &[LoadedModule] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&LoadedModule> {
        self.modules.iter().find(|module| module.info.name == name)
    }

    pub fn module_state(&self, name: &str) -> ModState {
        self.module(name).map_or(ModState::Unloaded, LoadedModule::state)
    }

    /// Resource view rooted at a loaded module.
    pub fn resources(&self, name: &str) -> Option<Resources<'_>> {
        let module = self.module(name)?;
        Some(Resources::new(
            ModuleAssets::from(module),
            &self.modules,
            self.settings.headless,
        ))
    }

    /// Discovers and registers one module.
    ///
    /// On failure every registry entry the module produced is removed and the
    /// module is dropped.
    pub fn load(&mut self, source: ModSource) -> Result<()> {
        let ModSource {
            info,
            archive,
            mut module,
        } = source;

        if self.module(&info.name).is_some() {
            return Err(LoadError::DuplicateModule(info.name));
        }
        transition(&info.name, ModState::Unloaded, ModState::Discovering);

        match self.discover(&info, archive.as_ref(), module.as_mut()) {
            Ok(assets) => {
                transition(&info.name, ModState::Discovering, ModState::Registered);
                info!(
                    target: "modloader::loader",
                    module = %info.name,
                    version = %info.version,
                    side = %info.side,
                    assets = assets.len(),
                    "module registered"
                );
                self.modules.push(LoadedModule {
                    info,
                    archive,
                    assets,
                    module,
                    state: ModState::Registered,
                });
                Ok(())
            }
            Err(err) => {
                let removed = self.registry.unload_module(&info.name);
                error!(
                    target: "modloader::loader",
                    module = %info.name,
                    error = %err,
                    removed,
                    "module load aborted"
                );
                Err(err)
            }
        }
    }

    fn discover(
        &mut self,
        info: &ModuleInfo,
        archive: &dyn ModArchive,
        module: &mut dyn Mod,
    ) -> Result<AssetCache> {
        let types = module.content_types();
        check_deprecated_hooks(&*module, &types)?;

        let mut assets = self
            .assets
            .load(&info.name, &info.version.to_string(), archive)?;
        let mut ctx = ModContext::new(
            info,
            &mut self.registry,
            &mut assets,
            archive,
            &self.modules,
            self.settings.headless,
        );
        autoload(&mut ctx, &types)?;
        module.load(&mut ctx)?;
        Ok(assets)
    }

    /// Binds every registered module into `host`, in load order, then runs
    /// each module's post-setup hook.
    ///
    /// Modules that are already set up are bound again; the host clears its
    /// modded range with [`HostTables::reset_modded`] before a rebuild.
    ///
    /// If any module fails, the modded range of `host` is cleared and no
    /// module changes state.
    pub fn setup_content(&mut self, host: &mut HostTables) -> Result<()> {
        let headless = self.settings.headless;
        for module in &self.modules {
            let resources = Resources::new(ModuleAssets::from(module), &self.modules, headless);
            if let Err(err) = setup_module(&mut self.registry, &module.info.name, resources, host) {
                host.reset_modded(self.registry.vanilla());
                error!(
                    target: "modloader::loader",
                    module = %module.info.name,
                    error = %err,
                    "content setup aborted"
                );
                return Err(err);
            }
        }

        for module in &mut self.modules {
            if module.state != ModState::SetUp {
                transition(&module.info.name, module.state, ModState::SetUp);
                module.state = ModState::SetUp;
            }
        }
        for module in &mut self.modules {
            module.module.post_setup_content(&self.registry);
        }

        info!(
            target: "modloader::loader",
            modules = self.modules.len(),
            content = self.registry.content_len(),
            "content set up"
        );
        Ok(())
    }

    /// Unloads one module: its teardown hook runs, then every registry entry
    /// it owns is removed. Returns the number of entries removed.
    pub fn unload(&mut self, name: &str) -> Result<usize> {
        let index = self
            .modules
            .iter()
            .position(|module| module.info.name == name)
            .ok_or_else(|| LoadError::UnknownModule(name.to_string()))?;

        let mut loaded = self.modules.remove(index);
        Ok(self.teardown(&mut loaded))
    }

    /// Unloads every module in reverse load order.
    pub fn unload_all(&mut self) {
        while let Some(mut loaded) = self.modules.pop() {
            self.teardown(&mut loaded);
        }
    }

    /// Unloads everything and rewinds every ID counter.
    pub fn reset(&mut self) {
        self.unload_all();
        self.registry.reset();
        info!(target: "modloader::loader", "registry reset");
    }

    fn teardown(&mut self, loaded: &mut LoadedModule) -> usize {
        loaded.module.unload();
        let removed = self.registry.unload_module(&loaded.info.name);
        transition(&loaded.info.name, loaded.state, ModState::Unloaded);
        loaded.state = ModState::Unloaded;
        info!(
            target: "modloader::loader",
            module = %loaded.info.name,
            removed,
            "module unloaded"
        );
        removed
    }

    /// Sends an untyped message to a set-up module.
    pub fn call(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>> {
        let module = self
            .module(name)
            .ok_or_else(|| LoadError::UnknownModule(name.to_string()))?;
        if module.state != ModState::SetUp {
            return Err(LoadError::InvalidState {
                module: name.to_string(),
                state: module.state,
                operation: "call",
            });
        }
        Ok(module.module.call(args))
    }
}

fn transition(module: &str, from: ModState, to: ModState) {
    debug!(target: "modloader::loader", module, %from, %to, "state transition");
}
