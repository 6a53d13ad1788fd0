//! The module entry point.

use modloader_core::{ContentType, HookVersion};

use crate::context::ModContext;
use crate::error::Result;
use crate::registry::Registry;

/// A loadable module.
///
/// The loader asks for the module's content types, runs discovery over them,
/// then calls [`Mod::load`] for manual registrations. After every module has
/// loaded and the host tables are populated, [`Mod::post_setup_content`] runs
/// in load order.
pub trait Mod: Send + Sync {
    /// Hook signatures this module's entry point implements.
    fn hook_versions(&self) -> &'static [HookVersion] {
        &[]
    }

    /// Registration table scanned by discovery. Order does not matter.
    fn content_types(&self) -> Vec<ContentType> {
        Vec::new()
    }

    /// Manual registrations, after discovery.
    fn load(&mut self, _ctx: &mut ModContext<'_>) -> Result<()> {
        Ok(())
    }

    fn post_setup_content(&mut self, _registry: &Registry) {}

    /// Releases module-held state. The loader clears the module's registry
    /// entries afterwards.
    fn unload(&mut self) {}

    /// Cross-module message entry point.
    fn call(&self, _args: &serde_json::Value) -> Option<serde_json::Value> {
        None
    }
}
