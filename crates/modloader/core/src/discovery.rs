//! Explicit registration table consumed by autoload.
//!
//! A module lists its content as [`ContentType`] entries: a fully qualified
//! name plus a factory producing a fresh capability object. Autoload sorts
//! the table by qualified name and dispatches on the factory variant, so the
//! capability categories are mutually exclusive by construction.

use std::fmt;
use std::sync::Arc;

use crate::content::{
    GlobalBgStyle, GlobalBuff, GlobalItem, GlobalNpc, GlobalProjectile, GlobalTile, GlobalWall,
    ModBuff, ModDust, ModGore, ModItem, ModMount, ModNpc, ModPlayer, ModProjectile, ModSound,
    ModSurfaceBgStyle, ModTile, ModTileEntity, ModUgBgStyle, ModWall, ModWaterStyle,
    ModWaterfallStyle, ModWorld, simple_name,
};
use crate::hooks::{HookOwner, HookVersion};

/// Shared constructor for one capability object.
pub type Factory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

macro_rules! content_factories {
    ($( $variant:ident($trait_:ident) => $ctor:ident ),+ $(,)?) => {
        /// Capability category of a content type, with its constructor.
        #[derive(Clone)]
        pub enum ContentFactory {
            $( $variant(Factory<dyn $trait_>), )+
        }

        impl ContentFactory {
            /// Variant name, used in diagnostics.
            pub const fn label(&self) -> &'static str {
                match self {
                    $( ContentFactory::$variant(_) => stringify!($variant), )+
                }
            }
        }

        impl ContentType {
            $(
                pub fn $ctor<T>(full_name: impl Into<String>) -> Self
                where
                    T: $trait_ + Default + 'static,
                {
                    let factory: Factory<dyn $trait_> =
                        Arc::new(|| Box::new(T::default()) as Box<dyn $trait_>);
                    Self::new(full_name, ContentFactory::$variant(factory))
                }
            )+
        }
    };
}

content_factories! {
    Item(ModItem) => item,
    GlobalItem(GlobalItem) => global_item,
    Dust(ModDust) => dust,
    Tile(ModTile) => tile,
    GlobalTile(GlobalTile) => global_tile,
    TileEntity(ModTileEntity) => tile_entity,
    Wall(ModWall) => wall,
    GlobalWall(GlobalWall) => global_wall,
    Projectile(ModProjectile) => projectile,
    GlobalProjectile(GlobalProjectile) => global_projectile,
    Npc(ModNpc) => npc,
    GlobalNpc(GlobalNpc) => global_npc,
    Player(ModPlayer) => player,
    Buff(ModBuff) => buff,
    GlobalBuff(GlobalBuff) => global_buff,
    Mount(ModMount) => mount,
    World(ModWorld) => world,
    UgBgStyle(ModUgBgStyle) => ug_bg_style,
    SurfaceBgStyle(ModSurfaceBgStyle) => surface_bg_style,
    GlobalBgStyle(GlobalBgStyle) => global_bg_style,
    WaterStyle(ModWaterStyle) => water_style,
    WaterfallStyle(ModWaterfallStyle) => waterfall_style,
    Gore(ModGore) => gore,
    Sound(ModSound) => sound,
}

impl ContentFactory {
    /// Instantiates the type once and reports the versioned hooks it
    /// declares, for the capabilities that have any.
    pub fn declared_hooks(&self) -> Option<(HookOwner, &'static [HookVersion])> {
        match self {
            ContentFactory::Item(factory) => Some((HookOwner::ModItem, factory().hook_versions())),
            ContentFactory::GlobalItem(factory) => {
                Some((HookOwner::GlobalItem, factory().hook_versions()))
            }
            ContentFactory::Player(factory) => {
                Some((HookOwner::ModPlayer, factory().hook_versions()))
            }
            _ => None,
        }
    }
}

/// One entry of a module's registration table.
#[derive(Clone)]
pub struct ContentType {
    full_name: String,
    factory: ContentFactory,
}

impl ContentType {
    pub fn new(full_name: impl Into<String>, factory: ContentFactory) -> Self {
        Self {
            full_name: full_name.into(),
            factory,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.full_name)
    }

    pub fn factory(&self) -> &ContentFactory {
        &self.factory
    }
}

impl fmt::Debug for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentType")
            .field("full_name", &self.full_name)
            .field("category", &self.factory.label())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookName;

    #[derive(Default)]
    struct Sword;
    impl ModItem for Sword {}

    #[derive(Default)]
    struct OldRenderer;
    impl GlobalItem for OldRenderer {
        fn hook_versions(&self) -> &'static [HookVersion] {
            const VERSIONS: &[HookVersion] = &[HookVersion::new(HookName::PostDrawInWorld, 1)];
            VERSIONS
        }
    }

    #[derive(Default)]
    struct Explosion;
    impl ModGore for Explosion {}

    #[test]
    fn generic_constructor_tags_category() {
        let ty = ContentType::item::<Sword>("Foo.Items.Sword");
        assert_eq!(ty.simple_name(), "Sword");
        assert_eq!(ty.factory().label(), "Item");
        assert!(matches!(ty.factory(), ContentFactory::Item(_)));
    }

    #[test]
    fn declared_hooks_probe_versioned_capabilities_only() {
        let global = ContentType::global_item::<OldRenderer>("Foo.OldRenderer");
        let (owner, hooks) = global.factory().declared_hooks().unwrap();
        assert_eq!(owner, HookOwner::GlobalItem);
        assert_eq!(hooks.len(), 1);

        let gore = ContentType::gore::<Explosion>("Foo.Gores.Explosion");
        assert!(gore.factory().declared_hooks().is_none());
    }
}
