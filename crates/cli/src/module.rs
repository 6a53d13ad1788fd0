//! Modules defined entirely by their `content.ron` catalog.
use modloader_assets::AssetError;
use modloader_content::{ContentCatalog, MusicBoxSpec};
use modloader_core::{ContentType, RegistryError, SoundType};
use runtime::{Mod, ModContext};
use tracing::debug;

/// A [`Mod`] whose registration table comes from a [`ContentCatalog`].
///
/// Catalog entries are discovered like any other content type; music boxes
/// are bound manually once discovery has registered their item, tile and
/// track.
pub struct DataModule {
    name: String,
    catalog: ContentCatalog,
}

impl DataModule {
    pub fn new(name: impl Into<String>, catalog: ContentCatalog) -> Self {
        Self {
            name: name.into(),
            catalog,
        }
    }

    fn bind_music_box(ctx: &mut ModContext<'_>, spec: &MusicBoxSpec) -> runtime::Result<()> {
        let music = ctx
            .get_sound_slot(SoundType::Music, &spec.music)
            .ok_or_else(|| AssetError::MissingResource(ctx.qualify(&spec.music)))?;
        let item = ctx.item_type(&spec.item);
        if item == 0 {
            return Err(unknown(ctx, "item", &spec.item).into());
        }
        let tile = ctx.tile_type(&spec.tile);
        if tile == 0 {
            return Err(unknown(ctx, "tile", &spec.tile).into());
        }

        ctx.add_music_box(music, item, tile, spec.frame_y)?;
        debug!(module = %ctx.name(), music = %spec.music, item, tile, "bound music box");
        Ok(())
    }
}

fn unknown(ctx: &ModContext<'_>, table: &'static str, name: &str) -> RegistryError {
    RegistryError::UnknownContent {
        table,
        module: ctx.name().to_string(),
        name: name.to_string(),
    }
}

impl Mod for DataModule {
    fn content_types(&self) -> Vec<ContentType> {
        self.catalog.content_types(&self.name)
    }

    fn load(&mut self, ctx: &mut ModContext<'_>) -> runtime::Result<()> {
        for spec in &self.catalog.music_boxes {
            Self::bind_music_box(ctx, spec)?;
        }
        Ok(())
    }
}
