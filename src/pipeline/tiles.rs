//! Floor tile tileset.

use serde_yaml::Value;

use crate::error::Result;
use crate::output::Printer;
use crate::render::SpriteCompositor;
use crate::types::Prototype;

use super::builder::{OutputLayout, TilesetBuilder, TilesetJob, TilesetReport};

pub fn generate_tiles(
    tiles: &[Prototype],
    compositor: &SpriteCompositor,
    layout: &OutputLayout,
    printer: &Printer,
) -> Result<TilesetReport> {
    let mut builder = TilesetBuilder::open(layout, printer, TilesetJob::new("tiles", "Tiles"))?;

    for tile in tiles {
        // Space and other sprite-less tiles have nothing to draw.
        let Some(sprite) = tile.field("sprite").and_then(Value::as_str) else {
            tracing::debug!(tile = %tile.id, "no sprite");
            continue;
        };

        let variants = match tile.field("variants") {
            None | Some(Value::Null) => 1,
            Some(value) => value.as_i64().unwrap_or(0),
        };

        builder.add(&tile.id, compositor.tile(sprite, variants))?;
    }

    builder.finish()
}
