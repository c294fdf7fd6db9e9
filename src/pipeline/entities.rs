//! Entity tilesets, one per group.

use crate::error::Result;
use crate::filter::EntityGroup;
use crate::output::Printer;
use crate::render::SpriteCompositor;

use super::builder::{OutputLayout, TilesetBuilder, TilesetJob, TilesetReport};

/// Images of every group share one directory.
const IMAGE_DIR: &str = "entities";

pub fn generate_entities(
    groups: &[EntityGroup],
    compositor: &mut SpriteCompositor,
    layout: &OutputLayout,
    printer: &Printer,
) -> Result<Vec<TilesetReport>> {
    let mut reports = Vec::with_capacity(groups.len());

    for group in groups {
        let job = TilesetJob::new(
            format!("entities_{}", group.name),
            format!("Entities - {}", group.name),
        )
        .with_image_dir(IMAGE_DIR);

        let mut builder = TilesetBuilder::open(layout, printer, job)?;
        for (id, entity) in &group.entities {
            builder.add(id, compositor.entity(entity)?)?;
        }
        reports.push(builder.finish()?);
    }

    Ok(reports)
}
