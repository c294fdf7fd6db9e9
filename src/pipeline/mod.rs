//! The generation pipeline.
//!
//! One run discovers prototypes under a resource root and writes three
//! families of tilesets, in this order:
//!
//! 1. `decals` plus `decals_<colour>` for every palette colour
//! 2. `entities_<group>` for every entity group
//! 3. `tiles`
//!
//! Each tileset has its own ledger, opened when the tileset starts and
//! persisted when it is done. Problems with single items are reported and
//! skipped; anything structural aborts the run.

mod builder;
mod decals;
mod entities;
mod tiles;

use std::path::Path;

use crate::config::Config;
use crate::discovery::discover;
use crate::error::Result;
use crate::filter::{EntityFilter, Grouping, SingleGroup};
use crate::output::{plural, Printer};
use crate::registry::resolve_entities;
use crate::render::{SpriteCompositor, Textures};

pub use builder::{OutputLayout, TilesetBuilder, TilesetJob, TilesetReport};
pub use decals::generate_decals;
pub use entities::generate_entities;
pub use tiles::generate_tiles;

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Prototype files read.
    pub files: usize,
    /// Entities left after resolution and filtering.
    pub entities: usize,
    pub tilesets: Vec<TilesetReport>,
}

impl Summary {
    pub fn written(&self) -> usize {
        self.tilesets.iter().map(|t| t.written).sum()
    }

    pub fn added(&self) -> usize {
        self.tilesets.iter().map(|t| t.added).sum()
    }

    pub fn skipped(&self) -> usize {
        self.tilesets.iter().map(|t| t.skipped).sum()
    }
}

/// Generate every tileset for the resource root at `root`.
pub fn generate(root: &Path, config: &Config, printer: &Printer) -> Result<Summary> {
    generate_with(root, config, printer, &SingleGroup)
}

/// Like [`generate`], with a custom entity grouping.
pub fn generate_with(
    root: &Path,
    config: &Config,
    printer: &Printer,
    grouping: &dyn Grouping,
) -> Result<Summary> {
    let discovery = discover(root, config)?;
    let scan = discovery.scan;
    printer.info(
        "Found",
        &format!(
            "{}, {}, {}, {} in {}",
            plural(scan.tiles.len(), "tile", "tiles"),
            plural(scan.decals.len(), "decal", "decals"),
            plural(scan.palettes.len(), "palette", "palettes"),
            plural(scan.entities.len(), "entity", "entities"),
            plural(discovery.files, "file", "files"),
        ),
    );

    let layout = OutputLayout::new(&config.output);
    let mut compositor = SpriteCompositor::new(Textures::new(&discovery.layout.textures));
    let mut summary = Summary {
        files: discovery.files,
        ..Default::default()
    };

    summary.tilesets.extend(generate_decals(
        &scan.decals,
        &scan.palettes,
        &mut compositor,
        &layout,
        printer,
    )?);

    let entities = EntityFilter::default().apply(resolve_entities(scan.entities)?);
    summary.entities = entities.len();
    let groups = grouping.group(entities);
    summary
        .tilesets
        .extend(generate_entities(&groups, &mut compositor, &layout, printer)?);

    summary
        .tilesets
        .push(generate_tiles(&scan.tiles, &compositor, &layout, printer)?);

    Ok(summary)
}
