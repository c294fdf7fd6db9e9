//! Output layout and per-tileset generation.

use std::fs;
use std::path::PathBuf;

use crate::cache::{CacheStore, Image};
use crate::error::{Result, TiledError};
use crate::output::{plural, Printer};
use crate::render::{write_png, Outcome};
use crate::tileset::write_tileset;

/// Paths inside the output directory.
///
/// ```text
/// <out>/<name>.tsx
/// <out>/.data/<name>.json
/// <out>/.images/<dir>/<id>.png
/// ```
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn tileset(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.tsx", name))
    }

    pub fn ledger(&self, name: &str) -> PathBuf {
        self.root.join(".data").join(format!("{}.json", name))
    }

    pub fn image_dir(&self, dir: &str) -> PathBuf {
        self.root.join(".images").join(dir)
    }

    pub fn image(&self, dir: &str, id: &str) -> PathBuf {
        self.image_dir(dir).join(format!("{}.png", id))
    }

    /// The image path as referenced from a tileset next to `.images`.
    pub fn image_source(dir: &str, id: &str) -> String {
        format!("./.images/{}/{}.png", dir, id)
    }
}

/// Describes one logical tileset.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetJob {
    /// File stem of the tileset and its ledger.
    pub name: String,
    /// Display name inside the tileset.
    pub title: String,
    /// Directory under `.images` receiving the rasters.
    pub image_dir: String,
    pub properties: Vec<(String, String)>,
}

impl TilesetJob {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            image_dir: name.clone(),
            name,
            title: title.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_image_dir(mut self, dir: impl Into<String>) -> Self {
        self.image_dir = dir.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }
}

/// Counts for one generated tileset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TilesetReport {
    pub name: String,
    /// Rasters written this run.
    pub written: usize,
    /// Ids appended to the ledger this run.
    pub added: usize,
    /// Items skipped with a reported reason.
    pub skipped: usize,
    /// Ledger length after the run.
    pub total: usize,
}

/// Generates one tileset: writes rasters, records them in the ledger and
/// finally writes the `.tsx`.
pub struct TilesetBuilder<'a> {
    layout: &'a OutputLayout,
    printer: &'a Printer,
    job: TilesetJob,
    store: CacheStore,
    report: TilesetReport,
}

impl<'a> TilesetBuilder<'a> {
    pub fn open(layout: &'a OutputLayout, printer: &'a Printer, job: TilesetJob) -> Result<Self> {
        let dir = layout.image_dir(&job.image_dir);
        fs::create_dir_all(&dir).map_err(|e| TiledError::Io {
            path: dir.clone(),
            message: format!("Failed to create image directory: {}", e),
        })?;

        printer.status("Generating", &format!("{} ({})", job.name, printer.dim(&job.title)));

        let store = CacheStore::open(layout.ledger(&job.name))?;
        let report = TilesetReport {
            name: job.name.clone(),
            ..Default::default()
        };

        Ok(Self {
            layout,
            printer,
            job,
            store,
            report,
        })
    }

    /// Write and record one rendered item, or report why it was skipped.
    pub fn add(&mut self, id: &str, outcome: Outcome) -> Result<()> {
        match outcome {
            Ok(img) => {
                write_png(&img, &self.layout.image(&self.job.image_dir, id))?;
                self.report.written += 1;

                let image = Image::new(
                    OutputLayout::image_source(&self.job.image_dir, id),
                    img.width(),
                    img.height(),
                );
                if self.store.record_if_new(id, image) {
                    self.report.added += 1;
                }
            }
            Err(skip) => self.skip(id, &skip.to_string()),
        }
        Ok(())
    }

    /// Report an item that produced no image.
    pub fn skip(&mut self, id: &str, reason: &str) {
        self.report.skipped += 1;
        self.printer.skip(id, reason);
    }

    /// Persist the ledger and write the tileset.
    pub fn finish(self) -> Result<TilesetReport> {
        let Self {
            layout,
            printer,
            job,
            store,
            mut report,
        } = self;

        let record = store.persist()?;
        let path = layout.tileset(&job.name);
        write_tileset(&path, &record, &job.title, &job.properties)?;

        report.total = record.len();
        tracing::debug!(
            tileset = %job.name,
            written = report.written,
            added = report.added,
            skipped = report.skipped,
            "tileset done"
        );
        printer.info(
            "Wrote",
            &format!(
                "{} {}",
                crate::output::display_path(&path),
                printer.dim(&format!(
                    "({}, {} new)",
                    plural(report.total, "tile", "tiles"),
                    report.added
                ))
            ),
        );

        Ok(report)
    }
}
