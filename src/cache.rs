//! Append-only artifact ledger.
//!
//! Each logical tileset keeps a JSON ledger of the ids it has published and
//! the image metadata recorded when each id was first seen. The position of
//! an id in the ledger is its tile id, so ids are only ever appended: a
//! rerun keeps every existing tile id and adds new ones at the end.
//!
//! ```json
//! { "ids": ["FloorSteel"], "images": [{"source": "./.images/tiles/FloorSteel.png", "width": "32", "height": "32"}] }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TiledError};

const REBUILD_HELP: &str = "Delete the ledger to rebuild it; tile ids will be renumbered";

/// Image reference recorded in a ledger. Dimensions are kept as strings,
/// the way they are written into the tileset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub source: String,
    pub width: String,
    pub height: String,
}

impl Image {
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width: width.to_string(),
            height: height.to_string(),
        }
    }

    /// Width as a number; 0 if the stored text is not one.
    pub fn width_px(&self) -> u32 {
        self.width.parse().unwrap_or(0)
    }

    /// Height as a number; 0 if the stored text is not one.
    pub fn height_px(&self) -> u32 {
        self.height.parse().unwrap_or(0)
    }
}

/// Parallel id/image lists. Position `i` (0-based) is tile id `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    ids: Vec<String>,
    images: Vec<Image>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CacheRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger, or an empty one if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| TiledError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read ledger: {}", e),
        })?;

        Self::parse(&content).map_err(|e| match e {
            TiledError::Setup { message, help } => TiledError::Setup {
                message: format!("{}: {}", path.display(), message),
                help,
            },
            TiledError::Parse { message, help } => TiledError::Parse {
                message: format!("{}: {}", path.display(), message),
                help,
            },
            other => other,
        })
    }

    /// Parse ledger JSON and check its invariants.
    pub fn parse(content: &str) -> Result<Self> {
        let mut record: CacheRecord =
            serde_json::from_str(content).map_err(|e| TiledError::Parse {
                message: format!("Invalid ledger: {}", e),
                help: Some(REBUILD_HELP.to_string()),
            })?;

        if record.ids.len() != record.images.len() {
            return Err(TiledError::Setup {
                message: format!(
                    "ledger has {} ids but {} images",
                    record.ids.len(),
                    record.images.len()
                ),
                help: Some(REBUILD_HELP.to_string()),
            });
        }

        for (position, id) in record.ids.iter().enumerate() {
            if record.index.insert(id.clone(), position).is_some() {
                return Err(TiledError::Setup {
                    message: format!("ledger lists '{}' more than once", id),
                    help: Some(REBUILD_HELP.to_string()),
                });
            }
        }

        Ok(record)
    }

    /// Append `id` with its image unless the id is already recorded.
    ///
    /// Returns whether the ledger changed.
    pub fn record_if_new(&mut self, id: &str, image: Image) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        self.index.insert(id.to_string(), self.ids.len());
        self.ids.push(id.to_string());
        self.images.push(image);
        true
    }

    /// Write the whole ledger as JSON, creating parent directories.
    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TiledError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create ledger directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| TiledError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to serialize ledger: {}", e),
        })?;
        fs::write(path, json).map_err(|e| TiledError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write ledger: {}", e),
        })
    }

    /// 1-based tile id of a recorded id.
    pub fn tile_id(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|position| position + 1)
    }

    pub fn get(&self, id: &str) -> Option<&Image> {
        self.index.get(id).map(|&position| &self.images[position])
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries in ledger order with their 1-based tile ids.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &Image)> {
        self.ids
            .iter()
            .zip(&self.images)
            .enumerate()
            .map(|(position, (id, image))| (position + 1, id.as_str(), image))
    }
}

/// A ledger together with the file it lives in.
///
/// Opened at the start of one tileset's generation and persisted at its end.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    record: CacheRecord,
}

impl CacheStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = CacheRecord::load(&path)?;
        tracing::debug!(path = %path.display(), entries = record.len(), "opened ledger");
        Ok(Self { path, record })
    }

    pub fn record_if_new(&mut self, id: &str, image: Image) -> bool {
        let added = self.record.record_if_new(id, image);
        if !added {
            tracing::trace!(id, "already in ledger");
        }
        added
    }

    /// Write the ledger back and hand it over for tileset writing.
    pub fn persist(self) -> Result<CacheRecord> {
        self.record.persist(&self.path)?;
        Ok(self.record)
    }
}
