//! Resource discovery for a game checkout.
//!
//! A resource root holds `Resources/Prototypes` (YAML prototype files) and
//! `Resources/Textures` (sprites and RSIs). Discovery checks the layout,
//! walks the prototype tree and partitions what it finds by kind.
//!
//! # Example
//!
//! ```ignore
//! use ss14_tiled::{config::Config, discovery::discover};
//!
//! let result = discover("~/space-station-14", &Config::default())?;
//! println!("Found {} entities", result.scan.entities.len());
//! ```

mod loader;
mod scanner;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, TiledError};

pub use loader::{load_prototypes, parse_entries, parse_prototypes, strip_tags, ScanResult};
pub use scanner::{is_prototype_file, scan_directory, PrototypeKind};

/// The two directories a resource root must provide.
#[derive(Debug, Clone)]
pub struct ResourceLayout {
    pub root: PathBuf,
    pub prototypes: PathBuf,
    pub textures: PathBuf,
}

impl ResourceLayout {
    /// Check that `root` looks like a game checkout.
    pub fn locate(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let resources = root.join("Resources");
        let layout = Self {
            prototypes: resources.join("Prototypes"),
            textures: resources.join("Textures"),
            root,
        };

        for dir in [&layout.prototypes, &layout.textures] {
            if !dir.is_dir() {
                return Err(TiledError::Setup {
                    message: format!("Missing directory {}", dir.display()),
                    help: Some(
                        "Point ss14-tiled at the root of a Space Station 14 checkout".to_string(),
                    ),
                });
            }
        }

        Ok(layout)
    }
}

/// Result of discovering prototypes in a resource root.
#[derive(Debug)]
pub struct DiscoveryResult {
    pub layout: ResourceLayout,
    /// Number of prototype files read.
    pub files: usize,
    pub scan: ScanResult,
}

/// Discover and load every prototype under a resource root.
pub fn discover(root: impl AsRef<Path>, config: &Config) -> Result<DiscoveryResult> {
    let layout = ResourceLayout::locate(root)?;
    let files = scan_directory(&layout.prototypes, config);
    let scan = load_prototypes(&files)?;

    Ok(DiscoveryResult {
        layout,
        files: files.len(),
        scan,
    })
}
