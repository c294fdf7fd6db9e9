//! Run configuration (ss14-tiled.yaml).
//!
//! The file is optional and read from the working directory. It picks the
//! output directory and lists prototype files to leave out of discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TiledError};

/// The name of the configuration file.
pub const CONFIG_FILENAME: &str = "ss14-tiled.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where tilesets, images and ledgers are written.
    pub output: PathBuf,

    /// Patterns for prototype files to skip.
    pub excludes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            excludes: vec![],
        }
    }
}

impl Config {
    /// Load `ss14-tiled.yaml` from `dir`, or the defaults when it is absent.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TiledError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty file decodes as null, which serde_yaml rejects for a struct.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| TiledError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");

        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }
}

/// Simple glob matching: `*.ext`, `**/dir/*`, `dir/*`, otherwise substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix)) || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
