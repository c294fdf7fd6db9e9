//! File system scanner for prototype files.
//!
//! Walks `Resources/Prototypes` in lexical order and keeps the YAML files.
//! The order matters: ledger ids are assigned in discovery order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;

/// Prototype kinds the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrototypeKind {
    Tile,
    Decal,
    Palette,
    Entity,
}

impl PrototypeKind {
    /// Map a prototype `type` tag to a kind; other types are ignored.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tile" => Some(Self::Tile),
            "decal" => Some(Self::Decal),
            "palette" => Some(Self::Palette),
            "entity" => Some(Self::Entity),
            _ => None,
        }
    }
}

/// Whether the path looks like a prototype file.
pub fn is_prototype_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml" | "yaml")
    )
}

/// Scan a directory for prototype files, sorted by file name at every level.
pub fn scan_directory(root: &Path, config: &Config) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable entry during scan");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_prototype_file(path))
        .filter(|path| !config.is_excluded(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(PrototypeKind::from_tag("entity"), Some(PrototypeKind::Entity));
        assert_eq!(PrototypeKind::from_tag("tile"), Some(PrototypeKind::Tile));
        assert_eq!(PrototypeKind::from_tag("decal"), Some(PrototypeKind::Decal));
        assert_eq!(PrototypeKind::from_tag("palette"), Some(PrototypeKind::Palette));
        assert_eq!(PrototypeKind::from_tag("reagent"), None);
        assert_eq!(PrototypeKind::from_tag("Entity"), None);
    }

    #[test]
    fn test_is_prototype_file() {
        assert!(is_prototype_file(Path::new("Entities/walls.yml")));
        assert!(is_prototype_file(Path::new("tiles.yaml")));
        assert!(!is_prototype_file(Path::new("meta.json")));
        assert!(!is_prototype_file(Path::new("README")));
    }

    #[test]
    fn test_scan_sorted_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/inner")).unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("b/inner/z.yml"), "").unwrap();
        fs::write(dir.path().join("b/c.yml"), "").unwrap();
        fs::write(dir.path().join("a/y.yaml"), "").unwrap();
        fs::write(dir.path().join("a/notes.txt"), "").unwrap();

        let files = scan_directory(dir.path(), &Config::default());
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(relative, vec!["a/y.yaml", "b/c.yml", "b/inner/z.yml"]);
    }

    #[test]
    fn test_scan_with_excludes() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Debugging")).unwrap();
        fs::write(dir.path().join("walls.yml"), "").unwrap();
        fs::write(dir.path().join("Debugging/spawners.yml"), "").unwrap();

        let config = Config {
            excludes: vec!["**/Debugging/*".to_string()],
            ..Default::default()
        };
        let files = scan_directory(dir.path(), &config);

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("walls.yml"));
    }

    #[test]
    fn test_scan_nonexistent_directory() {
        assert!(scan_directory(Path::new("/nonexistent/path"), &Config::default()).is_empty());
    }
}
