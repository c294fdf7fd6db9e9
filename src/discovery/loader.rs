//! Prototype loader - decodes YAML files into prototype records.
//!
//! Game prototypes use custom tags (`!type:Foo`) for polymorphic payloads.
//! None of them matter for sprites, so tagged nodes are replaced with null
//! instead of registering tag handlers.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{Result, TiledError};
use crate::types::Prototype;

use super::scanner::PrototypeKind;

/// Prototypes found in the resource tree, partitioned by kind.
///
/// Each list keeps discovery order.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub tiles: Vec<Prototype>,
    pub decals: Vec<Prototype>,
    pub palettes: Vec<Prototype>,
    pub entities: Vec<Prototype>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of prototypes.
    pub fn total(&self) -> usize {
        self.tiles.len() + self.decals.len() + self.palettes.len() + self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// File a prototype under its kind.
    pub fn push(&mut self, kind: PrototypeKind, prototype: Prototype) {
        match kind {
            PrototypeKind::Tile => self.tiles.push(prototype),
            PrototypeKind::Decal => self.decals.push(prototype),
            PrototypeKind::Palette => self.palettes.push(prototype),
            PrototypeKind::Entity => self.entities.push(prototype),
        }
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.tiles.extend(other.tiles);
        self.decals.extend(other.decals);
        self.palettes.extend(other.palettes);
        self.entities.extend(other.entities);
    }
}

/// Load every file and partition its prototypes.
pub fn load_prototypes(files: &[PathBuf]) -> Result<ScanResult> {
    let mut result = ScanResult::new();

    for path in files {
        let source = fs::read_to_string(path).map_err(|e| TiledError::Io {
            path: path.clone(),
            message: format!("Failed to read prototypes: {}", e),
        })?;
        let scan = parse_prototypes(&source, path)?;
        tracing::debug!(path = %path.display(), count = scan.total(), "loaded prototypes");
        result.merge(scan);
    }

    Ok(result)
}

/// Parse one prototype file. `origin` is only used for error messages.
pub fn parse_prototypes(source: &str, origin: &Path) -> Result<ScanResult> {
    let mut result = ScanResult::new();

    for entry in parse_entries(source, origin)? {
        let Some(kind) = entry
            .get("type")
            .and_then(Value::as_str)
            .and_then(PrototypeKind::from_tag)
        else {
            continue;
        };
        result.push(kind, Prototype::from_mapping(&entry, origin)?);
    }

    Ok(result)
}

/// Decode a prototype file into its list of entry mappings.
///
/// An empty document yields no entries. Every entry must be a mapping with a
/// string `type`.
pub fn parse_entries(source: &str, origin: &Path) -> Result<Vec<Mapping>> {
    if is_blank(source) {
        return Ok(Vec::new());
    }

    let value: Value = serde_yaml::from_str(source).map_err(|e| TiledError::Setup {
        message: format!("{}: invalid YAML: {}", origin.display(), e),
        help: Some("Prototype files must be valid YAML".to_string()),
    })?;

    let entries = match strip_tags(value) {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(seq) => seq,
        _ => {
            return Err(TiledError::Setup {
                message: format!("{}: top level is not a list", origin.display()),
                help: Some("Prototype files hold a list of `- type: ...` entries".to_string()),
            })
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Mapping(map) if map.get("type").and_then(Value::as_str).is_some() => Ok(map),
            _ => Err(TiledError::Setup {
                message: format!(
                    "{}: entry {} is not a mapping with a string `type`",
                    origin.display(),
                    index + 1
                ),
                help: None,
            }),
        })
        .collect()
}

/// Replace every custom-tagged node with null, recursively.
pub fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(_) => Value::Null,
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(strip_tags).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (strip_tags(k), strip_tags(v)))
                .collect(),
        ),
        other => other,
    }
}

fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn origin() -> &'static Path {
        Path::new("Prototypes/test.yml")
    }

    #[test]
    fn test_strip_tags() {
        let value: Value = serde_yaml::from_str(
            r#"
- type: entity
  id: Pill
  components:
  - type: Spawner
    effect: !type:SpawnEffect
      amount: 2
    list:
    - !type:Thing {}
    - plain
"#,
        )
        .unwrap();

        let stripped = strip_tags(value);
        let component = &stripped[0]["components"][0];

        assert_eq!(component["effect"], Value::Null);
        assert_eq!(component["list"][0], Value::Null);
        assert_eq!(component["list"][1], Value::from("plain"));
    }

    #[test]
    fn test_parse_partitions_by_kind() {
        let source = r##"
- type: tile
  id: FloorSteel
  sprite: /Textures/Tiles/steel.png
- type: reagent
  id: Water
- type: entity
  id: Wall
- type: decal
  id: Arrow
- type: palette
  id: Paint
  colors: {red: "#f00"}
- type: entity
  id: Window
"##;
        let scan = parse_prototypes(source, origin()).unwrap();

        assert_eq!(scan.tiles.len(), 1);
        assert_eq!(scan.decals.len(), 1);
        assert_eq!(scan.palettes.len(), 1);
        let ids: Vec<_> = scan.entities.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Wall", "Window"]);
        assert_eq!(scan.total(), 5);
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_prototypes("", origin()).unwrap().is_empty());
        assert!(parse_prototypes("# nothing here\n", origin()).unwrap().is_empty());
        assert!(parse_prototypes("~\n", origin()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_top_level_not_list() {
        let err = parse_entries("type: entity\nid: X\n", origin()).unwrap_err();
        assert!(err.to_string().contains("not a list"));
    }

    #[test]
    fn test_parse_entry_without_type() {
        assert!(parse_entries("- id: X\n", origin()).is_err());
        assert!(parse_entries("- just a string\n", origin()).is_err());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_entries("- type: entity\n  id: [unclosed\n", origin()).unwrap_err();
        assert!(err.to_string().contains("test.yml"));
    }

    #[test]
    fn test_load_prototypes_keeps_file_order() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.yml");
        let b = dir.path().join("b.yml");
        fs::write(&a, "- type: entity\n  id: First\n").unwrap();
        fs::write(&b, "- type: entity\n  id: Second\n").unwrap();

        let scan = load_prototypes(&[a, b]).unwrap();
        let ids: Vec<_> = scan.entities.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["First", "Second"]);
    }
}
