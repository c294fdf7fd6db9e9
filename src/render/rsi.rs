//! RSI (Robust Station Image) metadata.
//!
//! An `.rsi` directory holds a `meta.json` listing its states plus one PNG
//! per state. Only single-direction, single-frame states are drawable here.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Result, TiledError};

/// File name of the metadata sidecar inside an `.rsi` directory.
pub const META_FILENAME: &str = "meta.json";

const TRUE_SYNONYMS: [&str; 4] = ["y", "yes", "true", "on"];
const FALSE_SYNONYMS: [&str; 4] = ["n", "no", "false", "off"];

/// Parsed `meta.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RsiMeta {
    #[serde(default)]
    pub size: Option<RsiSize>,
    pub states: Vec<RsiState>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RsiSize {
    pub x: u32,
    pub y: u32,
}

/// One named state of an RSI.
#[derive(Debug, Clone, Deserialize)]
pub struct RsiState {
    pub name: String,
    #[serde(default = "default_directions")]
    pub directions: u32,
    /// Frame delays, one list per direction.
    #[serde(default)]
    pub delays: Option<Vec<Vec<f32>>>,
}

fn default_directions() -> u32 {
    1
}

impl RsiState {
    /// True for one direction with at most one frame.
    pub fn is_static(&self) -> bool {
        self.directions == 1
            && self
                .delays
                .as_ref()
                .map_or(true, |dirs| dirs.iter().all(|frames| frames.len() <= 1))
    }
}

impl RsiMeta {
    /// Parse metadata from JSON text. A leading byte-order mark is ignored.
    pub fn parse(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source.trim_start_matches('\u{feff}'))
    }

    /// Load `<rsi>/meta.json`.
    ///
    /// Returns `Ok(None)` when the file does not exist; a file that exists
    /// but does not parse is an error.
    pub fn load(rsi_dir: &Path) -> Result<Option<Self>> {
        let path = rsi_dir.join(META_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }

        let source = std::fs::read_to_string(&path).map_err(|e| TiledError::Io {
            path: path.clone(),
            message: format!("Failed to read RSI metadata: {}", e),
        })?;

        Self::parse(&source).map(Some).map_err(|e| TiledError::Parse {
            message: format!("Invalid RSI metadata {}: {}", path.display(), e),
            help: Some("meta.json must list its states as {\"name\": ...} objects".to_string()),
        })
    }

    /// The first state matching `state`.
    pub fn find_state(&self, state: &StateRef) -> Option<&RsiState> {
        self.states.iter().find(|s| state.matches(&s.name))
    }
}

/// A layer's `state` value.
///
/// Unquoted `true`/`false` decode as booleans (and YAML 1.1 writers also
/// treat `yes`/`no`/`on`/`off` that way), so a state named `on` can arrive
/// as a boolean and has to be matched through its synonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateRef {
    Name(String),
    Flag(bool),
}

impl StateRef {
    /// Read a state from a YAML value. Null and collections give `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(StateRef::Name(s.clone())),
            Value::Bool(b) => Some(StateRef::Flag(*b)),
            Value::Number(n) => Some(StateRef::Name(n.to_string())),
            _ => None,
        }
    }

    /// Whether a state named `name` is the one referred to.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            StateRef::Name(expected) => expected == name,
            StateRef::Flag(flag) => {
                let synonyms = if *flag { &TRUE_SYNONYMS } else { &FALSE_SYNONYMS };
                synonyms.iter().any(|s| s.eq_ignore_ascii_case(name))
            }
        }
    }
}

impl std::fmt::Display for StateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateRef::Name(name) => write!(f, "{}", name),
            StateRef::Flag(flag) => write!(f, "{}", flag),
        }
    }
}
