//! Palette colours used to generate recoloured decal tilesets.

use serde_yaml::Value;

use crate::error::{Result, TiledError};

use super::{Colour, Prototype};

/// One named colour of a palette prototype.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteColour {
    /// Variant name: `<palette name>_<colour key>`.
    pub name: String,
    /// The hex string as written in the prototype.
    pub value: String,
    /// Parsed colour.
    pub colour: Colour,
}

impl PaletteColour {
    /// Parse a named colour from its hex string.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let colour = Colour::from_hex(&value)?;
        Ok(Self {
            name: name.into(),
            value,
            colour,
        })
    }

    /// Extract every colour of a `palette` prototype, in declaration order.
    ///
    /// The palette's `name` field prefixes each colour; the id stands in
    /// when no name is set.
    pub fn from_prototype(palette: &Prototype) -> Result<Vec<Self>> {
        let prefix = palette
            .field("name")
            .and_then(Value::as_str)
            .unwrap_or(&palette.id);

        let Some(colours) = palette.field("colors").and_then(Value::as_mapping) else {
            return Ok(Vec::new());
        };

        colours
            .iter()
            .map(|(key, value)| {
                let key = scalar_string(key).ok_or_else(|| bad_entry(palette))?;
                let value = value.as_str().ok_or_else(|| bad_entry(palette))?;
                Self::new(format!("{}_{}", prefix, key), value)
            })
            .collect()
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn bad_entry(palette: &Prototype) -> TiledError {
    TiledError::Parse {
        message: format!("palette '{}' has a non-string colour entry", palette.id),
        help: Some("Palette colours must map a name to a hex string".to_string()),
    }
}
