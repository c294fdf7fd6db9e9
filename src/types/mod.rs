//! Core domain types for ss14-tiled.
//!
//! - `Prototype` / `Component` - raw YAML records
//! - `Entity` - an inheritance-resolved prototype
//! - `Colour` - RGBA colour values
//! - `PaletteColour` - named colours driving decal variants

mod colour;
mod palette;
mod prototype;

pub use colour::Colour;
pub use palette::PaletteColour;
pub use prototype::{Component, Entity, Prototype};
