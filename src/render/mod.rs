//! Rendering module for ss14-tiled.
//!
//! Turns sprite references into flat RGBA images: loading and cropping tile
//! sheets, reading RSI state PNGs, compositing entity layers and tinting
//! decals.

mod blend;
mod compositor;
mod png;
mod rsi;

use std::path::PathBuf;

use image::RgbaImage;
use thiserror::Error;

pub use blend::{blend_over, recolor};
pub use compositor::{LayerSpec, SpriteCompositor, Textures};
pub use png::{crop_first_variant, load_rgba, write_png};
pub use rsi::{RsiMeta, RsiSize, RsiState, StateRef, META_FILENAME};

/// Why a single tile, decal or entity produced no image.
///
/// Skips are reported and the run moves on to the next item.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Skip {
    #[error("no sprite")]
    NoSprite,

    #[error("no RSI metadata at {}", .0.display())]
    MissingMetadata(PathBuf),

    #[error("state '{state}' not found in {rsi}")]
    MissingState { rsi: String, state: String },

    #[error("state '{state}' in {rsi} is animated or directional")]
    Unsupported { rsi: String, state: String },

    #[error("layer {index} is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    SizeMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("no drawable layers")]
    NoLayers,

    #[error("cannot read {}: {message}", .path.display())]
    Image { path: PathBuf, message: String },

    #[error("invalid variant count {0}")]
    Variants(i64),

    #[error("{variants} variants do not fit in a {width}px wide sprite")]
    TooManyVariants { variants: u32, width: u32 },
}

/// Result of rendering one item.
pub type Outcome = std::result::Result<RgbaImage, Skip>;
