//! ss14-tiled - Tiled tilesets from Space Station 14 resources
//!
//! A library for turning a game checkout's prototypes and sprites into
//! image-collection tilesets for the Tiled map editor, with ledgers that
//! keep tile ids stable between runs.

pub mod cache;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod tileset;
pub mod types;

pub use cache::{CacheRecord, CacheStore, Image};
pub use config::Config;
pub use discovery::{discover, DiscoveryResult, ResourceLayout, ScanResult};
pub use error::{Result, TiledError};
pub use filter::{EntityFilter, EntityGroup, Grouping, Rule, SingleGroup};
pub use pipeline::{generate, generate_with, Summary};
pub use registry::{merge, merge_chain, resolve_entities, EntityMap};
pub use render::{blend_over, recolor, Outcome, Skip, SpriteCompositor, Textures};
pub use tileset::{to_xml, write_tileset};
pub use types::{Colour, Component, Entity, PaletteColour, Prototype};
