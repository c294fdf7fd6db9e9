//! Sprite compositor - flattens sprite layers into one image.
//!
//! Tiles and decals are single images. Entities describe their look with a
//! `Sprite` component holding either a `sprite`/`state` pair or a list of
//! `layers`, each pointing at a state of some RSI.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde_yaml::Value;

use crate::error::Result;
use crate::types::{Component, Prototype};

use super::blend::blend_over;
use super::png::{crop_first_variant, load_rgba};
use super::rsi::{RsiMeta, StateRef};
use super::{Outcome, Skip};

/// Resolves sprite references against `Resources/Textures`.
#[derive(Debug, Clone)]
pub struct Textures {
    root: PathBuf,
}

impl Textures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map `/Textures/a/b.rsi`, `Textures/a/b.rsi` or `a/b.rsi` to a path
    /// under the textures directory.
    pub fn resolve(&self, reference: &str) -> PathBuf {
        let relative = reference.trim_start_matches('/');
        let relative = relative.strip_prefix("Textures/").unwrap_or(relative);
        self.root.join(relative)
    }
}

/// One layer of an entity sprite, as declared.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// RSI reference; falls back to the component's `sprite`.
    pub sprite: Option<String>,
    pub state: Option<StateRef>,
    pub visible: bool,
}

impl LayerSpec {
    /// Normalize a `Sprite` component into its list of layers.
    ///
    /// A `layers` list wins; otherwise the flat `sprite`/`state` pair becomes
    /// a single layer.
    pub fn from_component(sprite: &Component) -> Vec<LayerSpec> {
        let base = sprite.get("sprite").and_then(Value::as_str);

        match sprite.get("layers").and_then(Value::as_sequence) {
            Some(layers) => layers
                .iter()
                .filter_map(Value::as_mapping)
                .map(|layer| LayerSpec {
                    sprite: layer
                        .get("sprite")
                        .and_then(Value::as_str)
                        .or(base)
                        .map(str::to_string),
                    state: layer.get("state").and_then(StateRef::from_value),
                    visible: layer.get("visible").and_then(Value::as_bool) != Some(false),
                })
                .collect(),
            None => vec![LayerSpec {
                sprite: base.map(str::to_string),
                state: sprite.get("state").and_then(StateRef::from_value),
                visible: sprite.get("visible").and_then(Value::as_bool) != Some(false),
            }],
        }
    }
}

/// Produces flattened RGBA images for tiles, decals and entities.
///
/// Keeps parsed RSI metadata around; most RSIs are shared by many entities.
pub struct SpriteCompositor {
    textures: Textures,
    metadata: HashMap<PathBuf, Option<RsiMeta>>,
}

impl SpriteCompositor {
    pub fn new(textures: Textures) -> Self {
        Self {
            textures,
            metadata: HashMap::new(),
        }
    }

    /// Load a tile sprite and crop it to its first variant.
    pub fn tile(&self, sprite: &str, variants: i64) -> Outcome {
        let count = u32::try_from(variants)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(Skip::Variants(variants))?;
        let img = load_rgba(&self.textures.resolve(sprite))?;
        if img.width() / count == 0 {
            return Err(Skip::TooManyVariants {
                variants: count,
                width: img.width(),
            });
        }
        Ok(crop_first_variant(&img, count))
    }

    /// Load one decal state straight from its RSI directory.
    ///
    /// Named states map to `<state>.png` without consulting `meta.json`;
    /// boolean states need the metadata to find the actual name.
    pub fn decal(&mut self, rsi: &str, state: &StateRef) -> Result<Outcome> {
        let dir = self.textures.resolve(rsi);
        let name = match state {
            StateRef::Name(name) => name.clone(),
            StateRef::Flag(_) => match self.find_state(&dir, rsi, state)? {
                Ok(name) => name,
                Err(skip) => return Ok(Err(skip)),
            },
        };
        Ok(load_rgba(&dir.join(format!("{}.png", name))))
    }

    /// Composite an entity's first `Sprite` component.
    pub fn entity(&mut self, entity: &Prototype) -> Result<Outcome> {
        let Some(sprite) = entity.component("Sprite") else {
            return Ok(Err(Skip::NoSprite));
        };
        self.layers(&LayerSpec::from_component(sprite))
    }

    /// Composite layers bottom to top.
    pub fn layers(&mut self, layers: &[LayerSpec]) -> Result<Outcome> {
        let mut canvas: Option<RgbaImage> = None;

        for (index, layer) in layers.iter().enumerate() {
            if !layer.visible {
                continue;
            }
            let Some(state) = &layer.state else {
                tracing::debug!(index, "layer has no state, skipping layer");
                continue;
            };
            let Some(rsi) = &layer.sprite else {
                return Ok(Err(Skip::NoSprite));
            };

            let dir = self.textures.resolve(rsi);
            let name = match self.find_state(&dir, rsi, state)? {
                Ok(name) => name,
                Err(skip) => return Ok(Err(skip)),
            };

            let img = match load_rgba(&dir.join(format!("{}.png", name))) {
                Ok(img) => img,
                Err(skip) => return Ok(Err(skip)),
            };

            match canvas.as_mut() {
                None => canvas = Some(img),
                Some(base) => {
                    if base.dimensions() != img.dimensions() {
                        return Ok(Err(Skip::SizeMismatch {
                            index,
                            expected: base.dimensions(),
                            actual: img.dimensions(),
                        }));
                    }
                    blend_over(base, &img);
                }
            }
        }

        Ok(canvas.ok_or(Skip::NoLayers))
    }

    /// Look a state up in an RSI's metadata and check that it is drawable.
    ///
    /// The outer error is fatal (unreadable metadata); the inner one skips
    /// the current item.
    fn find_state(
        &mut self,
        dir: &Path,
        rsi: &str,
        state: &StateRef,
    ) -> Result<std::result::Result<String, Skip>> {
        if !self.metadata.contains_key(dir) {
            let meta = RsiMeta::load(dir)?;
            self.metadata.insert(dir.to_path_buf(), meta);
        }

        let Some(Some(meta)) = self.metadata.get(dir) else {
            return Ok(Err(Skip::MissingMetadata(dir.to_path_buf())));
        };

        let Some(found) = meta.find_state(state) else {
            return Ok(Err(Skip::MissingState {
                rsi: rsi.to_string(),
                state: state.to_string(),
            }));
        };

        if !found.is_static() {
            return Ok(Err(Skip::Unsupported {
                rsi: rsi.to_string(),
                state: found.name.clone(),
            }));
        }

        Ok(Ok(found.name.clone()))
    }
}
