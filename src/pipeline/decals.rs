//! Decal tilesets: the plain set plus one recoloured set per palette colour.

use serde_yaml::Value;

use crate::error::Result;
use crate::output::Printer;
use crate::render::{recolor, Outcome, Skip, SpriteCompositor, StateRef};
use crate::types::{Colour, PaletteColour, Prototype};

use super::builder::{OutputLayout, TilesetBuilder, TilesetJob, TilesetReport};

/// Colour of the untinted decal set.
const BASE_COLOUR: &str = "#FFF";

pub fn generate_decals(
    decals: &[Prototype],
    palettes: &[Prototype],
    compositor: &mut SpriteCompositor,
    layout: &OutputLayout,
    printer: &Printer,
) -> Result<Vec<TilesetReport>> {
    let colours = palettes
        .iter()
        .map(PaletteColour::from_prototype)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    let mut rendered: Vec<(&str, Outcome)> = Vec::with_capacity(decals.len());
    for decal in decals {
        rendered.push((decal.id.as_str(), render_decal(decal, compositor)?));
    }

    let base = Colour::from_hex(BASE_COLOUR)?;
    let mut reports = Vec::with_capacity(colours.len() + 1);

    let job = TilesetJob::new("decals", "Decals")
        .with_property("color_name", "")
        .with_property("color_value", BASE_COLOUR);
    let mut builder = TilesetBuilder::open(layout, printer, job)?;
    for (id, outcome) in &rendered {
        builder.add(id, tint(outcome, base))?;
    }
    reports.push(builder.finish()?);

    // Skips were already reported with the plain set.
    for colour in &colours {
        let job = TilesetJob::new(
            format!("decals_{}", colour.name),
            format!("Decals - {}", colour.name),
        )
        .with_property("color_name", colour.name.as_str())
        .with_property("color_value", colour.value.as_str());

        let mut builder = TilesetBuilder::open(layout, printer, job)?;
        for (id, outcome) in &rendered {
            if outcome.is_ok() {
                builder.add(id, tint(outcome, colour.colour))?;
            }
        }
        reports.push(builder.finish()?);
    }

    Ok(reports)
}

fn tint(outcome: &Outcome, colour: Colour) -> Outcome {
    match outcome {
        Ok(img) if colour == Colour::WHITE => Ok(img.clone()),
        Ok(img) => Ok(recolor(img, colour)),
        Err(skip) => Err(skip.clone()),
    }
}

/// Decals name their art as `sprite: {sprite: <rsi>, state: <state>}`.
fn render_decal(decal: &Prototype, compositor: &mut SpriteCompositor) -> Result<Outcome> {
    let sprite = decal.field("sprite").and_then(Value::as_mapping);
    let rsi = sprite.and_then(|s| s.get("sprite")).and_then(Value::as_str);
    let state = sprite
        .and_then(|s| s.get("state"))
        .and_then(StateRef::from_value);

    match (rsi, state) {
        (Some(rsi), Some(state)) => compositor.decal(rsi, &state),
        _ => Ok(Err(Skip::NoSprite)),
    }
}
