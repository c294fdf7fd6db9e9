//! Individual exclusion rules for resolved entities.

use std::fmt;

use serde_yaml::Value;

use crate::types::Entity;

/// Suffix fragments marking entities that should never be mapped.
pub const EXCLUDED_SUFFIXES: [&str; 3] = ["DEBUG", "Admeme", "DO NOT MAP"];

/// One reason to keep an entity off the tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Abstract prototypes only exist to be inherited from.
    Abstract,
    /// Nothing to draw.
    NoSprite,
    /// Effects that delete themselves.
    TimedDespawn,
    /// Debug/admin variants, by `suffix`.
    UnmappableSuffix,
    /// Hidden from the spawn menu, by `categories`.
    HiddenCategory,
    /// Controllable entities (player input).
    Input,
    /// Spawners that roll a random humanoid.
    RandomHumanoidSpawner,
}

impl Rule {
    /// All rules, in the order they are applied.
    pub const ALL: [Rule; 7] = [
        Rule::Abstract,
        Rule::NoSprite,
        Rule::TimedDespawn,
        Rule::UnmappableSuffix,
        Rule::HiddenCategory,
        Rule::Input,
        Rule::RandomHumanoidSpawner,
    ];

    /// Whether this rule removes the entity.
    pub fn excludes(self, entity: &Entity) -> bool {
        match self {
            Rule::Abstract => entity.is_abstract,
            Rule::NoSprite => !entity.has_component("Sprite"),
            Rule::TimedDespawn => entity.has_component("TimedDespawn"),
            Rule::UnmappableSuffix => entity
                .field("suffix")
                .and_then(scalar_text)
                .is_some_and(|suffix| EXCLUDED_SUFFIXES.iter().any(|s| suffix.contains(s))),
            Rule::HiddenCategory => entity
                .field("categories")
                .is_some_and(|c| contains_entry(c, "HideSpawnMenu")),
            Rule::Input => entity.has_component("Input"),
            Rule::RandomHumanoidSpawner => entity.has_component("RandomHumanoidSpawner"),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Abstract => "abstract",
            Rule::NoSprite => "no-sprite",
            Rule::TimedDespawn => "timed-despawn",
            Rule::UnmappableSuffix => "unmappable-suffix",
            Rule::HiddenCategory => "hidden-category",
            Rule::Input => "input",
            Rule::RandomHumanoidSpawner => "random-humanoid-spawner",
        };
        write!(f, "{}", name)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn contains_entry(value: &Value, needle: &str) -> bool {
    match value {
        Value::Sequence(items) => items.iter().any(|item| item.as_str() == Some(needle)),
        Value::String(s) => s.contains(needle),
        _ => false,
    }
}
