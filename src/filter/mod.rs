//! Entity filtering and grouping.
//!
//! Decides which resolved entities end up in a tileset, and how they are
//! split across tilesets.

mod rules;

pub use rules::{Rule, EXCLUDED_SUFFIXES};

use crate::registry::EntityMap;

/// An ordered chain of exclusion rules.
#[derive(Debug, Clone)]
pub struct EntityFilter {
    rules: Vec<Rule>,
}

impl Default for EntityFilter {
    fn default() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }
}

impl EntityFilter {
    /// Create a filter with a custom rule chain.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// The first rule that excludes the entity, if any.
    pub fn exclusion(&self, entity: &crate::types::Entity) -> Option<Rule> {
        self.rules.iter().copied().find(|rule| rule.excludes(entity))
    }

    /// Keep only the mappable entities.
    pub fn apply(&self, entities: EntityMap) -> EntityMap {
        entities
            .into_iter()
            .filter(|(id, entity)| match self.exclusion(entity) {
                Some(rule) => {
                    tracing::debug!(entity = %id, %rule, "excluded");
                    false
                }
                None => true,
            })
            .collect()
    }
}

/// A named subset of entities that becomes one tileset.
#[derive(Debug, Clone)]
pub struct EntityGroup {
    pub name: String,
    pub entities: EntityMap,
}

/// Splits the mappable entities into tilesets.
pub trait Grouping {
    fn group(&self, entities: EntityMap) -> Vec<EntityGroup>;
}

/// The default grouping: everything in one group named `All`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleGroup;

impl Grouping for SingleGroup {
    fn group(&self, entities: EntityMap) -> Vec<EntityGroup> {
        vec![EntityGroup {
            name: "All".to_string(),
            entities,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Component, Entity, Prototype};

    fn map(prototypes: Vec<Prototype>) -> EntityMap {
        prototypes
            .into_iter()
            .map(|p| (p.id.clone(), Entity::new(p)))
            .collect()
    }

    fn mappable(id: &str) -> Prototype {
        Prototype::new("entity", id).with_component(Component::new("Sprite"))
    }

    #[test]
    fn test_keeps_plain_entities() {
        let entities = map(vec![mappable("Crate"), mappable("Locker")]);
        let kept = EntityFilter::default().apply(entities);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_debug_suffix_excluded() {
        let entities = map(vec![
            mappable("Spawner").with_field("suffix", "DEBUG spawner"),
            mappable("Normal").with_field("suffix", "normal"),
        ]);

        let kept = EntityFilter::default().apply(entities);

        assert!(!kept.contains_key("Spawner"));
        assert!(kept.contains_key("Normal"));
    }

    #[test]
    fn test_every_rule_applies() {
        let entities = map(vec![
            mappable("Abstract").abstract_(),
            Prototype::new("entity", "NoSprite"),
            mappable("Despawn").with_component(Component::new("TimedDespawn")),
            mappable("Admin").with_field("suffix", "Admeme"),
            mappable("Unmapped").with_field("suffix", "DO NOT MAP"),
            mappable("Hidden").with_field("categories", vec!["HideSpawnMenu"]),
            mappable("Player").with_component(Component::new("Input")),
            mappable("Humanoid").with_component(Component::new("RandomHumanoidSpawner")),
            mappable("Survivor"),
        ]);

        let kept = EntityFilter::default().apply(entities);

        assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["Survivor"]);
    }

    #[test]
    fn test_exclusion_reports_first_rule() {
        let entity = Entity::new(
            Prototype::new("entity", "X")
                .abstract_()
                .with_field("suffix", "DEBUG"),
        );
        assert_eq!(EntityFilter::default().exclusion(&entity), Some(Rule::Abstract));
    }

    #[test]
    fn test_custom_rule_chain() {
        let entities = map(vec![Prototype::new("entity", "Invisible")]);
        let kept = EntityFilter::new([Rule::Abstract]).apply(entities);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_single_group() {
        let entities = map(vec![mappable("A"), mappable("B")]);
        let groups = SingleGroup.group(entities);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "All");
        assert_eq!(groups[0].entities.len(), 2);
    }
}
