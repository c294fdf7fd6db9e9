//! Prototype records as declared in the game's YAML files.
//!
//! A prototype keeps the handful of keys the pipeline interprets (`id`,
//! `type`, `parent`, `abstract`, `components`) as typed fields and carries
//! every other key through untouched in `fields`, so inheritance merging
//! can treat them opaquely.

use std::ops::Deref;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{Result, TiledError};

const KEY_ID: &str = "id";
const KEY_TYPE: &str = "type";
const KEY_PARENT: &str = "parent";
const KEY_ABSTRACT: &str = "abstract";
const KEY_COMPONENTS: &str = "components";

/// A typed payload attached to a prototype (e.g. `Sprite`, `Transform`).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// The component's `type` tag.
    pub kind: String,
    /// Every other key of the component, in declaration order.
    pub fields: Mapping,
}

impl Component {
    /// Create a component with no fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Mapping::new(),
        }
    }

    /// Add a field, builder style.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(Value::from(key), value.into());
        self
    }

    /// Get a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        let map = value
            .as_mapping()
            .ok_or_else(|| "component is not a mapping".to_string())?;

        let kind = map
            .get(KEY_TYPE)
            .and_then(Value::as_str)
            .ok_or_else(|| "component has no string `type`".to_string())?;

        let fields = map
            .iter()
            .filter(|(k, _)| k.as_str() != Some(KEY_TYPE))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            kind: kind.to_string(),
            fields,
        })
    }
}

/// A raw, possibly partial definition before inheritance is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub id: String,
    /// The declared `type` tag (`entity`, `tile`, `decal`, ...).
    pub kind: String,
    /// Parent ids in declaration order. Empty for roots.
    pub parents: Vec<String>,
    pub is_abstract: bool,
    pub components: Vec<Component>,
    /// All remaining keys (name, description, suffix, categories, ...).
    pub fields: Mapping,
}

impl Prototype {
    /// Create an empty prototype of the given kind.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            parents: Vec::new(),
            is_abstract: false,
            components: Vec::new(),
            fields: Mapping::new(),
        }
    }

    /// Build a prototype from one decoded YAML mapping.
    ///
    /// `origin` is only used for error messages.
    pub fn from_mapping(map: &Mapping, origin: &Path) -> Result<Self> {
        let kind = map
            .get(KEY_TYPE)
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(origin, "?", "entry has no string `type`"))?
            .to_string();

        let id = match map.get(KEY_ID) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(malformed(origin, "?", &format!("{} has no scalar `id`", kind))),
        };

        let parents = match map.get(KEY_PARENT) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Sequence(seq)) => seq
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| malformed(origin, &id, "`parent` list must only hold ids"))?,
            Some(_) => {
                return Err(malformed(origin, &id, "`parent` must be an id or a list of ids"))
            }
        };

        let is_abstract = match map.get(KEY_ABSTRACT) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => return Err(malformed(origin, &id, "`abstract` must be a boolean")),
        };

        let components = match map.get(KEY_COMPONENTS) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(seq)) => seq
                .iter()
                .map(Component::from_value)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| malformed(origin, &id, &e))?,
            Some(_) => return Err(malformed(origin, &id, "`components` must be a list")),
        };

        let fields = map
            .iter()
            .filter(|(k, _)| {
                !matches!(
                    k.as_str(),
                    Some(KEY_ID | KEY_TYPE | KEY_PARENT | KEY_ABSTRACT | KEY_COMPONENTS)
                )
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            id,
            kind,
            parents,
            is_abstract,
            components,
            fields,
        })
    }

    /// Get a non-component field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a non-component field, builder style.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(Value::from(key), value.into());
        self
    }

    /// Append a component, builder style.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Set the parent ids, builder style.
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as abstract, builder style.
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// First component with the given type.
    pub fn component(&self, kind: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.kind == kind)
    }

    /// Whether any component has the given type.
    pub fn has_component(&self, kind: &str) -> bool {
        self.component(kind).is_some()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

fn malformed(origin: &Path, id: &str, message: &str) -> TiledError {
    TiledError::Setup {
        message: format!("{}: prototype '{}': {}", origin.display(), id, message),
        help: Some("Check the prototype definition in the resource tree".to_string()),
    }
}

/// A fully resolved entity prototype.
///
/// Holds no parent references; its components are merged from the whole
/// ancestor chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity(Prototype);

impl Entity {
    /// Wrap an already merged (or parentless) prototype.
    pub fn new(mut prototype: Prototype) -> Self {
        prototype.parents.clear();
        Self(prototype)
    }
}

impl Deref for Entity {
    type Target = Prototype;

    fn deref(&self) -> &Prototype {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Prototype> {
        let map: Mapping = serde_yaml::from_str(yaml).unwrap();
        Prototype::from_mapping(&map, Path::new("test.yml"))
    }

    #[test]
    fn test_parse_full_entity() {
        let proto = parse(
            r#"
type: entity
id: BasaltTwo
parent: BasaltOne
name: basalt
placement:
  mode: SnapgridCenter
components:
- type: Sprite
  layers:
  - state: basalt2
"#,
        )
        .unwrap();

        assert_eq!(proto.kind, "entity");
        assert_eq!(proto.id, "BasaltTwo");
        assert_eq!(proto.parents, vec!["BasaltOne"]);
        assert!(!proto.is_abstract);
        assert_eq!(proto.components.len(), 1);
        assert_eq!(proto.components[0].kind, "Sprite");
        assert!(proto.components[0].get("type").is_none());
        assert!(proto.field("name").is_some());
        assert!(proto.field("placement").is_some());
        assert!(proto.field("id").is_none());
        assert!(proto.field("components").is_none());
    }

    #[test]
    fn test_parse_parent_list() {
        let proto = parse("type: entity\nid: C\nparent: [A, B]\n").unwrap();
        assert_eq!(proto.parents, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_abstract() {
        let proto = parse("type: entity\nid: Base\nabstract: true\n").unwrap();
        assert!(proto.is_abstract);
        assert!(proto.is_root());
    }

    #[test]
    fn test_parse_numeric_id() {
        let proto = parse("type: tile\nid: 42\n").unwrap();
        assert_eq!(proto.id, "42");
    }

    #[test]
    fn test_parse_missing_id() {
        assert!(parse("type: entity\nname: nobody\n").is_err());
    }

    #[test]
    fn test_parse_component_without_type() {
        let result = parse("type: entity\nid: X\ncomponents:\n- sprite: foo.rsi\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bad_parent() {
        assert!(parse("type: entity\nid: X\nparent: {a: b}\n").is_err());
        assert!(parse("type: entity\nid: X\nparent: [A, 3]\n").is_err());
    }

    #[test]
    fn test_entity_drops_parents() {
        let proto = Prototype::new("entity", "X").with_parents(["A"]);
        let entity = Entity::new(proto);
        assert!(entity.is_root());
        assert_eq!(entity.id, "X");
    }

    #[test]
    fn test_component_lookup() {
        let proto = Prototype::new("entity", "X")
            .with_component(Component::new("Sprite").with("sprite", "a.rsi"))
            .with_component(Component::new("Transform"));

        assert!(proto.has_component("Transform"));
        assert!(!proto.has_component("Input"));
        assert_eq!(
            proto.component("Sprite").and_then(|c| c.get("sprite")),
            Some(&Value::from("a.rsi"))
        );
    }
}
