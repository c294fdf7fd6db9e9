//! Entity registry: inheritance resolution for entity prototypes.
//!
//! Roots (prototypes without a `parent`) are taken as-is. Children are
//! resolved in passes: every child whose parents are all resolved gets
//! merged against them, and the pass repeats until nothing is left. A pass
//! that resolves nothing means a cycle or a dangling parent id, which is
//! reported with the stuck ids instead of looping.
//!
//! # Example
//!
//! ```ignore
//! use ss14_tiled::registry::resolve_entities;
//!
//! let entities = resolve_entities(scan.entities)?;
//! let crate_entity = &entities["CrateGeneric"];
//! ```

mod graph;
mod merge;

use std::collections::BTreeMap;

use crate::error::{Result, TiledError};
use crate::types::{Entity, Prototype};

pub use graph::ParentGraph;
pub use merge::{merge, merge_chain};

/// Resolved entities keyed by id, iterated in id order.
pub type EntityMap = BTreeMap<String, Entity>;

/// Resolve every entity prototype against its ancestor chain.
///
/// Prototypes are processed in the given order; when an id is declared twice
/// the later declaration wins.
pub fn resolve_entities(prototypes: Vec<Prototype>) -> Result<EntityMap> {
    let mut resolved = EntityMap::new();
    let mut pending: Vec<Prototype> = Vec::new();

    for prototype in dedup_by_id(prototypes) {
        if prototype.is_root() {
            resolved.insert(prototype.id.clone(), Entity::new(prototype));
        } else {
            pending.push(prototype);
        }
    }

    let mut pass = 0;
    while !pending.is_empty() {
        pass += 1;
        let before = pending.len();
        let mut still_pending = Vec::new();

        for child in pending {
            let parents: Option<Vec<&Prototype>> = child
                .parents
                .iter()
                .map(|id| resolved.get(id).map(|entity| &**entity))
                .collect();

            let merged = parents.and_then(|parents| merge_chain(&child, parents));
            match merged {
                Some(merged) => {
                    resolved.insert(child.id.clone(), Entity::new(merged));
                }
                None => still_pending.push(child),
            }
        }

        tracing::debug!(
            pass,
            resolved = before - still_pending.len(),
            remaining = still_pending.len(),
            "inheritance pass"
        );

        if still_pending.len() == before {
            return Err(stuck_error(&still_pending, &resolved));
        }
        pending = still_pending;
    }

    Ok(resolved)
}

/// Keep the last declaration of every id, in first-seen position.
fn dedup_by_id(prototypes: Vec<Prototype>) -> Vec<Prototype> {
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut out: Vec<Prototype> = Vec::with_capacity(prototypes.len());

    for prototype in prototypes {
        match index.get(&prototype.id) {
            Some(&slot) => {
                tracing::warn!(
                    id = %prototype.id,
                    "duplicate entity prototype, later declaration wins"
                );
                out[slot] = prototype;
            }
            None => {
                index.insert(prototype.id.clone(), out.len());
                out.push(prototype);
            }
        }
    }

    out
}

fn stuck_error(stuck: &[Prototype], resolved: &EntityMap) -> TiledError {
    let mut graph = ParentGraph::new();
    for child in stuck {
        graph.add(child.id.clone(), &child.parents);
    }

    let mut lines = Vec::new();
    for child in stuck {
        let waiting: Vec<&str> = child
            .parents
            .iter()
            .map(String::as_str)
            .filter(|p| !resolved.contains_key(*p))
            .collect();
        let dangling: Vec<&str> = graph
            .dangling_parents(&child.id, |id| resolved.contains_key(id))
            .collect();

        if dangling.is_empty() {
            lines.push(format!("{} (waiting on {})", child.id, waiting.join(", ")));
        } else {
            lines.push(format!(
                "{} (unknown parent {})",
                child.id,
                dangling.join(", ")
            ));
        }
    }

    let help = match graph.find_cycle() {
        Some(cycle) => format!("Inheritance cycle: {}", cycle.join(" -> ")),
        None => "Every parent id must name an entity prototype".to_string(),
    };

    TiledError::Resolution {
        message: format!(
            "could not resolve {} entit{}: {}",
            stuck.len(),
            if stuck.len() == 1 { "y" } else { "ies" },
            lines.join("; ")
        ),
        help: Some(help),
    }
}
