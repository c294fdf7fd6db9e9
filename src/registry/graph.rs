//! Parent graph for prototypes that failed to resolve.
//!
//! Only built when resolution gets stuck, to explain why: which parent ids
//! do not exist at all, and which ids wait on each other in a cycle.

use std::collections::{BTreeMap, BTreeSet};

/// Child → parent edges between prototype ids.
#[derive(Debug, Default)]
pub struct ParentGraph {
    /// Adjacency list: id -> ids it inherits from.
    parents: BTreeMap<String, Vec<String>>,
}

impl ParentGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` with its declared parents.
    pub fn add(&mut self, id: impl Into<String>, parents: &[String]) {
        self.parents.insert(id.into(), parents.to_vec());
    }

    /// Whether `id` was registered.
    pub fn contains(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    /// Parent ids of `id` that are neither registered here nor accepted by
    /// `known`.
    pub fn dangling_parents<'a>(
        &'a self,
        id: &str,
        known: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.parents
            .get(id)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(move |&p| !self.contains(p) && !known(p))
    }

    /// Find one cycle, returned as a path that starts and ends on the same id.
    ///
    /// Searches in id order, so the result is stable between runs.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited = BTreeSet::new();
        let mut on_stack = BTreeSet::new();
        let mut path = Vec::new();

        for start in self.parents.keys() {
            if visited.contains(start.as_str()) {
                continue;
            }
            if let Some(cycle) = self.dfs(start, &mut visited, &mut on_stack, &mut path) {
                return Some(cycle);
            }
        }

        None
    }

    fn dfs<'a>(
        &'a self,
        node: &'a str,
        visited: &mut BTreeSet<&'a str>,
        on_stack: &mut BTreeSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(node);

        for parent in self.parents.get(node).into_iter().flatten() {
            let parent = parent.as_str();
            if !self.contains(parent) {
                continue;
            }

            if on_stack.contains(parent) {
                let start = path.iter().position(|id| *id == parent).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
                cycle.push(parent.to_string());
                return Some(cycle);
            }

            if !visited.contains(parent) {
                if let Some(cycle) = self.dfs(parent, visited, on_stack, path) {
                    return Some(cycle);
                }
            }
        }

        on_stack.remove(node);
        path.pop();
        None
    }
}
