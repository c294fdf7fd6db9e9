//! Prototype inheritance merging.

use crate::types::Prototype;

/// Merge `child` on top of `parent`, returning a new prototype.
///
/// - every non-component field of the child replaces the parent's;
/// - `abstract` comes from the child only;
/// - a child component whose type already exists overwrites just the keys
///   it sets, otherwise it is appended after the inherited components.
///
/// Neither input is modified and the result shares no data with them.
pub fn merge(child: &Prototype, parent: &Prototype) -> Prototype {
    let mut out = parent.clone();

    out.id = child.id.clone();
    out.kind = child.kind.clone();
    out.parents = Vec::new();
    out.is_abstract = child.is_abstract;

    for (key, value) in &child.fields {
        out.fields.insert(key.clone(), value.clone());
    }

    for component in &child.components {
        match out.components.iter_mut().find(|c| c.kind == component.kind) {
            Some(existing) => {
                for (key, value) in &component.fields {
                    existing.fields.insert(key.clone(), value.clone());
                }
            }
            None => out.components.push(component.clone()),
        }
    }

    out
}

/// Merge a child against an ordered list of resolved parents.
///
/// The first parent is the base; each following parent is merged on top of
/// the accumulation, then the child on top of that. Returns `None` for an
/// empty parent list.
pub fn merge_chain<'a, I>(child: &Prototype, parents: I) -> Option<Prototype>
where
    I: IntoIterator<Item = &'a Prototype>,
{
    let mut parents = parents.into_iter();
    let base = parents.next()?.clone();
    let accumulated = parents.fold(base, |acc, parent| merge(parent, &acc));
    Some(merge(child, &accumulated))
}
