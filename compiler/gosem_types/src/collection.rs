//! Ordered, name-indexed entity collection.
//!
//! `Types` is the symbol-table container: insertion order is preserved for
//! iteration, while lookups go through a name index where later entries
//! shadow earlier same-named ones. `add_no_repeat` is the import-flattening
//! insertion mode: a name already present keeps its first entity.

use gosem_ir::Name;
use rustc_hash::FxHashMap;

use crate::{Idx, Pool};

/// Ordered collection of entities keyed by declared name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Types {
    /// Entities in insertion order.
    entries: Vec<Idx>,
    /// Name to latest position. Anonymous entities are not indexed.
    by_name: FxHashMap<Name, usize>,
}

impl Types {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity. A later entry with the same name shadows earlier
    /// ones on lookup; iteration keeps both.
    pub fn add(&mut self, pool: &Pool, idx: Idx) {
        let pos = self.entries.len();
        self.entries.push(idx);
        if let Some(name) = pool.name(idx) {
            self.by_name.insert(name, pos);
        }
    }

    /// Append an entity only if its name is not already present.
    ///
    /// Returns whether the entity was inserted. Anonymous entities are
    /// always appended.
    pub fn add_no_repeat(&mut self, pool: &Pool, idx: Idx) -> bool {
        match pool.name(idx) {
            Some(name) => {
                if self.by_name.contains_key(&name) {
                    return false;
                }
                let pos = self.entries.len();
                self.entries.push(idx);
                self.by_name.insert(name, pos);
                true
            }
            None => {
                self.entries.push(idx);
                true
            }
        }
    }

    /// Look up by name; the latest same-named entry wins.
    pub fn get(&self, name: Name) -> Option<Idx> {
        self.by_name.get(&name).map(|&pos| self.entries[pos])
    }

    /// Whether a name is present.
    pub fn contains(&self, name: Name) -> bool {
        self.by_name.contains_key(&name)
    }

    /// Entity at an insertion position.
    pub fn index(&self, i: usize) -> Idx {
        self.entries.get(i).copied().unwrap_or(Idx::NONE)
    }

    /// Iterate entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Idx> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Types {
    type Item = Idx;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Idx>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}
