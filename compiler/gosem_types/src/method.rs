//! Receiver-keyed method table.
//!
//! Maps a receiver type's bare name to the collection of method entities
//! declared with that receiver. Populated incrementally, one function
//! declaration at a time; methods whose receiver type is not owned by the
//! current source unit never enter the table.

use gosem_ir::Name;
use rustc_hash::FxHashMap;

use crate::{Idx, Pool, Types};

/// Mapping from receiver bare name to its methods.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodTable {
    methods: FxHashMap<Name, Types>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a method entity under a receiver name.
    pub fn add(&mut self, pool: &Pool, receiver: Name, method: Idx) {
        self.methods.entry(receiver).or_default().add(pool, method);
    }

    /// Methods of a receiver, if any were declared.
    pub fn get(&self, receiver: Name) -> Option<&Types> {
        self.methods.get(&receiver)
    }

    /// Receiver names in sorted order, for deterministic reporting.
    pub fn receiver_names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Iterate receiver/method-set pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Types)> + '_ {
        self.methods.iter().map(|(&name, types)| (name, types))
    }

    /// Number of receivers with at least one method.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
