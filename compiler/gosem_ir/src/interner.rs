//! String interner backing [`Name`] identifiers.
//!
//! Provides O(1) interning and lookup. The interner uses interior locking so
//! a single instance can be shared (via [`SharedInterner`]) between resolver
//! instances running over different source units.

// Arc is required so one interner can back several resolver instances; the
// resolver itself stays single-threaded per source unit.
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Interner storage: content map plus ordered string table.
struct Inner {
    /// Map from string content to index.
    map: FxHashMap<Box<str>, u32>,
    /// Interned contents, indexed by `Name::raw()`.
    strings: Vec<Box<str>>,
}

/// String interner for identifier names.
///
/// Pre-interns the empty string ([`Name::EMPTY`]) and `_` ([`Name::BLANK`])
/// so blank-name checks never touch the lock.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

/// A shareable handle to a [`StringInterner`].
pub type SharedInterner = Arc<StringInterner>;

impl StringInterner {
    /// Create a new interner with the pre-interned names in place.
    pub fn new() -> Self {
        let mut inner = Inner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        for pre in ["", "_"] {
            let idx = inner.strings.len() as u32;
            inner.strings.push(pre.into());
            inner.map.insert(pre.into(), idx);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Create a new shared interner handle.
    pub fn shared() -> SharedInterner {
        Arc::new(Self::new())
    }

    /// Intern a string, returning its name.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned.
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(s) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.inner.write();
        // Double-check after acquiring the write lock.
        if let Some(&idx) = guard.map.get(s) {
            return Name::from_raw(idx);
        }
        let idx = guard.strings.len() as u32;
        guard.strings.push(s.into());
        guard.map.insert(s.into(), idx);
        Name::from_raw(idx)
    }

    /// Resolve a name back to its string content.
    ///
    /// Returns an owned copy; names produced by a different interner yield
    /// `None`.
    pub fn resolve(&self, name: Name) -> Option<String> {
        let guard = self.inner.read();
        guard
            .strings
            .get(name.raw() as usize)
            .map(|s| s.as_ref().to_owned())
    }

    /// Number of interned strings (including the pre-interned pair).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Whether the interner holds only the pre-interned names.
    pub fn is_empty(&self) -> bool {
        self.len() <= 2
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
