//! Thread-safe string interning.
//!
//! Identifiers are interned once and referred to by copyable [`StringId`]s
//! everywhere else, so name comparisons are integer comparisons. The interner
//! is shared through `Arc` across the pipeline; interior mutability keeps
//! `get_or_intern` usable behind a shared reference.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Handle to an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u32);

#[derive(Default)]
struct Inner {
    ids: FxHashMap<String, StringId>,
    strings: Vec<String>,
}

#[derive(Default)]
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `value`, returning the existing id if it is already known.
    pub fn get_or_intern(&self, value: &str) -> StringId {
        if let Some(id) = self.inner.read().ids.get(value) {
            return *id;
        }
        let mut inner = self.inner.write();
        if let Some(id) = inner.ids.get(value) {
            return *id;
        }
        let id = StringId(inner.strings.len() as u32);
        inner.strings.push(value.to_string());
        inner.ids.insert(value.to_string(), id);
        id
    }

    /// Look up an id without interning.
    pub fn get(&self, value: &str) -> Option<StringId> {
        self.inner.read().ids.get(value).copied()
    }

    pub fn resolve(&self, id: StringId) -> Option<String> {
        self.inner.read().strings.get(id.0 as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
