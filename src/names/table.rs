// Tue Jan 13 2026 - Alex

use ahash::RandomState;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to an interned string. Stable for the lifetime of its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameId(u32);

impl NameId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only string interner. Every discovered name is stored once;
/// the rest of the pipeline compares handles.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: IndexSet<Box<str>, RandomState>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(index) = self.names.get_index_of(name) {
            return NameId(index as u32);
        }
        let (index, _) = self.names.insert_full(name.into());
        NameId(index as u32)
    }

    pub fn lookup(&self, name: &str) -> Option<NameId> {
        self.names.get_index_of(name).map(|index| NameId(index as u32))
    }

    /// Unknown handles resolve to an empty string.
    pub fn resolve(&self, id: NameId) -> &str {
        self.names.get_index(id.as_usize()).map(|s| &**s).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_returns_same_handle() {
        let mut table = NameTable::new();
        let a = table.intern("Actor");
        let b = table.intern("Pawn");
        let c = table.intern("Actor");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(b), "Pawn");
    }

    #[test]
    fn test_handles_follow_insertion_order() {
        let mut table = NameTable::new();
        let first = table.intern("Zeta");
        let second = table.intern("Alpha");

        assert!(first < second);
        assert_eq!(table.lookup("Alpha"), Some(second));
        assert_eq!(table.lookup("Missing"), None);
    }
}
