//! Worker identifier interning.
//!
//! Maps worker identifier strings to dense integer indices. Indices are
//! assigned in lexicographic identifier order, so iterating workers by index
//! is the pinned tie-break order of the search.

use rustc_hash::FxHashMap;

/// Interned worker index (u32 for compact storage and fast hashing).
pub type WorkerIdx = u32;

/// Map from worker identifiers to indices.
#[derive(Debug, Clone, Default)]
pub struct WorkerIdInterner {
    to_int: FxHashMap<String, WorkerIdx>,
}

impl WorkerIdInterner {
    /// Build an interner over `ids`, sorted and deduplicated.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sorted: Vec<String> = ids.into_iter().map(Into::into).collect();
        sorted.sort();
        sorted.dedup();

        let mut to_int = FxHashMap::with_capacity_and_hasher(sorted.len(), Default::default());
        for (idx, id) in sorted.iter().enumerate() {
            to_int.insert(id.clone(), idx as WorkerIdx);
        }
        Self { to_int }
    }

    /// Get the index for an identifier, if it exists.
    #[inline]
    pub fn get(&self, id: &str) -> Option<WorkerIdx> {
        self.to_int.get(id).copied()
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.to_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_int.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_lexicographic_order() {
        let interner = WorkerIdInterner::from_ids(["carol", "alice", "bob", "alice"]);

        assert_eq!(interner.len(), 3);
        assert_eq!(interner.get("alice"), Some(0));
        assert_eq!(interner.get("bob"), Some(1));
        assert_eq!(interner.get("carol"), Some(2));
        assert_eq!(interner.get("dave"), None);
    }

    #[test]
    fn test_owned_identifiers_and_empty_input() {
        let interner = WorkerIdInterner::from_ids(vec!["z".to_string(), "m".to_string()]);
        assert_eq!(interner.get("m"), Some(0));
        assert_eq!(interner.get("z"), Some(1));

        let empty = WorkerIdInterner::from_ids(Vec::<String>::new());
        assert!(empty.is_empty());
    }
}
