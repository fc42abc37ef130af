//! Generic named piece storage shared by the typed stores.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::traits::{Piece, PieceKey};

/// A named collection of pieces keyed by piece name.
///
/// Typed stores wrap this and add the side effects their piece type needs
/// (listener wiring, fallback resolution).
pub struct PieceStore<T: Piece + ?Sized> {
    name: &'static str,
    pieces: BTreeMap<String, Arc<T>>,
}

impl<T: Piece + ?Sized> PieceStore<T> {
    /// Create an empty store called `name` (e.g. `"events"`).
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pieces: BTreeMap::new(),
        }
    }

    /// The store's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store `piece` under its own name, returning the piece it replaced.
    pub fn insert(&mut self, piece: Arc<T>) -> Option<Arc<T>> {
        self.pieces.insert(piece.name().to_string(), piece)
    }

    /// Remove the piece named `name`.
    pub fn remove(&mut self, name: &str) -> Option<Arc<T>> {
        self.pieces.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.pieces.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.pieces.contains_key(name)
    }

    /// Resolve a name or a piece to the stored piece of that name.
    pub fn resolve<K: PieceKey + ?Sized>(&self, key: &K) -> Option<&Arc<T>> {
        self.pieces.get(key.piece_name())
    }

    /// Snapshot of the stored names, safe to iterate while mutating the store.
    pub fn keys(&self) -> Vec<String> {
        self.pieces.keys().cloned().collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<T>> {
        self.pieces.values()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Piece for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn kind(&self) -> &'static str {
            "test"
        }
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut store: PieceStore<Named> = PieceStore::new("tests");
        assert!(store.insert(Arc::new(Named("a"))).is_none());
        assert!(store.insert(Arc::new(Named("a"))).is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.name(), "tests");
    }

    #[test]
    fn test_resolve_by_name_or_piece() {
        let mut store: PieceStore<Named> = PieceStore::new("tests");
        let piece = Arc::new(Named("ready"));
        store.insert(Arc::clone(&piece));
        assert!(store.resolve("ready").is_some());
        assert!(store.resolve(&piece).is_some());
        assert!(store.resolve(&Arc::new(Named("other"))).is_none());
    }

    #[test]
    fn test_keys_are_sorted_snapshot() {
        let mut store: PieceStore<Named> = PieceStore::new("tests");
        store.insert(Arc::new(Named("b")));
        store.insert(Arc::new(Named("a")));
        let keys = store.keys();
        for key in &keys {
            store.remove(key);
        }
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert!(store.is_empty());
    }
}
