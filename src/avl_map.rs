use std::{cmp::Ordering, marker::PhantomData};

use crate::tree_base::{AvlTree, KeyComparator, Outcome, TreeStats};

/// Orders `(key, value)` entries by key alone.
#[derive(Clone, Debug)]
pub struct EntryComparator<K, V> {
    _kv: PhantomData<fn(&K, &V)>,
}

impl<K: Ord, V> KeyComparator<(K, V)> for EntryComparator<K, V> {
    #[inline]
    fn compare(&self, lhs: &(K, V), rhs: &(K, V)) -> Ordering {
        lhs.0.cmp(&rhs.0)
    }
}

/// Key/value index over an AVL tree. Lookups go by key only, so callers never
/// have to build a whole entry to find one.
pub struct AvlMap<K: Ord, V> {
    _tree: AvlTree<(K, V), EntryComparator<K, V>>,
}

impl<K: Ord, V> AvlMap<K, V> {
    pub fn new() -> Self {
        Self {
            _tree: AvlTree::with_comparator(EntryComparator { _kv: PhantomData }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self._tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self._tree.len()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self._tree.search_with(|e| key.cmp(&e.0)).into_inner()
    }

    /// Insert unless the key is present; an existing entry is kept as is.
    pub fn insert(&mut self, key: K, value: V) -> Outcome<bool> {
        self._tree.insert((key, value))
    }

    /// Insert, replacing the value of an existing entry. Returns the old value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let old = self._tree.remove_with(|e| key.cmp(&e.0)).value;
        self._tree.insert((key, value));
        old.map(|(_, v)| v)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_counted(key).into_inner()
    }

    pub fn get_counted(&self, key: &K) -> Outcome<Option<&V>> {
        self._tree
            .get_with(|e| key.cmp(&e.0))
            .map(|e| e.map(|(_, v)| v))
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self._tree
            .remove_with(|e| key.cmp(&e.0))
            .into_inner()
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self._tree.iter().map(|(k, v)| (k, v))
    }

    pub fn height(&self) -> usize {
        self._tree.height()
    }

    pub fn stats(&self) -> &TreeStats {
        self._tree.stats()
    }
}

impl<K: Ord, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
