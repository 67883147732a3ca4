use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::OrderedMap;

/// Wrapper for an OrderedMap which is shareable across thread boundaries.
///
/// The map itself does multi-step updates across its key and value Vecs, so
/// every mutation here happens under the write lock and every read under the
/// read lock. Cloning the handle shares the same map.
pub struct SharedOrderedMap<K, V>(Arc<RwLock<OrderedMap<K, V>>>)
where
    K: PartialEq,
    V: Clone;

impl<K, V> SharedOrderedMap<K, V>
where
    K: PartialEq,
    V: Clone,
{
    /// A handle to a new, empty map.
    pub fn new() -> Self {
        Self::from_map(OrderedMap::new())
    }

    /// Wraps a map into a shared accessor, making it safe to move across
    /// thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn from_map(map: OrderedMap<K, V>) -> Self {
        Self(Arc::from(RwLock::from(map)))
    }

    /// Sets a value, see [`OrderedMap::set`].
    pub fn set(&self, k: K, v: V) {
        self.0.write().set(k, v);
    }

    /// Get a value from the map. This clones it to minimize the lock time.
    pub fn get(&self, k: &K) -> Option<V> {
        self.0.read().get(k).cloned()
    }

    pub fn has(&self, k: &K) -> bool {
        self.0.read().has(k)
    }

    /// Remove an entry, returning whether there was one.
    pub fn delete(&self, k: &K) -> bool {
        self.0.write().delete(k)
    }

    /// Clears the map.
    pub fn clear(&self) {
        self.0.write().clear();
    }

    /// The number of entries in the map at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Runs [`OrderedMap::filter`] while holding the write lock, so no other
    /// handle sees the map half-filtered.
    pub fn filter<F>(&self, predicate: F)
    where
        F: FnMut(&V, &K, usize) -> bool,
    {
        self.0.write().filter(predicate);
    }

    /// Holds the read lock for as long as the guard lives.
    pub fn read(&self) -> RwLockReadGuard<'_, OrderedMap<K, V>> {
        self.0.read()
    }

    /// Holds the write lock for as long as the guard lives. Useful for
    /// several updates that need to land together.
    pub fn write(&self) -> RwLockWriteGuard<'_, OrderedMap<K, V>> {
        self.0.write()
    }
}

impl<K, V> SharedOrderedMap<K, V>
where
    K: PartialEq + Clone,
    V: Clone,
{
    /// An owned copy of the keys.
    pub fn keys(&self) -> Vec<K> {
        self.0.read().keys_vec()
    }

    /// A deep copy of the whole map as it stands right now.
    pub fn snapshot(&self) -> OrderedMap<K, V> {
        self.0.read().clone()
    }
}

impl<K, V> SharedOrderedMap<K, V>
where
    K: Ord,
    V: Clone,
{
    /// Sorted insert, see [`OrderedMap::sorted_set`].
    pub fn sorted_set(&self, k: K, v: V) {
        self.0.write().sorted_set(k, v);
    }
}

impl<K, V> Default for SharedOrderedMap<K, V>
where
    K: PartialEq,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for SharedOrderedMap<K, V>
where
    K: PartialEq,
    V: Clone,
{
    fn clone(&self) -> Self {
        SharedOrderedMap(self.0.clone())
    }
}
