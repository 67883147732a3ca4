//! An insertion-ordered map built from two index-aligned Vecs. No hashing,
//! lookups are a linear scan over the keys.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A map which remembers the order its keys were first inserted in.
///
/// Keys live in one Vec and values in another; the entry at position `i` is
/// `(keys[i], values[i])`. Both Vecs always have the same length, and no two
/// keys compare equal.
///
/// Why two Vecs instead of a `Vec<(K, V)>`? The key Vec doubles as the order
/// of record, so `keys()` is a plain slice and the scan in `index_of` touches
/// only keys, never values.
#[derive(Clone, PartialEq, Eq)]
pub struct OrderedMap<K, V> {
    /// Keys in insertion order.
    pub(crate) keys: Vec<K>,

    /// Values, parallel to `keys`.
    pub(crate) values: Vec<V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty map.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Makes a new, empty map with room for `capacity` entries before
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// The number of entries in the map.
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    /// Alias for [`OrderedMap::size`].
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in order. The slice is read-only, so nothing done with it can
    /// reach back into the map.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Values in key order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Mutable access to the values in key order. The keys can't be touched
    /// this way, so the map stays consistent.
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    /// The entry at a position, if there is one.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(index)?, self.values.get(index)?))
    }

    /// Iterates over `(key, value)` pairs in order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.keys.iter().zip(self.values.iter()),
        }
    }

    /// Empties the map. Does not free the underlying buffers.
    pub fn clear(&mut self) -> &mut Self {
        self.keys.clear();
        self.values.clear();

        self
    }

    /// Calls `f(value, key, index)` for every entry, in order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K, usize),
    {
        for (i, (k, v)) in self.iter().enumerate() {
            f(v, k, i);
        }
    }

    /// Collects `f(value, key, index)` for every entry, in order.
    pub fn map<R, F>(&self, mut f: F) -> Vec<R>
    where
        F: FnMut(&V, &K, usize) -> R,
    {
        self.iter()
            .enumerate()
            .map(|(i, (k, v))| f(v, k, i))
            .collect()
    }

    /// Removes every entry for which `predicate(value, key, index)` returns
    /// false. The predicate sees each entry exactly once, with the index it
    /// had before anything was removed; survivors keep their relative order.
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&V, &K, usize) -> bool,
    {
        // decide on the snapshot first, then drop, so removals can't shift
        // indices under the predicate
        let keep: Vec<bool> = self.map(|v, k, i| predicate(v, k, i));
        let before = keep.len();

        let mut verdicts = keep.iter();
        self.keys.retain(|_| *verdicts.next().unwrap_or(&true));
        let mut verdicts = keep.iter();
        self.values.retain(|_| *verdicts.next().unwrap_or(&true));

        tracing::debug!(
            kept = self.keys.len(),
            removed = before - self.keys.len(),
            "filtered ordered map"
        );

        #[cfg(test)]
        assert_eq!(self.keys.len(), self.values.len());

        self
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq,
{
    /// Builds a map by calling [`OrderedMap::set`] on each pair in turn, so a
    /// repeated key keeps its first position and its last value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        map.extend(entries);
        map
    }

    /// Where a key sits in the order, if it's present.
    pub fn index_of(&self, k: &K) -> Option<usize> {
        self.keys.iter().position(|key| key == k)
    }

    /// Whether the map has an entry for `k`.
    pub fn has(&self, k: &K) -> bool {
        self.index_of(k).is_some()
    }

    /// Alias for [`OrderedMap::has`].
    pub fn contains_key(&self, k: &K) -> bool {
        self.has(k)
    }

    /// The value stored for `k`. A miss is `None`, which never collides with
    /// a stored value.
    pub fn get(&self, k: &K) -> Option<&V> {
        self.index_of(k).map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        match self.index_of(k) {
            Some(i) => Some(&mut self.values[i]),
            None => None,
        }
    }

    /// Stores `v` under `k`. An existing key is overwritten where it stands
    /// (it does not move to the back); a new key is appended. Returns the map
    /// so calls can be chained.
    pub fn set(&mut self, k: K, v: V) -> &mut Self {
        match self.index_of(&k) {
            Some(i) => {
                self.values[i] = v;
                tracing::trace!(index = i, new = false, "set");
            }
            None => {
                self.keys.push(k);
                self.values.push(v);
                tracing::trace!(index = self.keys.len() - 1, new = true, "set");
            }
        }

        #[cfg(test)]
        self.continuity_test();

        self
    }

    /// Removes the entry for `k`. Returns whether there was one.
    pub fn delete(&mut self, k: &K) -> bool {
        match self.index_of(k) {
            Some(i) => {
                self.remove_at(i);
                tracing::trace!(index = i, "delete");
                true
            }
            None => false,
        }
    }

    /// Removes the entry for `k`, handing back its value.
    pub fn remove(&mut self, k: &K) -> Option<V> {
        let i = self.index_of(k)?;
        Some(self.remove_at(i).1)
    }

    fn remove_at(&mut self, i: usize) -> (K, V) {
        let pair = (self.keys.remove(i), self.values.remove(i));

        #[cfg(test)]
        self.continuity_test();

        pair
    }

    /// Makes sure the two Vecs line up and no key shows up twice.
    #[cfg(test)]
    pub(crate) fn continuity_test(&self) {
        assert_eq!(self.keys.len(), self.values.len());

        for (i, k) in self.keys.iter().enumerate() {
            assert!(
                !self.keys[i + 1..].contains(k),
                "duplicate key at index {}",
                i
            );
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Owned `(key, value)` pairs in order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone,
{
    /// An owned copy of the keys.
    pub fn keys_vec(&self) -> Vec<K> {
        self.keys.clone()
    }
}

impl<K, V> OrderedMap<K, V>
where
    V: Clone,
{
    /// An owned copy of the values.
    pub fn values_vec(&self) -> Vec<V> {
        self.values.clone()
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: PartialEq,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: PartialEq,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}

impl<K, V> From<Vec<(K, V)>> for OrderedMap<K, V>
where
    K: PartialEq,
{
    fn from(entries: Vec<(K, V)>) -> Self {
        Self::from_entries(entries)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V>
where
    K: PartialEq,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_entries(entries)
    }
}

impl<K, V> Index<&K> for OrderedMap<K, V>
where
    K: PartialEq,
{
    type Output = V;

    /// Panics if the key isn't present, same as the std maps.
    fn index(&self, k: &K) -> &V {
        match self.get(k) {
            Some(v) => v,
            None => panic!("key not present in OrderedMap"),
        }
    }
}

impl<K, V> IndexMut<&K> for OrderedMap<K, V>
where
    K: PartialEq,
{
    fn index_mut(&mut self, k: &K) -> &mut V {
        match self.get_mut(k) {
            Some(v) => v,
            None => panic!("key not present in OrderedMap"),
        }
    }
}

/// Borrowing iterator over an [`OrderedMap`], in order.
pub struct Iter<'a, K, V> {
    inner: std::iter::Zip<std::slice::Iter<'a, K>, std::slice::Iter<'a, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Owning iterator over an [`OrderedMap`], in order.
pub struct IntoIter<K, V> {
    inner: std::iter::Zip<std::vec::IntoIter<K>, std::vec::IntoIter<V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.keys.into_iter().zip(self.values.into_iter()),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;

    #[test]
    fn set_chains_and_overwrites_in_place() {
        let mut m = OrderedMap::new();
        m.set("a", 1).set("b", 2).set("a", 3);

        assert_eq!(&["a", "b"], m.keys());
        assert_eq!(Some(&3), m.get(&"a"));
        assert_eq!(2, m.size());
    }

    #[test]
    fn delete_reports_whether_anything_was_there() {
        let mut m = OrderedMap::from_entries(vec![("a", 1), ("b", 2)]);

        assert!(m.delete(&"b"));
        assert_eq!(&["a"], m.keys());
        assert!(!m.delete(&"b"));
        assert!(!m.has(&"b"));
        assert_eq!(1, m.values().len());
    }

    #[test]
    fn duplicate_construction_keeps_first_position_and_last_value() {
        let m = OrderedMap::from(vec![("x", 1), ("y", 2), ("x", 3)]);

        assert_eq!(&["x", "y"], m.keys());
        assert_eq!(&[3, 2], m.values());
    }

    #[test]
    fn miss_is_distinguishable_from_a_stored_none() {
        let mut m: OrderedMap<&str, Option<u8>> = OrderedMap::new();
        m.set("present", None);

        assert_eq!(Some(&None), m.get(&"present"));
        assert_eq!(None, m.get(&"absent"));
    }

    #[test]
    fn clear_empties_everything() {
        let mut m = OrderedMap::from([(1, 'a'), (2, 'b')]);
        assert_eq!(0, m.clear().size());
        assert!(m.is_empty());
        assert!(m.values().is_empty());
    }

    #[test]
    fn for_each_and_map_visit_in_order() {
        let m = OrderedMap::from([("c", 3), ("a", 1), ("b", 2)]);

        let mut seen = Vec::new();
        m.for_each(|v, k, i| seen.push((*k, *v, i)));
        assert_eq!(vec![("c", 3, 0), ("a", 1, 1), ("b", 2, 2)], seen);

        let doubled = m.map(|v, _, _| v * 2);
        assert_eq!(vec![6, 2, 4], doubled);
    }

    #[test]
    fn filter_sees_snapshot_indices() {
        crate::init_test_tracing();

        let mut m = OrderedMap::from([(1, "a"), (2, "b"), (3, "c"), (4, "d")]);

        let mut indices = Vec::new();
        m.filter(|_, k, i| {
            indices.push(i);
            k % 2 == 0
        });

        // consecutive removals must not make the predicate skip anything
        assert_eq!(vec![0, 1, 2, 3], indices);
        assert_eq!(&[2, 4], m.keys());
        assert_eq!(&["b", "d"], m.values());
    }

    #[test]
    fn entries_pair_keys_with_values() {
        let m = OrderedMap::from([("a", 1), ("b", 2)]);
        assert_eq!(vec![("a", 1), ("b", 2)], m.entries());
    }

    #[test]
    fn clone_shares_nothing() {
        let mut original = OrderedMap::new();
        original.set("list", vec![1, 2]);

        let mut copy = original.clone();
        if let Some(list) = copy.get_mut(&"list") {
            list.push(3);
        }
        copy.set("other", vec![]);

        assert_eq!(Some(&vec![1, 2]), original.get(&"list"));
        assert!(!original.has(&"other"));

        original.delete(&"list");
        assert_eq!(Some(&vec![1, 2, 3]), copy.get(&"list"));
    }

    #[test]
    fn remove_hands_back_the_value() {
        let mut m = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(Some(2), m.remove(&"b"));
        assert_eq!(None, m.remove(&"b"));
        assert_eq!(Some((&"c", &3)), m.get_index(1));
    }

    #[test]
    fn index_and_iterators() {
        let mut m = OrderedMap::from([("a", 1), ("b", 2)]);
        m[&"b"] += 10;
        assert_eq!(12, m[&"b"]);

        let rev: Vec<_> = m.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(vec!["b", "a"], rev);

        let owned: Vec<_> = m.into_iter().collect();
        assert_eq!(vec![("a", 1), ("b", 12)], owned);
    }

    #[test]
    #[should_panic]
    fn index_panics_on_a_miss() {
        let m: OrderedMap<&str, u8> = OrderedMap::new();
        let _v: u8 = m[&"nope"];
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = OrderedMap::from([(1, 1), (2, 2)]);
        let b = OrderedMap::from([(2, 2), (1, 1)]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
