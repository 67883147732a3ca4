//! Sorted insertion into an [`OrderedMap`] whose keys are kept ascending.
//!
//! This only keeps the order if every insert goes through `sorted_set`; mixing
//! in plain `set` calls appends wherever and the binary search stops making
//! sense (it still won't panic or break the map, it just won't sort).

use std::cmp::Ordering;

use crate::OrderedMap;

/// What the search decided to do with the incoming pair.
#[derive(Debug, PartialEq, Eq)]
enum Placement {
    /// Key already present at this index.
    Overwrite(usize),

    /// New key goes in at this index in both Vecs.
    Insert(usize),

    /// Search space ran out without a verdict.
    Nowhere,
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Inserts `k` where it belongs in ascending key order, searching the
    /// whole map. An existing key has its value overwritten in place.
    pub fn sorted_set(&mut self, k: K, v: V) -> &mut Self {
        let end = self.len().saturating_sub(1);
        self.sorted_set_in(k, v, 0, end)
    }

    /// Like [`OrderedMap::sorted_set`], but only searches between the
    /// inclusive positions `start` and `end`. `end` is clamped to the last
    /// index. A key already in the map is overwritten wherever it is, inside
    /// the window or not; the window only places new keys. A window that
    /// can't hold a new key's sorted position inserts at the nearest edge of
    /// the window, or not at all once it's exhausted.
    pub fn sorted_set_in(&mut self, k: K, v: V, start: usize, end: usize) -> &mut Self {
        if let Some(i) = self.index_of(&k) {
            self.values[i] = v;
            tracing::trace!(index = i, branch = "overwrite", "sorted_set");
            return self;
        }

        if self.is_empty() {
            self.keys.push(k);
            self.values.push(v);
            tracing::trace!(index = 0, branch = "empty", "sorted_set");
            return self;
        }

        if start >= self.len() {
            tracing::trace!(start, len = self.len(), "sorted_set window out of range");
            return self;
        }

        let end = end.min(self.len() - 1);

        match self.search(&k, start, end) {
            Placement::Overwrite(i) => {
                self.values[i] = v;
                tracing::trace!(index = i, branch = "overwrite", "sorted_set");
            }
            Placement::Insert(i) => {
                self.values.insert(i, v);
                self.keys.insert(i, k);
                tracing::trace!(index = i, branch = "insert", "sorted_set");
            }
            Placement::Nowhere => {
                tracing::trace!(branch = "exhausted", "sorted_set");
            }
        }

        #[cfg(test)]
        self.continuity_test();

        self
    }

    /// Binary search over `keys[start..=end]`. Boundaries are checked before
    /// the midpoint at every step: equal to either edge, past the right edge,
    /// then before the left edge.
    fn search(&self, k: &K, mut start: usize, mut end: usize) -> Placement {
        loop {
            if *k == self.keys[start] {
                return Placement::Overwrite(start);
            }
            if *k == self.keys[end] {
                return Placement::Overwrite(end);
            }
            if *k > self.keys[end] {
                return Placement::Insert(end + 1);
            }
            if *k < self.keys[start] {
                return Placement::Insert(start);
            }
            if start >= end {
                return Placement::Nowhere;
            }

            let mid = start + (end - start) / 2;
            match k.cmp(&self.keys[mid]) {
                Ordering::Less => match mid.checked_sub(1) {
                    Some(e) => end = e,
                    None => return Placement::Nowhere,
                },
                Ordering::Greater => start = mid + 1,
                // same as an edge match, and as `set` on an existing key
                Ordering::Equal => return Placement::Overwrite(mid),
            }

            if start >= self.keys.len() || end >= self.keys.len() {
                return Placement::Nowhere;
            }
        }
    }
}
