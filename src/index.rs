//! Item index: value-addressed lookup of heap nodes
//!
//! The queue is addressed by the items themselves rather than by handles, so
//! `decrease_key` and `delete` need to find the node that currently owns a
//! value. The index is an [`FxHashMap`] from item to [`NodeKey`], holding exactly
//! one entry per live node.

use crate::arena::NodeKey;
use rustc_hash::FxHashMap;
use slotmap::SecondaryMap;
use std::hash::Hash;

#[derive(Debug)]
pub(crate) struct ItemIndex<T> {
    entries: FxHashMap<T, NodeKey>,
}

impl<T> Default for ItemIndex<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<T: Hash + Eq> ItemIndex<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&self, item: &T) -> Option<NodeKey> {
        self.entries.get(item).copied()
    }

    pub(crate) fn contains(&self, item: &T) -> bool {
        self.entries.contains_key(item)
    }

    /// Records `item` as owned by `key`. The item must not be present yet.
    pub(crate) fn insert(&mut self, item: T, key: NodeKey) {
        let previous = self.entries.insert(item, key);
        debug_assert!(previous.is_none(), "item indexed twice");
    }

    /// Removes the entry for `item`, handing back the stored copy of the item
    pub(crate) fn remove(&mut self, item: &T) -> Option<(T, NodeKey)> {
        self.entries.remove_entry(item)
    }

    /// Returns true if any item is present in both indices
    pub(crate) fn overlaps(&self, other: &Self) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.entries.keys().any(|item| large.contains(item))
    }

    /// Takes over every entry of `other`, translating keys through `remap`
    pub(crate) fn absorb(&mut self, other: Self, remap: &SecondaryMap<NodeKey, NodeKey>) {
        self.entries.reserve(other.len());
        for (item, key) in other.entries {
            self.insert(item, remap[key]);
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&T, NodeKey)> + '_ {
        self.entries.iter().map(|(item, &key)| (item, key))
    }
}
