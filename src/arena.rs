//! Arena storage for Fibonacci heap nodes
//!
//! Every node of a [`FibonacciQueue`](crate::fibonacci::FibonacciQueue) lives in a
//! [`slotmap::SlotMap`] owned by the queue. Parent, child and sibling links are
//! plain [`NodeKey`]s into that map, so the circular sibling rings carry no
//! ownership and there is nothing to double-free: removing a node from the arena
//! is the only way it is ever destroyed.
//!
//! # Characteristics
//! - Contiguous memory allocation (better cache locality than boxed nodes)
//! - Generational keys, so a stale key can never alias a newer node
//! - O(1) ring splice, unlink and concatenation
//!
//! Rings are addressed by any one of their members. A node that belongs to no
//! ring is a singleton ring: its `left` and `right` both point at itself.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Key of a node inside a [`NodeArena`]
    pub struct NodeKey;
}

/// Payload of a node.
///
/// `Evicted` is the "no value" sentinel used by `decrease_key(item, None)`: it
/// keeps the evicted item around so it can still be handed back when the node
/// is extracted, but orders below every `Live` payload. The derived ordering
/// compares the variant first, then the wrapped item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Slot<T> {
    Evicted(T),
    Live(T),
}

impl<T> Slot<T> {
    pub(crate) fn item(&self) -> &T {
        match self {
            Slot::Evicted(item) | Slot::Live(item) => item,
        }
    }

    pub(crate) fn into_item(self) -> T {
        match self {
            Slot::Evicted(item) | Slot::Live(item) => item,
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        matches!(self, Slot::Live(_))
    }
}

/// A tree node of the heap forest
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) slot: Slot<T>,
    pub(crate) parent: Option<NodeKey>,
    /// One designated child; its siblings are reachable through its ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    /// Number of direct children
    pub(crate) degree: usize,
    /// Lost a child since it last became a child
    pub(crate) marked: bool,
}

/// Slotmap-backed node arena with circular-ring primitives
#[derive(Debug)]
pub(crate) struct NodeArena<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<T> NodeArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Allocates a parentless, childless node forming its own singleton ring
    pub(crate) fn alloc(&mut self, slot: Slot<T>) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            slot,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        })
    }

    /// Frees a node. The caller must have unlinked it from every ring first.
    pub(crate) fn free(&mut self, key: NodeKey) -> Option<Node<T>> {
        let node = self.nodes.remove(key)?;
        debug_assert!(node.left == key && node.right == key);
        debug_assert!(node.parent.is_none() && node.child.is_none());
        Some(node)
    }

    /// Inserts the singleton `key` into the ring of `anchor`, just left of it
    pub(crate) fn splice_before(&mut self, anchor: NodeKey, key: NodeKey) {
        debug_assert!(self[key].left == key && self[key].right == key);
        let left = self[anchor].left;
        let node = &mut self[key];
        node.left = left;
        node.right = anchor;
        self[left].right = key;
        self[anchor].left = key;
    }

    /// Removes `key` from its ring, leaving it as a singleton.
    ///
    /// Returns a surviving member of the old ring, or `None` if `key` was alone.
    pub(crate) fn unlink(&mut self, key: NodeKey) -> Option<NodeKey> {
        let (left, right) = (self[key].left, self[key].right);
        if right == key {
            return None;
        }
        self[left].right = right;
        self[right].left = left;
        self.isolate(key);
        Some(right)
    }

    /// Resets the sibling links of `key` without touching its old neighbours
    pub(crate) fn isolate(&mut self, key: NodeKey) {
        let node = &mut self[key];
        node.left = key;
        node.right = key;
    }

    /// Joins two distinct rings into one
    pub(crate) fn concat(&mut self, a: NodeKey, b: NodeKey) {
        let a_left = self[a].left;
        let b_left = self[b].left;
        self[a_left].right = b;
        self[b].left = a_left;
        self[b_left].right = a;
        self[a].left = b_left;
    }

    /// Iterates over the ring containing `start`, beginning at `start`
    pub(crate) fn ring(&self, start: NodeKey) -> Ring<'_, T> {
        Ring {
            arena: self,
            start,
            next: Some(start),
            remaining: self.nodes.len(),
        }
    }

    /// Moves every node of `other` into this arena, rewriting all links.
    ///
    /// Returns the mapping from `other`'s keys to the new keys.
    pub(crate) fn absorb(&mut self, other: NodeArena<T>) -> SecondaryMap<NodeKey, NodeKey> {
        let mut remap = SecondaryMap::with_capacity(other.nodes.len());
        let mut moved = Vec::with_capacity(other.nodes.len());
        for (old, node) in other.nodes {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }
        for key in moved {
            let node = &mut self.nodes[key];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|parent| remap[parent]);
            node.child = node.child.map(|child| remap[child]);
        }
        remap
    }
}

impl<T> Index<NodeKey> for NodeArena<T> {
    type Output = Node<T>;

    fn index(&self, key: NodeKey) -> &Node<T> {
        &self.nodes[key]
    }
}

impl<T> IndexMut<NodeKey> for NodeArena<T> {
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<T> {
        &mut self.nodes[key]
    }
}

/// Iterator over one sibling ring.
///
/// Stops after one full turn, or after visiting as many nodes as the arena holds
/// so a corrupted ring cannot loop forever.
pub(crate) struct Ring<'a, T> {
    arena: &'a NodeArena<T>,
    start: NodeKey,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<T> Iterator for Ring<'_, T> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        if self.remaining == 0 {
            self.next = None;
            return None;
        }
        self.remaining -= 1;
        let right = self.arena[current].right;
        self.next = (right != self.start).then_some(right);
        Some(current)
    }
}
