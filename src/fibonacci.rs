//! Fibonacci heap based mergeable priority queue
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized extract_min and delete
//! - O(1) ring splice on union, after the smaller arena has been moved over
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list and the queue keeps a key to the minimum root.
//! Nodes live in a [`NodeArena`], and an [`ItemIndex`] maps each present item to
//! its node so that elements can be addressed by value.
//!
//! # Laziness
//!
//! Insert and union never restructure anything: they only add trees to the root
//! list. All the deferred work is paid for in `extract_min`, which links trees of
//! equal degree until every root has a distinct degree (consolidation).
//! `decrease_key` cuts a node out of its tree when it becomes smaller than its
//! parent; a parent that loses a second child is cut as well (cascading cut),
//! which keeps the size of a degree-`k` tree at least `F(k + 2)`.

use crate::arena::{NodeArena, NodeKey, Slot};
use crate::index::ItemIndex;
use crate::traits::{MergeableQueue, QueueError};
use std::fmt;
use std::hash::Hash;
use std::mem;

/// `1 / log2(φ)`, turning a base-2 logarithm into a base-φ one
const LOG2_PHI_RECIPROCAL: f64 = 1.440_420_090_412_556_7;

/// Upper bound on the degree of any node in a heap of `len` nodes
fn degree_bound(len: usize) -> usize {
    if len < 2 {
        return 1;
    }
    ((len as f64).log2() * LOG2_PHI_RECIPROCAL).ceil() as usize + 1
}

/// Mergeable min-priority queue over unique items
///
/// # Example
///
/// ```rust
/// use fibonacci_queue::FibonacciQueue;
///
/// let mut queue = FibonacciQueue::new();
/// for item in [5, 3, 8, 1] {
///     queue.insert(item).unwrap();
/// }
/// assert_eq!(queue.find_min(), Some(&1));
/// queue.decrease_key(&8, Some(0)).unwrap();
/// assert_eq!(queue.extract_min(), Some(0));
/// assert_eq!(queue.into_iter().collect::<Vec<_>>(), vec![1, 3, 5]);
/// ```
pub struct FibonacciQueue<T> {
    nodes: NodeArena<T>,
    index: ItemIndex<T>,
    min: Option<NodeKey>,
    len: usize,
}

/// Structural defect found by [`FibonacciQueue::check_invariants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `left`/`right` links of a ring do not mirror each other
    BrokenSiblingLink,
    /// A node's parent link does not match the tree it hangs in
    BrokenParentLink,
    /// A node's degree differs from the size of its child ring
    WrongDegree,
    /// A child is smaller than its parent
    HeapOrder,
    /// A root carries a mark
    MarkedRoot,
    /// The minimum key does not point at the smallest root
    MinNotMinimal,
    /// `len`, the arena and the reachable node count disagree
    WrongCount,
    /// The item index and the live nodes disagree
    IndexMismatch,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InvariantViolation::BrokenSiblingLink => "sibling ring links are inconsistent",
            InvariantViolation::BrokenParentLink => "parent link does not match the tree",
            InvariantViolation::WrongDegree => "degree does not match the number of children",
            InvariantViolation::HeapOrder => "child is smaller than its parent",
            InvariantViolation::MarkedRoot => "root node is marked",
            InvariantViolation::MinNotMinimal => "minimum does not point at the smallest root",
            InvariantViolation::WrongCount => "length does not match the number of nodes",
            InvariantViolation::IndexMismatch => "item index does not match the live nodes",
        };
        f.write_str(message)
    }
}

impl std::error::Error for InvariantViolation {}

impl<T> Default for FibonacciQueue<T> {
    fn default() -> Self {
        Self {
            nodes: NodeArena::default(),
            index: ItemIndex::default(),
            min: None,
            len: 0,
        }
    }
}

impl<T: Ord + Hash + Clone> FibonacciQueue<T> {
    /// Creates a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` items before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            index: ItemIndex::with_capacity(capacity),
            min: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the queue
    ///
    /// Elements evicted with `decrease_key(item, None)` count until extracted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `item` is present and addressable
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains(item)
    }

    /// Returns the smallest item without removing it
    pub fn find_min(&self) -> Option<&T> {
        self.min.map(|min| self.nodes[min].slot.item())
    }

    /// Inserts an item as a new singleton tree in the root list
    ///
    /// # Errors
    /// Returns [`QueueError::AlreadyExists`] if an equal item is present.
    pub fn insert(&mut self, item: T) -> Result<(), QueueError> {
        if self.index.contains(&item) {
            return Err(QueueError::AlreadyExists);
        }
        let key = self.nodes.alloc(Slot::Live(item.clone()));
        self.index.insert(item, key);
        self.add_root(key);
        self.len += 1;
        self.after_mutation();
        Ok(())
    }

    /// Removes and returns the smallest item
    pub fn extract_min(&mut self) -> Option<T> {
        let min = self.min?;
        let item = self.remove_root(min);
        self.after_mutation();
        Some(item)
    }

    /// Replaces `item` by the strictly smaller `new_value`
    ///
    /// `None` evicts the element: it stops being addressable by value and orders
    /// below every other item, so the next [`extract_min`](Self::extract_min)
    /// returns it.
    ///
    /// # Errors
    /// - [`QueueError::NotFound`] if `item` is not present
    /// - [`QueueError::PriorityNotDecreased`] if `new_value` is not smaller than `item`
    /// - [`QueueError::AlreadyExists`] if `new_value` is already present
    ///
    /// Nothing is modified when an error is returned.
    pub fn decrease_key(&mut self, item: &T, new_value: Option<T>) -> Result<(), QueueError> {
        let key = self.index.get(item).ok_or(QueueError::NotFound)?;
        if let Some(value) = &new_value {
            if value >= item {
                return Err(QueueError::PriorityNotDecreased);
            }
            if self.index.contains(value) {
                return Err(QueueError::AlreadyExists);
            }
        }

        let (stored, _) = self.index.remove(item).ok_or(QueueError::NotFound)?;
        self.nodes[key].slot = match new_value {
            Some(value) => {
                self.index.insert(value.clone(), key);
                Slot::Live(value)
            }
            None => Slot::Evicted(stored),
        };

        if let Some(parent) = self.nodes[key].parent {
            if self.nodes[key].slot < self.nodes[parent].slot {
                self.cut(key, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(min) = self.min {
            if self.nodes[key].slot < self.nodes[min].slot {
                self.min = Some(key);
            }
        }
        self.after_mutation();
        Ok(())
    }

    /// Removes `item` from the queue and returns the stored copy
    ///
    /// The element is evicted, detached from its parent if it has one, and then
    /// extracted as a root.
    ///
    /// # Errors
    /// Returns [`QueueError::NotFound`] if `item` is not present.
    pub fn delete(&mut self, item: &T) -> Result<T, QueueError> {
        let (stored, key) = self.index.remove(item).ok_or(QueueError::NotFound)?;
        self.nodes[key].slot = Slot::Evicted(stored);
        if let Some(parent) = self.nodes[key].parent {
            self.cut(key, parent);
            self.cascading_cut(parent);
        }
        let removed = self.remove_root(key);
        self.after_mutation();
        Ok(removed)
    }

    /// Merges `other` into this queue
    ///
    /// The nodes of the smaller queue are moved into the arena of the larger
    /// one, then the two root rings are spliced together.
    ///
    /// # Errors
    /// Returns [`QueueError::AlreadyExists`] if both queues hold an equal item.
    /// `self` is left unchanged and `other` is dropped.
    pub fn union(&mut self, mut other: Self) -> Result<(), QueueError> {
        if self.index.overlaps(&other.index) {
            return Err(QueueError::AlreadyExists);
        }
        if other.len > self.len {
            mem::swap(self, &mut other);
        }
        let FibonacciQueue {
            nodes,
            index,
            min: other_min,
            len: other_len,
        } = other;
        let Some(other_min) = other_min else {
            return Ok(());
        };

        let remap = self.nodes.absorb(nodes);
        self.index.absorb(index, &remap);
        let other_min = remap[other_min];
        match self.min {
            Some(min) => {
                self.nodes.concat(min, other_min);
                if self.nodes[other_min].slot < self.nodes[min].slot {
                    self.min = Some(other_min);
                }
            }
            None => self.min = Some(other_min),
        }
        log::debug!("union: {} + {} elements", self.len, other_len);
        self.len += other_len;
        self.after_mutation();
        Ok(())
    }

    /// Adds `key` (which must be a singleton ring) to the root list
    fn add_root(&mut self, key: NodeKey) {
        debug_assert!(self.nodes[key].parent.is_none());
        match self.min {
            Some(min) => {
                self.nodes.splice_before(min, key);
                if self.nodes[key].slot < self.nodes[min].slot {
                    self.min = Some(key);
                }
            }
            None => self.min = Some(key),
        }
    }

    /// Removes the root `key` from the heap, promoting its children
    fn remove_root(&mut self, key: NodeKey) -> T {
        debug_assert!(self.nodes[key].parent.is_none());
        while let Some(child) = self.nodes[key].child {
            self.detach_child(key, child);
            self.nodes[child].marked = false;
            self.nodes.splice_before(key, child);
        }

        match self.nodes.unlink(key) {
            None => self.min = None,
            Some(survivor) => self.consolidate(survivor),
        }

        self.len -= 1;
        let Some(node) = self.nodes.free(key) else {
            unreachable!("root {key:?} missing from the arena");
        };
        if node.slot.is_live() {
            self.index.remove(node.slot.item());
        }
        node.slot.into_item()
    }

    /// Links trees of equal degree until every root degree is unique
    fn consolidate(&mut self, start: NodeKey) {
        let roots: Vec<NodeKey> = self.nodes.ring(start).collect();
        let root_count = roots.len();
        let mut by_degree: Vec<Option<NodeKey>> = vec![None; degree_bound(self.len) + 1];

        for root in roots {
            let mut tree = root;
            let mut degree = self.nodes[tree].degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(mut other) = by_degree[degree].take() else {
                    by_degree[degree] = Some(tree);
                    break;
                };
                if self.nodes[other].slot < self.nodes[tree].slot {
                    mem::swap(&mut tree, &mut other);
                }
                self.link(other, tree);
                degree += 1;
            }
        }

        // Rebuild the root list from the surviving trees
        self.min = None;
        let mut survivors = 0;
        for root in by_degree.into_iter().flatten() {
            self.nodes.isolate(root);
            self.add_root(root);
            survivors += 1;
        }
        log::debug!("consolidated {root_count} roots into {survivors}");
    }

    /// Makes the root `child` a child of the root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        log::trace!("link {child:?} under {parent:?}");
        self.nodes.unlink(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;

        let first_child = self.nodes[parent].child;
        match first_child {
            Some(first) => self.nodes.splice_before(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Removes `child` from the child ring of `parent`
    fn detach_child(&mut self, parent: NodeKey, child: NodeKey) {
        let rest = self.nodes.unlink(child);
        let node = &mut self.nodes[parent];
        if node.child == Some(child) {
            node.child = rest;
        }
        node.degree -= 1;
        self.nodes[child].parent = None;
    }

    /// Moves `node` from the children of `parent` to the root list
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        log::trace!("cut {node:?} from {parent:?}");
        self.detach_child(parent, node);
        self.nodes[node].marked = false;
        self.add_root(node);
    }

    /// Walks up from `node`, cutting marked ancestors until an unmarked one
    /// (which gets marked) or a root is reached
    fn cascading_cut(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            log::trace!("cascading cut reached marked {node:?}");
            self.cut(node, parent);
            node = parent;
        }
    }

    #[inline]
    fn after_mutation(&self) {
        #[cfg(feature = "debug-invariants")]
        if let Err(violation) = self.check_invariants() {
            panic!("fibonacci queue corrupted: {violation}");
        }
    }

    /// Verifies every structural invariant of the heap
    ///
    /// Walks the whole forest, so this is O(n). Intended for tests and debugging;
    /// the `debug-invariants` feature runs it after every mutating operation.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return if self.len == 0 && self.nodes.len() == 0 && self.index.len() == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::WrongCount)
            };
        };
        if self.nodes[min].parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink);
        }

        let mut reachable = 0;
        let mut evicted = 0;
        let mut pending = vec![(min, None)];
        while let Some((first, parent)) = pending.pop() {
            let mut members = 0;
            for key in self.nodes.ring(first) {
                members += 1;
                reachable += 1;
                let node = &self.nodes[key];
                if self.nodes[node.right].left != key || self.nodes[node.left].right != key {
                    return Err(InvariantViolation::BrokenSiblingLink);
                }
                if node.parent != parent {
                    return Err(InvariantViolation::BrokenParentLink);
                }
                match parent {
                    Some(parent) if node.slot < self.nodes[parent].slot => {
                        return Err(InvariantViolation::HeapOrder);
                    }
                    None if node.marked => return Err(InvariantViolation::MarkedRoot),
                    None if node.slot < self.nodes[min].slot => {
                        return Err(InvariantViolation::MinNotMinimal);
                    }
                    _ => {}
                }
                if !node.slot.is_live() {
                    evicted += 1;
                }
                match node.child {
                    Some(child) => pending.push((child, Some(key))),
                    None if node.degree != 0 => return Err(InvariantViolation::WrongDegree),
                    None => {}
                }
            }
            if let Some(parent) = parent {
                if self.nodes[parent].degree != members {
                    return Err(InvariantViolation::WrongDegree);
                }
            }
        }

        if reachable != self.len || self.nodes.len() != self.len {
            return Err(InvariantViolation::WrongCount);
        }
        if self.index.len() + evicted != self.len {
            return Err(InvariantViolation::IndexMismatch);
        }
        for (item, key) in self.index.iter() {
            if !self.nodes.contains(key) || self.nodes[key].slot != Slot::Live(item.clone()) {
                return Err(InvariantViolation::IndexMismatch);
            }
        }
        Ok(())
    }
}

impl<T: Ord + Hash + Clone> MergeableQueue<T> for FibonacciQueue<T> {
    fn new() -> Self {
        FibonacciQueue::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciQueue::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciQueue::len(self)
    }

    fn insert(&mut self, item: T) -> Result<(), QueueError> {
        FibonacciQueue::insert(self, item)
    }

    fn find_min(&self) -> Option<&T> {
        FibonacciQueue::find_min(self)
    }

    fn extract_min(&mut self) -> Option<T> {
        FibonacciQueue::extract_min(self)
    }

    fn decrease_key(&mut self, item: &T, new_value: Option<T>) -> Result<(), QueueError> {
        FibonacciQueue::decrease_key(self, item, new_value)
    }

    fn delete(&mut self, item: &T) -> Result<T, QueueError> {
        FibonacciQueue::delete(self, item)
    }

    fn union(&mut self, other: Self) -> Result<(), QueueError> {
        FibonacciQueue::union(self, other)
    }
}

impl<T: fmt::Debug> fmt::Debug for FibonacciQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciQueue")
            .field("len", &self.len)
            .field("min", &self.min.map(|min| self.nodes[min].slot.item()))
            .finish()
    }
}

impl<T: Ord + Hash + Clone> FibonacciQueue<T> {
    /// Inserts every item of `iter`, stopping at the first duplicate
    ///
    /// Items before the duplicate stay inserted.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), QueueError> {
        iter.into_iter().try_for_each(|item| self.insert(item))
    }
}

/// Duplicates of items already present are skipped
impl<T: Ord + Hash + Clone> Extend<T> for FibonacciQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.insert(item);
        }
    }
}

impl<T: Ord + Hash + Clone> FromIterator<T> for FibonacciQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = FibonacciQueue::new();
        queue.extend(iter);
        queue
    }
}

/// Owning iterator yielding the items of a queue in ascending order
pub struct IntoSortedIter<T> {
    queue: FibonacciQueue<T>,
}

impl<T: Ord + Hash + Clone> Iterator for IntoSortedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.extract_min()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T: Ord + Hash + Clone> ExactSizeIterator for IntoSortedIter<T> {}

impl<T: Ord + Hash + Clone> IntoIterator for FibonacciQueue<T> {
    type Item = T;
    type IntoIter = IntoSortedIter<T>;

    fn into_iter(self) -> IntoSortedIter<T> {
        IntoSortedIter { queue: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(items: &[i32]) -> FibonacciQueue<i32> {
        let mut queue = FibonacciQueue::new();
        for &item in items {
            queue.insert(item).unwrap();
        }
        queue
    }

    /// Builds a heap with a three-level tree by forcing a consolidation
    fn consolidated(count: i32) -> FibonacciQueue<i32> {
        let mut queue = filled(&(0..count).collect::<Vec<_>>());
        assert_eq!(queue.extract_min(), Some(0));
        queue.check_invariants().unwrap();
        queue
    }

    #[test]
    fn test_basic_operations() {
        let mut queue = FibonacciQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.find_min(), None);
        assert_eq!(queue.extract_min(), None);

        queue.insert(5).unwrap();
        queue.insert(3).unwrap();
        queue.insert(8).unwrap();
        queue.insert(1).unwrap();
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.find_min(), Some(&1));

        assert_eq!(queue.extract_min(), Some(1));
        assert_eq!(queue.extract_min(), Some(3));
        assert_eq!(queue.extract_min(), Some(5));
        assert_eq!(queue.extract_min(), Some(8));
        assert!(queue.is_empty());
        queue.check_invariants().unwrap();
    }

    #[test]
    fn test_insert_duplicate() {
        let mut queue = filled(&[1, 2]);
        assert_eq!(queue.insert(2), Err(QueueError::AlreadyExists));
        assert_eq!(queue.len(), 2);
        queue.check_invariants().unwrap();
    }

    #[test]
    fn test_decrease_key_composite() {
        let mut queue = FibonacciQueue::new();
        queue.insert((10, 'a')).unwrap();
        queue.insert((20, 'b')).unwrap();
        queue.insert((30, 'c')).unwrap();

        queue.decrease_key(&(30, 'c'), Some((5, 'c'))).unwrap();
        assert_eq!(queue.find_min(), Some(&(5, 'c')));
        assert!(!queue.contains(&(30, 'c')));
        assert_eq!(queue.extract_min(), Some((5, 'c')));
        assert_eq!(queue.extract_min(), Some((10, 'a')));
        assert_eq!(queue.extract_min(), Some((20, 'b')));
    }

    #[test]
    fn test_decrease_key_errors_leave_queue_untouched() {
        let mut queue = filled(&[10, 20, 30]);
        assert_eq!(queue.decrease_key(&99, Some(1)), Err(QueueError::NotFound));
        assert_eq!(
            queue.decrease_key(&20, Some(25)),
            Err(QueueError::PriorityNotDecreased)
        );
        assert_eq!(
            queue.decrease_key(&20, Some(20)),
            Err(QueueError::PriorityNotDecreased)
        );
        assert_eq!(
            queue.decrease_key(&30, Some(10)),
            Err(QueueError::AlreadyExists)
        );
        assert!(queue.contains(&20));
        assert!(queue.contains(&30));
        assert!(!queue.contains(&25));
        queue.check_invariants().unwrap();
        assert_eq!(queue.into_iter().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_decrease_key_inside_tree_cuts() {
        let mut queue = consolidated(17);
        // 1..=16 now forms a single binomial-shaped tree rooted at 1
        assert_eq!(queue.len(), 16);
        queue.decrease_key(&16, Some(-1)).unwrap();
        queue.check_invariants().unwrap();
        assert_eq!(queue.find_min(), Some(&-1));

        queue.decrease_key(&15, Some(-2)).unwrap();
        queue.decrease_key(&14, Some(-3)).unwrap();
        queue.decrease_key(&13, Some(-4)).unwrap();
        queue.check_invariants().unwrap();

        let drained: Vec<_> = queue.into_iter().collect();
        let mut expected = vec![-4, -3, -2, -1];
        expected.extend(1..13);
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_cascading_cut_marks_then_cuts() {
        let mut queue = consolidated(32);
        for (i, item) in (20..32).rev().enumerate() {
            queue.decrease_key(&item, Some(-(i as i32) - 1)).unwrap();
            queue.check_invariants().unwrap();
        }
        let drained: Vec<_> = queue.into_iter().collect();
        let mut expected: Vec<i32> = (-12..0).collect();
        expected.extend(1..20);
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_evict_with_sentinel() {
        let mut queue = consolidated(10);
        queue.decrease_key(&7, None).unwrap();
        queue.check_invariants().unwrap();
        assert!(!queue.contains(&7));
        assert_eq!(queue.find_min(), Some(&7));
        assert_eq!(queue.decrease_key(&7, Some(0)), Err(QueueError::NotFound));

        // The evicted value may be inserted again as a fresh element
        queue.insert(7).unwrap();
        assert_eq!(queue.len(), 10);
        queue.check_invariants().unwrap();

        assert_eq!(queue.extract_min(), Some(7));
        assert!(queue.contains(&7));
        assert_eq!(queue.extract_min(), Some(1));
    }

    #[test]
    fn test_delete() {
        let mut queue = consolidated(20);
        assert_eq!(queue.delete(&5), Ok(5));
        assert_eq!(queue.delete(&5), Err(QueueError::NotFound));
        assert_eq!(queue.decrease_key(&5, None), Err(QueueError::NotFound));
        queue.check_invariants().unwrap();

        assert_eq!(queue.delete(&1), Ok(1));
        assert_eq!(queue.delete(&19), Ok(19));
        queue.check_invariants().unwrap();

        let drained: Vec<_> = queue.into_iter().collect();
        let expected: Vec<i32> = (2..19).filter(|&i| i != 5).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_delete_under_evicted_parent() {
        let mut queue = consolidated(8);
        queue.decrease_key(&1, None).unwrap();
        // The evicted root stays the minimum; deleting a deeper node must not pop it
        assert_eq!(queue.delete(&6), Ok(6));
        queue.check_invariants().unwrap();
        assert_eq!(queue.find_min(), Some(&1));
        assert_eq!(queue.extract_min(), Some(1));
        assert_eq!(queue.into_iter().collect::<Vec<_>>(), vec![2, 3, 4, 5, 7]);
    }

    #[test]
    fn test_union() {
        let mut left = filled(&[5, 10]);
        let right = filled(&[3, 7]);
        left.union(right).unwrap();
        assert_eq!(left.len(), 4);
        assert_eq!(left.find_min(), Some(&3));
        left.check_invariants().unwrap();
        left.decrease_key(&7, Some(1)).unwrap();
        assert_eq!(left.into_iter().collect::<Vec<_>>(), vec![1, 3, 5, 10]);
    }

    #[test]
    fn test_union_with_larger_and_empty() {
        let mut small = filled(&[100]);
        let large = consolidated(12);
        small.union(large).unwrap();
        assert_eq!(small.len(), 12);
        assert_eq!(small.find_min(), Some(&1));
        small.check_invariants().unwrap();

        small.union(FibonacciQueue::new()).unwrap();
        assert_eq!(small.len(), 12);

        let mut empty = FibonacciQueue::new();
        empty.union(filled(&[4, 2])).unwrap();
        assert_eq!(empty.find_min(), Some(&2));
        empty.check_invariants().unwrap();
    }

    #[test]
    fn test_union_rejects_shared_items() {
        let mut left = filled(&[1, 2, 3]);
        let right = filled(&[3, 4]);
        assert_eq!(left.union(right), Err(QueueError::AlreadyExists));
        assert_eq!(left.len(), 3);
        left.check_invariants().unwrap();
    }

    #[test]
    fn test_degree_bound_covers_fibonacci_trees() {
        assert_eq!(degree_bound(0), 1);
        assert_eq!(degree_bound(1), 1);
        // A degree-k node roots at least F(k + 2) nodes
        let (mut a, mut b) = (1usize, 2usize);
        for degree in 1..40 {
            assert!(degree_bound(b) >= degree, "bound too small for {b} nodes");
            (a, b) = (b, a + b);
        }
    }

    #[test]
    fn test_collect_and_extend() {
        let mut queue: FibonacciQueue<i32> = [4, 1, 4, 3].into_iter().collect();
        assert_eq!(queue.len(), 3);
        queue.extend([0, 1]);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.try_extend([9, 3, 10]), Err(QueueError::AlreadyExists));
        assert!(queue.contains(&9));
        assert!(!queue.contains(&10));

        let iter = queue.into_iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.collect::<Vec<_>>(), vec![0, 1, 3, 4, 9]);
    }

    #[test]
    fn test_debug_output() {
        let queue = filled(&[2, 1]);
        assert_eq!(
            format!("{queue:?}"),
            "FibonacciQueue { len: 2, min: Some(1) }"
        );
    }
}
