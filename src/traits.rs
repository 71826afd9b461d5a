//! Common traits for mergeable priority queues
//!
//! [`MergeableQueue`] is the contract consumers program against (for example the
//! minimum spanning forest in [`graph`](crate::graph)). Items are both payload and
//! priority: a queue holds a *set* of items ordered by [`Ord`], and
//! `decrease_key`/`delete` address an element by the item value itself.
//!
//! Callers that need identity and priority to differ wrap both into one composite
//! value, e.g. `(weight, (from, to))`.

use std::fmt;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The item is not currently present in the queue
    NotFound,
    /// The item (or the replacement value) is already present in the queue
    AlreadyExists,
    /// The new value is not strictly smaller than the current value
    PriorityNotDecreased,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::NotFound => write!(f, "item is not present in the queue"),
            QueueError::AlreadyExists => write!(f, "item is already present in the queue"),
            QueueError::PriorityNotDecreased => {
                write!(f, "new value is not less than the current value")
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// A min-priority queue over unique items supporting value-addressed updates
/// and merging.
///
/// # Example
///
/// ```rust
/// use fibonacci_queue::{FibonacciQueue, MergeableQueue};
///
/// let mut queue = FibonacciQueue::new();
/// queue.insert(30).unwrap();
/// queue.insert(10).unwrap();
/// queue.decrease_key(&30, Some(5)).unwrap();
/// assert_eq!(queue.find_min(), Some(&5));
/// assert_eq!(queue.extract_min(), Some(5));
/// ```
pub trait MergeableQueue<T: Ord>: Sized {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns true if the queue is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the queue
    fn len(&self) -> usize;

    /// Inserts an item
    ///
    /// # Errors
    /// Returns [`QueueError::AlreadyExists`] if an equal item is present.
    ///
    /// # Time Complexity
    /// O(1) for the Fibonacci queue.
    fn insert(&mut self, item: T) -> Result<(), QueueError>;

    /// Returns the smallest item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn find_min(&self) -> Option<&T>;

    /// Removes and returns the smallest item
    ///
    /// # Time Complexity
    /// O(log n) amortized for the Fibonacci queue.
    fn extract_min(&mut self) -> Option<T>;

    /// Replaces `item` by a strictly smaller `new_value`
    ///
    /// `None` means "smaller than anything present": the element is evicted from
    /// the index and will be the next one extracted.
    ///
    /// # Errors
    /// - [`QueueError::NotFound`] if `item` is not present
    /// - [`QueueError::PriorityNotDecreased`] if `new_value` is not smaller
    /// - [`QueueError::AlreadyExists`] if `new_value` is already present
    ///
    /// # Time Complexity
    /// O(1) amortized for the Fibonacci queue.
    fn decrease_key(&mut self, item: &T, new_value: Option<T>) -> Result<(), QueueError>;

    /// Removes `item` from the queue and returns the stored copy
    ///
    /// # Errors
    /// Returns [`QueueError::NotFound`] if `item` is not present.
    fn delete(&mut self, item: &T) -> Result<T, QueueError>;

    /// Merges another queue into this one, consuming the other queue
    ///
    /// # Errors
    /// Returns [`QueueError::AlreadyExists`] if both queues hold an equal item;
    /// `self` is left unchanged in that case.
    fn union(&mut self, other: Self) -> Result<(), QueueError>;
}
