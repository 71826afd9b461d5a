//! Mergeable Priority Queue for Rust
//!
//! This crate provides a value-addressed min-priority queue built on a Fibonacci
//! heap, together with a graph consumer that uses it for Prim's minimum spanning
//! forest.
//!
//! # Features
//!
//! - **Fibonacci Queue**: O(1) amortized insert and decrease_key; O(log n) amortized
//!   extract_min and delete; union splices root lists after re-keying the smaller queue
//! - **Value addressing**: items are both payload and priority, so `decrease_key` and
//!   `delete` take the item itself instead of a handle
//! - **Arena storage**: nodes live in a `slotmap` arena, sibling rings are plain keys
//! - **Graph**: adjacency-matrix graph with a minimum spanning forest generic over
//!   any [`MergeableQueue`]
//!
//! # Example
//!
//! ```rust
//! use fibonacci_queue::{FibonacciQueue, QueueError};
//!
//! let mut queue = FibonacciQueue::new();
//! queue.insert(10).unwrap();
//! queue.insert(20).unwrap();
//! queue.insert(30).unwrap();
//!
//! queue.decrease_key(&30, Some(5)).unwrap();
//! assert_eq!(queue.find_min(), Some(&5));
//! assert_eq!(queue.insert(10), Err(QueueError::AlreadyExists));
//!
//! assert_eq!(queue.delete(&20), Ok(20));
//! assert_eq!(queue.decrease_key(&20, None), Err(QueueError::NotFound));
//! assert_eq!(queue.into_iter().collect::<Vec<_>>(), vec![5, 10]);
//! ```

mod arena;
pub mod fibonacci;
pub mod graph;
mod index;
pub mod traits;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciQueue, IntoSortedIter, InvariantViolation};
pub use traits::{MergeableQueue, QueueError};
