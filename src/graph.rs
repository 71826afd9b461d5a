//! Adjacency-matrix graph and Prim's minimum spanning forest
//!
//! This module is the reference consumer of [`MergeableQueue`]. The spanning
//! forest search pushes composite keys `(weight, (from, to))` into the queue; the
//! tuple ordering compares the weight first and breaks ties by endpoint indices,
//! so the queue needs no knowledge of graph semantics and every key is unique.
//!
//! # Design
//!
//! Vertices are mapped to dense indices with an [`FxHashMap`]. Edge weights live
//! in a square matrix of `Option<E>`, and a per-vertex [`FxHashSet`] of outgoing
//! neighbours avoids scanning whole matrix rows. Edges are directed as inserted:
//! `insert_edge(a, b, w)` makes `b` reachable from `a` only.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_queue::graph::Graph;
//! use fibonacci_queue::FibonacciQueue;
//!
//! let mut graph = Graph::new();
//! for city in ["a", "b", "c"] {
//!     graph.insert_vertex(city);
//! }
//! graph.insert_edge("a", "b", 4).unwrap();
//! graph.insert_edge("a", "c", 1).unwrap();
//! graph.insert_edge("c", "b", 2).unwrap();
//!
//! let forest = graph
//!     .minimum_spanning_forest::<FibonacciQueue<_>>()
//!     .unwrap();
//! assert_eq!(forest.total_weight(), 3);
//! assert_eq!(forest.to_string(), "a:c c:b");
//! ```

use crate::traits::{MergeableQueue, QueueError};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;

/// Error type for graph operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex named by the operation is not in the graph
    VertexNotFound,
    /// The priority queue rejected an operation
    Queue(QueueError),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::VertexNotFound => write!(f, "vertex is not in the graph"),
            GraphError::Queue(err) => write!(f, "priority queue error: {err}"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::VertexNotFound => None,
            GraphError::Queue(err) => Some(err),
        }
    }
}

impl From<QueueError> for GraphError {
    fn from(err: QueueError) -> Self {
        GraphError::Queue(err)
    }
}

/// Internal dense vertex index
type VertexIndex = usize;

/// Key pushed into the queue during the spanning forest search
pub type CandidateEdge<E> = (E, (VertexIndex, VertexIndex));

/// Directed graph stored as an adjacency matrix
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    /// `weights[from][to]`
    weights: Vec<Vec<Option<E>>>,
    /// Outgoing neighbours of each index
    neighbors: Vec<FxHashSet<VertexIndex>>,
    /// Maps vertex to its index
    codes: FxHashMap<V, VertexIndex>,
    /// Maps index back to its vertex; `None` once removed
    vertices: Vec<Option<V>>,
    len: usize,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Graph {
            weights: Vec::new(),
            neighbors: Vec::new(),
            codes: FxHashMap::default(),
            vertices: Vec::new(),
            len: 0,
        }
    }
}

impl<V, E> Graph<V, E>
where
    V: Clone + Eq + Hash,
    E: Clone,
{
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices currently in the graph
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn code(&self, vertex: &V) -> Result<VertexIndex, GraphError> {
        self.codes.get(vertex).copied().ok_or(GraphError::VertexNotFound)
    }

    /// Adds a vertex; inserting an existing vertex does nothing
    pub fn insert_vertex(&mut self, vertex: V) {
        if self.codes.contains_key(&vertex) {
            return;
        }
        let index = self.vertices.len();
        self.codes.insert(vertex.clone(), index);
        self.vertices.push(Some(vertex));
        self.neighbors.push(FxHashSet::default());
        for row in &mut self.weights {
            row.push(None);
        }
        self.weights.push(vec![None; index + 1]);
        self.len += 1;
    }

    /// Adds or replaces the edge `from -> to`
    pub fn insert_edge(&mut self, from: V, to: V, weight: E) -> Result<(), GraphError> {
        let from = self.code(&from)?;
        let to = self.code(&to)?;
        self.neighbors[from].insert(to);
        self.weights[from][to] = Some(weight);
        Ok(())
    }

    /// Removes a vertex together with every edge touching it
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<(), GraphError> {
        let index = self.code(vertex)?;
        for (row, neighbors) in self.weights.iter_mut().zip(&mut self.neighbors) {
            row[index] = None;
            neighbors.remove(&index);
        }
        self.weights[index].iter_mut().for_each(|weight| *weight = None);
        self.neighbors[index].clear();
        self.codes.remove(vertex);
        self.vertices[index] = None;
        self.len -= 1;
        Ok(())
    }

    /// Removes the edge `from -> to`, returning its weight if it existed
    pub fn remove_edge(&mut self, from: &V, to: &V) -> Result<Option<E>, GraphError> {
        let from = self.code(from)?;
        let to = self.code(to)?;
        self.neighbors[from].remove(&to);
        Ok(self.weights[from][to].take())
    }

    /// Returns true if there is an edge between `v` and `u` in either direction
    pub fn are_adjacent(&self, v: &V, u: &V) -> Result<bool, GraphError> {
        let v = self.code(v)?;
        let u = self.code(u)?;
        Ok(self.neighbors[v].contains(&u) || self.neighbors[u].contains(&v))
    }

    /// Number of outgoing edges of `vertex`
    pub fn degree(&self, vertex: &V) -> Result<usize, GraphError> {
        let index = self.code(vertex)?;
        Ok(self.neighbors[index].len())
    }

    /// Returns the weight of the edge `from -> to`
    pub fn edge(&self, from: &V, to: &V) -> Result<Option<&E>, GraphError> {
        let from = self.code(from)?;
        let to = self.code(to)?;
        Ok(self.weights[from][to].as_ref())
    }

    /// Computes a minimum spanning forest with Prim's algorithm.
    ///
    /// Each component is grown from its lowest-indexed vertex. Candidate edges
    /// leaving the tree are kept in a queue of type `Q`; entries whose destination
    /// has been reached in the meantime are discarded when they surface.
    ///
    /// # Errors
    /// Returns [`GraphError::Queue`] if the queue rejects a candidate edge.
    pub fn minimum_spanning_forest<Q>(&self) -> Result<SpanningForest<V, E>, GraphError>
    where
        E: Ord,
        Q: MergeableQueue<CandidateEdge<E>>,
    {
        let mut visited = vec![false; self.vertices.len()];
        let mut edges = Vec::new();

        for start in 0..self.vertices.len() {
            if visited[start] || self.vertices[start].is_none() {
                continue;
            }
            let mut candidates = Q::new();
            visited[start] = true;
            self.push_candidates(start, &visited, &mut candidates)?;

            while let Some((weight, (from, to))) = candidates.extract_min() {
                if visited[to] {
                    continue;
                }
                visited[to] = true;
                log::debug!("spanning forest accepts edge {from} -> {to}");
                if let (Some(source), Some(target)) = (&self.vertices[from], &self.vertices[to]) {
                    edges.push((source.clone(), target.clone(), weight));
                }
                self.push_candidates(to, &visited, &mut candidates)?;
            }
        }

        Ok(SpanningForest { edges })
    }

    fn push_candidates<Q>(
        &self,
        from: VertexIndex,
        visited: &[bool],
        candidates: &mut Q,
    ) -> Result<(), GraphError>
    where
        E: Ord,
        Q: MergeableQueue<CandidateEdge<E>>,
    {
        for &to in &self.neighbors[from] {
            if visited[to] {
                continue;
            }
            if let Some(weight) = &self.weights[from][to] {
                candidates.insert((weight.clone(), (from, to)))?;
            }
        }
        Ok(())
    }
}

/// Edges of a minimum spanning forest, in the order they were accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest<V, E> {
    edges: Vec<(V, V, E)>,
}

impl<V, E> SpanningForest<V, E> {
    /// Accepted edges as `(from, to, weight)`
    pub fn edges(&self) -> &[(V, V, E)] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of all accepted edge weights
    pub fn total_weight(&self) -> E
    where
        E: Clone + Sum<E>,
    {
        self.edges.iter().map(|(_, _, weight)| weight.clone()).sum()
    }
}

/// Renders the forest as space separated `from:to` pairs
impl<V: fmt::Display, E> fmt::Display for SpanningForest<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (from, to, _)) in self.edges.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{from}:{to}")?;
        }
        Ok(())
    }
}
