use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use thiserror::Error;

pub mod bucket;
pub mod builder;
pub mod edge;
pub mod ops;
pub mod viz;

pub use bucket::AdjacencyBucket;
pub use edge::UnweightedEdge;
pub use ops::{DepthFirstWalk, Edges, IncomingEdges, OutgoingEdges};

const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex doesn't belong to graph")]
    VertexNotFound,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Directed, unweighted graph stored as adjacency lists.
///
/// Vertices keep their insertion order, so edge enumeration, the readable
/// dump and the default traversal root are deterministic. Outgoing queries
/// only touch the source bucket; incoming queries scan every bucket.
#[derive(Debug, Clone)]
pub struct DirectedSparseGraph<K> {
    pub(crate) vertices: IndexMap<K, AdjacencyBucket<K>>,
    edges_count: usize,
    first_inserted: Option<K>,
}

impl<K: Eq + Hash + Clone> Default for DirectedSparseGraph<K> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<K: Eq + Hash + Clone> DirectedSparseGraph<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: IndexMap::with_capacity(capacity),
            edges_count: 0,
            first_inserted: None,
        }
    }

    pub fn is_directed(&self) -> bool {
        true
    }

    pub fn is_weighted(&self) -> bool {
        false
    }

    pub fn vertices_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges_count
    }

    pub fn first_inserted_vertex(&self) -> Option<&K> {
        self.first_inserted.as_ref()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &K> + '_ {
        self.vertices.keys()
    }

    pub fn add_vertex(&mut self, vertex: K) -> bool {
        if self.vertices.contains_key(&vertex) {
            return false;
        }
        if self.vertices.is_empty() {
            self.first_inserted = Some(vertex.clone());
        }
        self.vertices.insert(vertex, AdjacencyBucket::new());
        true
    }

    /// Adds every vertex of `collection`, ignoring ones already present.
    /// `None` stands for a missing collection and is rejected.
    pub fn add_vertices<I>(&mut self, collection: Option<I>) -> Result<()>
    where
        I: IntoIterator<Item = K>,
    {
        let collection =
            collection.ok_or(GraphError::InvalidArgument("vertex collection is missing"))?;
        for vertex in collection {
            self.add_vertex(vertex);
        }
        Ok(())
    }

    pub fn remove_vertex(&mut self, vertex: &K) -> bool {
        let Some(own) = self.vertices.shift_remove(vertex) else {
            return false;
        };
        self.edges_count -= own.len();

        for bucket in self.vertices.values_mut() {
            if bucket.remove(vertex) {
                self.edges_count -= 1;
            }
        }

        if self.vertices.is_empty() {
            self.first_inserted = None;
        }
        true
    }

    pub fn add_edge(&mut self, source: &K, destination: &K) -> bool {
        if !self.vertices.contains_key(destination) {
            return false;
        }
        let Some(bucket) = self.vertices.get_mut(source) else {
            return false;
        };
        if bucket.contains(destination) {
            return false;
        }
        bucket.append(destination.clone());
        self.edges_count += 1;
        true
    }

    pub fn remove_edge(&mut self, source: &K, destination: &K) -> bool {
        if !self.vertices.contains_key(destination) {
            return false;
        }
        let Some(bucket) = self.vertices.get_mut(source) else {
            return false;
        };
        if !bucket.remove(destination) {
            return false;
        }
        self.edges_count -= 1;
        true
    }

    pub fn has_vertex(&self, vertex: &K) -> bool {
        self.vertices.contains_key(vertex)
    }

    pub fn has_edge(&self, source: &K, destination: &K) -> bool {
        self.vertices.contains_key(destination)
            && self
                .vertices
                .get(source)
                .is_some_and(|bucket| bucket.contains(destination))
    }

    /// Live neighbour list of `vertex`, or `None` when it is not in the graph.
    pub fn neighbours(&self, vertex: &K) -> Option<&AdjacencyBucket<K>> {
        self.vertices.get(vertex)
    }

    /// Out-degree of `vertex`.
    pub fn degree(&self, vertex: &K) -> Result<usize> {
        self.vertices
            .get(vertex)
            .map(AdjacencyBucket::len)
            .ok_or(GraphError::VertexNotFound)
    }

    pub fn edges(&self) -> Edges<'_, K> {
        Edges::new(self)
    }

    pub fn outgoing_edges(&self, vertex: &K) -> Result<OutgoingEdges<'_, K>> {
        let (source, bucket) = self
            .vertices
            .get_key_value(vertex)
            .ok_or(GraphError::VertexNotFound)?;
        Ok(OutgoingEdges::new(source, bucket))
    }

    /// Edges ending at `vertex`. Scans every neighbour list, so the cost is
    /// O(V + E) rather than O(in-degree).
    pub fn incoming_edges(&self, vertex: &K) -> Result<IncomingEdges<'_, K>> {
        let (target, _) = self
            .vertices
            .get_key_value(vertex)
            .ok_or(GraphError::VertexNotFound)?;
        Ok(IncomingEdges::new(self, target))
    }

    /// Depth-first walk from the first vertex inserted into the graph.
    pub fn depth_first_walk(&self) -> Result<DepthFirstWalk<'_, K>> {
        match self.first_inserted.as_ref() {
            Some(source) => self.depth_first_walk_from(source),
            None => Ok(DepthFirstWalk::empty(self)),
        }
    }

    /// Depth-first walk from `source`. An empty graph yields nothing; a
    /// missing source in a non-empty graph is an error.
    pub fn depth_first_walk_from(&self, source: &K) -> Result<DepthFirstWalk<'_, K>> {
        if self.vertices.is_empty() {
            return Ok(DepthFirstWalk::empty(self));
        }
        let (source, _) = self
            .vertices
            .get_key_value(source)
            .ok_or(GraphError::VertexNotFound)?;
        Ok(DepthFirstWalk::new(self, source))
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges_count = 0;
        self.first_inserted = None;
    }
}

impl<K: Eq + Hash + Clone + fmt::Display> DirectedSparseGraph<K> {
    pub fn to_readable(&self) -> String {
        viz::render_readable(self)
    }
}
