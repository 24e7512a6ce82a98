use std::collections::HashSet;
use std::hash::Hash;
use std::slice;

use indexmap::map;

use crate::graph::{AdjacencyBucket, DirectedSparseGraph, UnweightedEdge};

/// Every edge of the graph, grouped by source in vertex insertion order.
pub struct Edges<'a, K> {
    vertices: map::Iter<'a, K, AdjacencyBucket<K>>,
    current: Option<(&'a K, slice::Iter<'a, K>)>,
}

impl<'a, K> Edges<'a, K> {
    pub(crate) fn new(graph: &'a DirectedSparseGraph<K>) -> Self {
        Self {
            vertices: graph.vertices.iter(),
            current: None,
        }
    }
}

impl<'a, K> Iterator for Edges<'a, K> {
    type Item = UnweightedEdge<&'a K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((source, neighbours)) = self.current.as_mut() {
                if let Some(destination) = neighbours.next() {
                    return Some(UnweightedEdge::new(*source, destination));
                }
            }
            let (source, bucket) = self.vertices.next()?;
            self.current = Some((source, bucket.iter()));
        }
    }
}

pub struct OutgoingEdges<'a, K> {
    source: &'a K,
    neighbours: slice::Iter<'a, K>,
}

impl<'a, K> OutgoingEdges<'a, K> {
    pub(crate) fn new(source: &'a K, bucket: &'a AdjacencyBucket<K>) -> Self {
        Self {
            source,
            neighbours: bucket.iter(),
        }
    }
}

impl<'a, K> Iterator for OutgoingEdges<'a, K> {
    type Item = UnweightedEdge<&'a K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.neighbours
            .next()
            .map(|destination| UnweightedEdge::new(self.source, destination))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.neighbours.size_hint()
    }
}

pub struct IncomingEdges<'a, K> {
    target: &'a K,
    vertices: map::Iter<'a, K, AdjacencyBucket<K>>,
}

impl<'a, K> IncomingEdges<'a, K> {
    pub(crate) fn new(graph: &'a DirectedSparseGraph<K>, target: &'a K) -> Self {
        Self {
            target,
            vertices: graph.vertices.iter(),
        }
    }
}

impl<'a, K: PartialEq> Iterator for IncomingEdges<'a, K> {
    type Item = UnweightedEdge<&'a K>;

    fn next(&mut self) -> Option<Self::Item> {
        let target = self.target;
        self.vertices
            .by_ref()
            .find(|(_, bucket)| bucket.contains(target))
            .map(|(source, _)| UnweightedEdge::new(source, target))
    }
}

/// Stack-based depth-first walk.
///
/// Neighbours are pushed in list order and popped in reverse, so the last
/// neighbour of a vertex is visited first. A vertex may sit on the stack more
/// than once; the visited set drops the repeats when they are popped.
pub struct DepthFirstWalk<'a, K> {
    graph: &'a DirectedSparseGraph<K>,
    stack: Vec<&'a K>,
    visited: HashSet<&'a K>,
}

impl<'a, K> DepthFirstWalk<'a, K> {
    pub(crate) fn empty(graph: &'a DirectedSparseGraph<K>) -> Self {
        Self {
            graph,
            stack: Vec::new(),
            visited: HashSet::new(),
        }
    }

    pub(crate) fn new(graph: &'a DirectedSparseGraph<K>, source: &'a K) -> Self {
        Self {
            graph,
            stack: vec![source],
            visited: HashSet::with_capacity(graph.vertices.len()),
        }
    }
}

impl<'a, K: Eq + Hash> Iterator for DepthFirstWalk<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current) {
                continue;
            }
            if let Some(bucket) = graph.vertices.get(current) {
                for adjacent in bucket {
                    if !self.visited.contains(adjacent) {
                        self.stack.push(adjacent);
                    }
                }
            }
            return Some(current);
        }
        None
    }
}
