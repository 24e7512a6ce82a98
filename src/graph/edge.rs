use std::fmt;

use crate::graph::{GraphError, Result};

/// Directed edge without a weight. Equal when both endpoints are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnweightedEdge<K> {
    source: K,
    destination: K,
}

impl<K> UnweightedEdge<K> {
    pub fn new(source: K, destination: K) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn source(&self) -> &K {
        &self.source
    }

    pub fn destination(&self) -> &K {
        &self.destination
    }

    pub fn is_weighted(&self) -> bool {
        false
    }

    pub fn weight(&self) -> Result<i64> {
        Err(GraphError::UnsupportedOperation(
            "unweighted edges don't have weights",
        ))
    }

    pub fn set_weight(&mut self, _weight: i64) -> Result<()> {
        Err(GraphError::UnsupportedOperation(
            "unweighted edges can't have weights",
        ))
    }

    pub fn into_parts(self) -> (K, K) {
        (self.source, self.destination)
    }
}

impl<K: fmt::Display> fmt::Display for UnweightedEdge<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}
