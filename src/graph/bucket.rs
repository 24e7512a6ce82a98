/// Ordered neighbour list for a single vertex.
///
/// Appends keep insertion order; removal keeps the relative order of the
/// remaining entries. Membership is a linear scan, which is what makes
/// incoming-edge queries on the graph proportional to the total edge count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyBucket<K> {
    items: Vec<K>,
}

impl<K> Default for AdjacencyBucket<K> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K> AdjacencyBucket<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, item: K) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.items.iter()
    }
}

impl<K: PartialEq> AdjacencyBucket<K> {
    /// Removes the first entry equal to `item`. Returns whether one was found.
    pub fn remove(&mut self, item: &K) -> bool {
        match self.items.iter().position(|existing| existing == item) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &K) -> bool {
        self.items.iter().any(|existing| existing == item)
    }
}

impl<'a, K> IntoIterator for &'a AdjacencyBucket<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
