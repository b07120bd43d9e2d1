use std::hash::Hash;
use std::ops::ControlFlow;

use crate::astar::FxIndexMap;

/// Walks the parent links back from the node at index `end` until it reaches a node whose parent
/// index is not in the map (the start), then reverses the result so it runs start to end.
pub(crate) fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, end: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = end;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// A path found by the search, ordered from start to end, together with its total cost.
/// The cost counts every cell entered after the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<N, C> {
    nodes: Vec<N>,
    cost: C,
}

impl<N, C: Copy> Path<N, C> {
    pub(crate) fn new(nodes: Vec<N>, cost: C) -> Path<N, C> {
        Path { nodes, cost }
    }
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
    pub fn cost(&self) -> C {
        self.cost
    }
    /// Number of nodes, start and end included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }
    pub fn end(&self) -> Option<&N> {
        self.nodes.last()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    /// Hands the path to `step` one node at a time, start first, together with the index of the
    /// step. Returns the number of steps replayed, which is smaller than [len](Self::len) if
    /// `step` broke off early. Pacing is up to the callback.
    pub fn replay<F>(&self, mut step: F) -> usize
    where
        F: FnMut(usize, &N) -> ControlFlow<()>,
    {
        for (i, node) in self.nodes.iter().enumerate() {
            if step(i, node).is_break() {
                return i + 1;
            }
        }
        self.nodes.len()
    }
}

impl<'a, N, C> IntoIterator for &'a Path<N, C> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
