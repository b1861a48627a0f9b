// src/dag/graph.rs

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// Returned by [`DirectedGraph::ordered`] when the graph contains a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDetected;

/// Directed graph keyed by node identity, preserving insertion order.
///
/// Nodes are assigned indices in the order they are first seen, whether they
/// arrive as a node or as a predecessor of some other node. [`ordered`]
/// breaks ties between independent nodes toward the earliest-inserted one,
/// so a given insertion sequence always yields the same ordering and build
/// logs stay reproducible.
///
/// [`ordered`]: DirectedGraph::ordered
#[derive(Debug)]
pub struct DirectedGraph<N> {
    graph: DiGraph<N, ()>,
    indices: HashMap<N, NodeIndex>,
}

impl<N: Clone + Eq + Hash> DirectedGraph<N> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    /// Add `node` if absent and record that every element of `predecessors`
    /// must appear before it in any ordering.
    ///
    /// Calling `insert` again for the same node unions the predecessor sets.
    /// Predecessors not seen before are added implicitly.
    pub fn insert<I>(&mut self, node: N, predecessors: I)
    where
        I: IntoIterator<Item = N>,
    {
        let node_index = self.index_of(node);
        for predecessor in predecessors {
            let predecessor_index = self.index_of(predecessor);
            self.graph.update_edge(predecessor_index, node_index, ());
        }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Topological order: every predecessor precedes its dependents.
    ///
    /// Kahn's algorithm with the ready set kept sorted by node index. Fails
    /// only when the graph contains a cycle.
    pub fn ordered(&self) -> Result<Vec<N>, CycleDetected> {
        let node_count = self.graph.node_count();

        let mut indegree = vec![0usize; node_count];
        for index in self.graph.node_indices() {
            indegree[index.index()] = self
                .graph
                .edges_directed(index, Direction::Incoming)
                .count();
        }

        let mut ready: BTreeSet<usize> = indegree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(index, _)| index)
            .collect();

        let mut order = Vec::with_capacity(node_count);
        while let Some(index) = ready.pop_first() {
            let node_index = NodeIndex::new(index);
            order.push(self.graph[node_index].clone());

            for successor in self
                .graph
                .neighbors_directed(node_index, Direction::Outgoing)
            {
                indegree[successor.index()] -= 1;
                if indegree[successor.index()] == 0 {
                    ready.insert(successor.index());
                }
            }
        }

        if order.len() != node_count {
            return Err(CycleDetected);
        }
        Ok(order)
    }

    fn index_of(&mut self, node: N) -> NodeIndex {
        if let Some(index) = self.indices.get(&node) {
            return *index;
        }
        let index = self.graph.add_node(node.clone());
        self.indices.insert(node, index);
        index
    }
}

impl<N: Clone + Eq + Hash> Default for DirectedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}
