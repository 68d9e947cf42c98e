//! The bipartite file↔block graph, built on `petgraph`.
//!
//! One partition holds file nodes, the other block nodes; every edge joins
//! one of each kind. The graph is undirected and simple: inserting the same
//! file↔block link twice is idempotent. Node insertion order is preserved
//! and every derived artifact (components, subgraphs, traversals) is
//! enumerated from it, which is what makes the whole analysis reproducible
//! byte for byte.
//!
//! The root graph built from the pruned vector set is never mutated by later
//! stages; the conflict resolver works on fresh induced subgraphs (see
//! [`components`]) and removes edges only from its own working copies.
pub mod components;
pub mod paths;

pub use components::{connected_components, induced_subgraph};
pub use paths::{path_edges, shortest_path};

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

use crate::interner::NodeId;
use crate::vectors::Vector;

/// Undirected bipartite graph over [`NodeId`] nodes.
///
/// Wraps a `petgraph` [`StableUnGraph`] and maintains a `NodeId → NodeIndex`
/// map for O(1) lookup. Indices stay valid across edge removal because the
/// stable graph tombstones rather than compacting.
#[derive(Debug, Default)]
pub struct DedupeGraph {
    graph: StableUnGraph<NodeId, ()>,
    index: HashMap<NodeId, NodeIndex>,
}

impl DedupeGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if `id` is a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Inserts `id` if absent and returns its index.
    pub fn ensure_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.index.insert(id, idx);
        idx
    }

    /// Inserts the undirected edge `a`–`b`, creating either endpoint as
    /// needed. Re-inserting an existing edge leaves the graph unchanged.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        let ia = self.ensure_node(a);
        let ib = self.ensure_node(b);
        self.graph.update_edge(ia, ib, ());
    }

    /// Removes the undirected edge `a`–`b` if present; returns whether an
    /// edge was removed.
    pub fn remove_link(&mut self, a: NodeId, b: NodeId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.index.get(&a), self.index.get(&b)) else {
            return false;
        };
        match self.graph.find_edge(ia, ib) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    /// All node ids in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).copied())
            .collect()
    }

    /// Neighbours of `id`, in the underlying adjacency order (deterministic
    /// for a given construction history). Empty for an unknown id.
    pub fn neighbours(&self, id: NodeId) -> Vec<NodeId> {
        let Some(&idx) = self.index.get(&id) else {
            return Vec::new();
        };
        self.graph
            .neighbors(idx)
            .filter_map(|n| self.graph.node_weight(n).copied())
            .collect()
    }

    /// Degree of `id` (0 for an unknown id).
    pub fn degree(&self, id: NodeId) -> usize {
        match self.index.get(&id) {
            Some(&idx) => self.graph.neighbors(idx).count(),
            None => 0,
        }
    }

    /// All edges as `(NodeId, NodeId)` endpoint pairs, in edge insertion
    /// order.
    pub fn links(&self) -> Vec<(NodeId, NodeId)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                Some((
                    self.graph.node_weight(a).copied()?,
                    self.graph.node_weight(b).copied()?,
                ))
            })
            .collect()
    }
}

/// Builds the root bipartite graph from the pruned vector set.
///
/// Every vector contributes its file node plus one edge per block id. Blocks
/// shared between files resolve to the same node, which is what links files
/// into common components.
pub fn build_graph(vectors: &[Vector]) -> DedupeGraph {
    let mut graph = DedupeGraph::new();
    for vector in vectors {
        let file = NodeId::File(vector.file);
        graph.ensure_node(file);
        for &block in &vector.blocks {
            graph.add_link(file, NodeId::Block(block));
        }
    }
    graph
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::test_helpers::graph_nodes;

    #[test]
    fn add_link_is_idempotent() {
        let (fs, bs) = graph_nodes(1, 1);
        let mut g = DedupeGraph::new();
        g.add_link(fs[0], bs[0]);
        g.add_link(fs[0], bs[0]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn build_graph_links_shared_blocks_across_files() {
        let (fs, bs) = graph_nodes(2, 2);
        let vectors = vec![
            Vector {
                file: fs[0].as_file().expect("file"),
                blocks: vec![
                    bs[0].as_block().expect("block"),
                    bs[1].as_block().expect("block"),
                ],
            },
            Vector {
                file: fs[1].as_file().expect("file"),
                blocks: vec![bs[0].as_block().expect("block")],
            },
        ];
        let g = build_graph(&vectors);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(bs[0]), 2);
        assert_eq!(g.degree(bs[1]), 1);
    }

    #[test]
    fn remove_link_only_touches_the_named_edge() {
        let (fs, bs) = graph_nodes(2, 1);
        let mut g = DedupeGraph::new();
        g.add_link(fs[0], bs[0]);
        g.add_link(fs[1], bs[0]);
        assert!(g.remove_link(fs[0], bs[0]));
        assert!(!g.remove_link(fs[0], bs[0]));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(bs[0]), 1);
        // Nodes survive edge removal.
        assert!(g.contains(fs[0]));
    }

    #[test]
    fn node_ids_preserve_insertion_order() {
        let (fs, bs) = graph_nodes(2, 2);
        let mut g = DedupeGraph::new();
        g.add_link(fs[1], bs[1]);
        g.add_link(fs[0], bs[0]);
        assert_eq!(g.node_ids(), vec![fs[1], bs[1], fs[0], bs[0]]);
    }

    #[test]
    fn unknown_ids_have_no_adjacency() {
        let (fs, _) = graph_nodes(1, 0);
        let g = DedupeGraph::new();
        assert_eq!(g.degree(fs[0]), 0);
        assert!(g.neighbours(fs[0]).is_empty());
        assert!(!g.contains(fs[0]));
    }
}
