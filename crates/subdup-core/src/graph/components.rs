//! Connected components and subgraph induction.
//!
//! Components are enumerated with a union-find keyed on node insertion
//! order, so both the component order and the member order within each
//! component are stable for a given construction history. Subgraph induction
//! builds a fresh [`DedupeGraph`] rather than mutating the source.
use std::collections::{BTreeSet, HashMap};

use crate::graph::DedupeGraph;
use crate::interner::NodeId;
use crate::union_find::UnionFind;

/// Enumerates the connected components of `graph`.
///
/// Each component is the list of its node ids in the graph's insertion
/// order; components are ordered by their earliest-inserted member.
/// Isolated nodes form singleton components.
pub fn connected_components(graph: &DedupeGraph) -> Vec<Vec<NodeId>> {
    let nodes = graph.node_ids();
    let ordinal: HashMap<NodeId, usize> = nodes
        .iter()
        .copied()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();

    let mut sets = UnionFind::new(nodes.len());
    for (a, b) in graph.links() {
        if let (Some(&ia), Some(&ib)) = (ordinal.get(&a), ordinal.get(&b)) {
            sets.union(ia, ib);
        }
    }

    sets.into_groups()
        .into_iter()
        .map(|group| group.into_iter().map(|i| nodes[i]).collect())
        .collect()
}

/// Builds the subgraph of `graph` induced on `keep`.
///
/// The result contains exactly the kept nodes (ids in `keep` that are not in
/// `graph` are ignored) and every edge of `graph` whose two endpoints are
/// both kept. Node insertion order follows the source graph, so derived
/// component enumeration stays deterministic.
pub fn induced_subgraph(graph: &DedupeGraph, keep: &BTreeSet<NodeId>) -> DedupeGraph {
    let mut sub = DedupeGraph::new();
    for id in graph.node_ids() {
        if keep.contains(&id) {
            sub.ensure_node(id);
        }
    }
    for (a, b) in graph.links() {
        if keep.contains(&a) && keep.contains(&b) {
            sub.add_link(a, b);
        }
    }
    sub
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
