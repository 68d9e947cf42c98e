//! BFS shortest paths and their unordered-edge representation.
//!
//! The conflict resolver compares paths by edge set, so alongside the BFS
//! itself this module defines the canonical encoding of an undirected edge:
//! the lexicographically ordered `(NodeId, NodeId)` pair.
use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::graph::DedupeGraph;
use crate::interner::NodeId;

/// An undirected edge as its ordered endpoint pair (smaller id first).
pub type EdgeKey = (NodeId, NodeId);

/// Canonicalizes an undirected edge to its [`EdgeKey`].
pub fn edge_key(a: NodeId, b: NodeId) -> EdgeKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// Returns a shortest path from `from` to `to` as a node sequence, both
/// endpoints included, or `None` when the two are not connected (or either
/// id is not in the graph).
///
/// Plain BFS with predecessor tracking; ties between equal-length paths are
/// broken by the graph's adjacency order, which is deterministic for a given
/// construction history.
pub fn shortest_path(graph: &DedupeGraph, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    if !graph.contains(from) || !graph.contains(to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut predecessor: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    predecessor.insert(from, from);
    queue.push_back(from);

    'bfs: while let Some(current) = queue.pop_front() {
        for neighbour in graph.neighbours(current) {
            if !predecessor.contains_key(&neighbour) {
                predecessor.insert(neighbour, current);
                if neighbour == to {
                    break 'bfs;
                }
                queue.push_back(neighbour);
            }
        }
    }

    if !predecessor.contains_key(&to) {
        return None;
    }

    // Walk predecessors back from the target, then reverse.
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        let &prev = predecessor.get(&current)?;
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Some(path)
}

/// Converts a node path into its set of canonical edges.
///
/// A path of n nodes yields n−1 edges; a single-node path yields none.
pub fn path_edges(path: &[NodeId]) -> BTreeSet<EdgeKey> {
    path.windows(2)
        .map(|pair| edge_key(pair[0], pair[1]))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
