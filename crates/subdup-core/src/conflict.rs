//! Range-conflict detection and cut-edge selection.
//!
//! Two distinct block fingerprints that claim the same byte range cannot be
//! backed by one common parent block list; such blocks are *conflicting* and
//! must end up in different subgroups. This module holds the pure pieces of
//! that analysis: partitioning a component's blocks by range key, and
//! choosing which edge of a working graph to cut when the component refuses
//! to fall apart on its own.
use std::collections::BTreeSet;

use crate::graph::paths::EdgeKey;
use crate::interner::{NodeId, Range};

/// Result of grouping a component's block nodes by range key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangePartition {
    /// Blocks whose range is unique within the component, in first-sighting
    /// order. These cannot distinguish subgroups.
    pub compatible: Vec<NodeId>,
    /// All members of every contested range, in first-sighting order.
    pub conflicting: Vec<NodeId>,
    /// The contested ranges with their claimants (each list has length ≥2),
    /// ordered by the range's first sighting.
    pub conflicts: Vec<(Range, Vec<NodeId>)>,
}

impl RangePartition {
    /// Returns `true` when no range is contested.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Groups blocks by range key and splits them into compatible and
/// conflicting sets.
///
/// `blocks` pairs each block node with its range, in the component's block
/// order; that order fixes the order of `conflicts`, which downstream makes
/// the cut-edge choice deterministic.
pub fn partition_by_range(blocks: &[(NodeId, Range)]) -> RangePartition {
    // First-sighting-ordered grouping; component block lists are small.
    let mut groups: Vec<(Range, Vec<NodeId>)> = Vec::new();
    for &(node, range) in blocks {
        match groups.iter_mut().find(|(r, _)| *r == range) {
            Some((_, members)) => members.push(node),
            None => groups.push((range, vec![node])),
        }
    }

    let mut partition = RangePartition::default();
    for (range, members) in groups {
        if members.len() == 1 {
            partition.compatible.push(members[0]);
        } else {
            partition.conflicting.extend(members.iter().copied());
            partition.conflicts.push((range, members));
        }
    }
    partition
}

/// Picks the edge to cut from a list of conflict-path edge sets.
///
/// With two or more paths, consecutive pairs are intersected and the first
/// edge of the first non-empty intersection wins: an approximation of "an
/// edge lying on multiple conflict paths", not a full hitting set. A single
/// path has no consecutive pair to intersect; its own first edge is the
/// candidate. Returns `None` when no candidate exists (all intersections
/// empty, or no paths at all).
pub fn pick_cut_edge(paths: &[BTreeSet<EdgeKey>]) -> Option<EdgeKey> {
    match paths {
        [] => None,
        [only] => only.iter().next().copied(),
        _ => {
            for pair in paths.windows(2) {
                if let Some(&edge) = pair[0].intersection(&pair[1]).next() {
                    return Some(edge);
                }
            }
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
