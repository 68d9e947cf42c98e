//! Dedupe-group discovery: partitioning, conflict resolution, and savings.
//!
//! A connected component of the bipartite graph is a *candidate* dedupe
//! group: a set of files whose shared blocks could be backed by one common
//! parent block list. The candidate stands only if no byte range is claimed
//! by two distinct blocks within it. When ranges collide the component is
//! split along a weakest edge on a path between the colliding blocks,
//! repeatedly, until every partition is range-consistent; the partitions
//! become subgroups.
//!
//! # Splitting
//!
//! The working graph for a conflicted group is induced on its files plus the
//! conflicting blocks only. Compatible blocks are left out: they cannot tell
//! subgroups apart and tend to keep the graph over-connected. While the
//! working graph holds together as one component, a BFS shortest path is
//! computed per conflict pair, consecutive paths are intersected, and the
//! first shared edge is cut (see [`crate::conflict::pick_cut_edge`]). The
//! resulting partitions recurse through the same machinery.
//!
//! # Savings
//!
//! A block with k incident files in the group's subgraph saves k−1 copies.
//! Group savings are that sum over the group's blocks plus the already
//! accounted savings of its subgroups.
use std::collections::BTreeSet;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::conflict::{partition_by_range, pick_cut_edge};
use crate::graph::paths::path_edges;
use crate::graph::{DedupeGraph, connected_components, induced_subgraph, shortest_path};
use crate::interner::{Interner, NodeId, Range};

// ---------------------------------------------------------------------------
// AnalysisError
// ---------------------------------------------------------------------------

/// Errors surfaced by the group analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The conflict resolver found no common edge to cut while the working
    /// graph was still a single component.
    ///
    /// Indicates a pathological input or the limits of the consecutive-path
    /// heuristic; the group name identifies the component for diagnosis.
    NoSeparatingEdge {
        /// Name of the group that could not be split.
        group: String,
    },
    /// A graph node had no entry in the interner, an internal invariant
    /// violation: all nodes are minted from interned ids.
    UnknownId {
        /// The node that failed to resolve.
        node: NodeId,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NoSeparatingEdge { group } => {
                write!(f, "no separating edge found while splitting group {group}")
            }
            AnalysisError::UnknownId { node } => {
                write!(f, "graph node {node} has no interned entry")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

// ---------------------------------------------------------------------------
// DedupeGroup
// ---------------------------------------------------------------------------

/// One proposed dedupe group, id-based.
///
/// `selected_files` and `selected_csums` are the members first realized at
/// this level, i.e. not claimed by any subgroup. Conversion to paths and
/// fingerprints happens in [`crate::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeGroup {
    /// Stable, content-derived identifier in UUID format.
    pub name: String,
    /// File nodes of this group.
    pub files: Vec<NodeId>,
    /// Block nodes of this group.
    pub csums: Vec<NodeId>,
    /// Conflict-driven child groups; empty for a conflict-free group.
    pub subgroups: Vec<DedupeGroup>,
    /// Files not claimed by any subgroup.
    pub selected_files: Vec<NodeId>,
    /// Blocks not claimed by any subgroup.
    pub selected_csums: Vec<NodeId>,
    /// Redundant block copies eliminable by realizing this group, subgroups
    /// included.
    pub savings: u64,
}

// ---------------------------------------------------------------------------
// Analysis entry point
// ---------------------------------------------------------------------------

/// Discovers all dedupe groups in the root graph.
///
/// Enumerates connected components, keeps those with at least two file nodes
/// (the singleton filter applies only at this top level), and resolves each
/// into a conflict-free group tree.
///
/// # Errors
///
/// - [`AnalysisError::NoSeparatingEdge`] if a conflicted component cannot be
///   split by the edge-cut heuristic.
/// - [`AnalysisError::UnknownId`] if a graph node is missing from the
///   interner.
pub fn analyze(graph: &DedupeGraph, interner: &Interner) -> Result<Vec<DedupeGroup>, AnalysisError> {
    let partitions = connected_components(graph);
    process_partitions(graph, partitions, interner, true)
}

/// Wraps each partition as a group and resolves it.
///
/// `singleton_filter` discards partitions with fewer than two file nodes;
/// recursive calls from the splitter pass `false` so that every partition of
/// a split survives, file counts notwithstanding.
fn process_partitions(
    graph: &DedupeGraph,
    partitions: Vec<Vec<NodeId>>,
    interner: &Interner,
    singleton_filter: bool,
) -> Result<Vec<DedupeGroup>, AnalysisError> {
    let mut groups = Vec::new();
    for part in partitions {
        let files: Vec<NodeId> = part.iter().copied().filter(|n| n.is_file()).collect();
        if files.len() < 2 && singleton_filter {
            continue;
        }
        let csums: Vec<NodeId> = part.iter().copied().filter(|n| n.is_block()).collect();

        let members: BTreeSet<NodeId> = part.iter().copied().collect();
        let subgraph = induced_subgraph(graph, &members);
        let group = DedupeGroup {
            name: group_name(&members),
            files,
            csums,
            subgroups: Vec::new(),
            selected_files: Vec::new(),
            selected_csums: Vec::new(),
            savings: 0,
        };
        groups.push(resolve_group(&subgraph, group, interner)?);
    }
    Ok(groups)
}

/// Resolves one candidate group: splits it while its ranges conflict, then
/// fills in the selected sets and savings.
fn resolve_group(
    subgraph: &DedupeGraph,
    mut group: DedupeGroup,
    interner: &Interner,
) -> Result<DedupeGroup, AnalysisError> {
    let ranged = lookup_ranges(&group.csums, interner)?;
    let partition = partition_by_range(&ranged);

    if !partition.is_conflict_free() {
        let keep: BTreeSet<NodeId> = group
            .files
            .iter()
            .chain(partition.conflicting.iter())
            .copied()
            .collect();
        let mut working = induced_subgraph(subgraph, &keep);
        let mut parts = connected_components(&working);

        while parts.len() == 1 {
            // One shortest path per conflict pair, in range-sighting order.
            let mut paths = Vec::new();
            for (_, claimants) in &partition.conflicts {
                for (i, &a) in claimants.iter().enumerate() {
                    for &b in &claimants[i + 1..] {
                        if let Some(path) = shortest_path(&working, a, b) {
                            paths.push(path_edges(&path));
                        }
                    }
                }
            }

            let Some((a, b)) = pick_cut_edge(&paths) else {
                return Err(AnalysisError::NoSeparatingEdge { group: group.name });
            };
            working.remove_link(a, b);
            parts = connected_components(&working);
        }

        group.subgroups = process_partitions(&working, parts, interner, false)?;
    }

    // Roll up subgroup claims, then account this level's savings.
    let mut claimed_files: BTreeSet<NodeId> = BTreeSet::new();
    let mut claimed_csums: BTreeSet<NodeId> = BTreeSet::new();
    let mut tally: u64 = 0;
    for sub in &group.subgroups {
        claimed_files.extend(sub.files.iter().copied());
        claimed_csums.extend(sub.csums.iter().copied());
        tally += sub.savings;
    }
    group.selected_files = group
        .files
        .iter()
        .copied()
        .filter(|f| !claimed_files.contains(f))
        .collect();
    group.selected_csums = group
        .csums
        .iter()
        .copied()
        .filter(|c| !claimed_csums.contains(c))
        .collect();
    for &csum in &group.csums {
        tally += subgraph.degree(csum).saturating_sub(1) as u64;
    }
    group.savings = tally;

    // TODO: promote each subgroup's highest-saving block into the parent's
    // selected_csums so a preferred parent block list can be reported.
    Ok(group)
}

/// Pairs each block node with its range key.
fn lookup_ranges(
    csums: &[NodeId],
    interner: &Interner,
) -> Result<Vec<(NodeId, Range)>, AnalysisError> {
    csums
        .iter()
        .map(|&node| {
            let range = node
                .as_block()
                .and_then(|b| interner.range(b))
                .ok_or(AnalysisError::UnknownId { node })?;
            Ok((node, range))
        })
        .collect()
}

/// Derives the group's name from its member set.
///
/// SHA-256 over the sorted member ids, truncated to 128 bits and rendered in
/// UUID format. No two groups of one analysis share a member set, and the
/// same input corpus always reproduces the same names.
fn group_name(members: &BTreeSet<NodeId>) -> String {
    let mut hasher = Sha256::new();
    for id in members {
        hasher.update(id.to_string().as_bytes());
        hasher.update(b"\n");
    }
    let digest = hasher.finalize();
    let hex = hex_encode(&digest[..16]);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

/// Encodes a byte slice as a lowercase hexadecimal string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_CHARS[(b >> 4) as usize] as char);
        out.push(HEX_CHARS[(b & 0x0f) as usize] as char);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
