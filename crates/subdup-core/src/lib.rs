#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Core library for whole-file and sub-file deduplication analysis.
//!
//! Consumes two pre-computed checksum listings (whole-file and fixed-offset
//! block) and produces the sets of byte-identical files plus proposed
//! *dedupe groups*: sets of distinct files sharing enough range-compatible
//! blocks that one common parent block list could back all of them.
//!
//! The pipeline is strictly sequential; each stage hands an immutable
//! artifact to the next:
//!
//! 1. [`duplicates`] — whole-file duplicate groups and the secondary index;
//! 2. [`vectors`] — per-file block-id vectors, pruned of unshared blocks;
//! 3. [`graph`] — the bipartite file↔block graph;
//! 4. [`groups`] — connected components, conflict-driven splitting, savings;
//! 5. [`report`] — ids resolved back to paths and fingerprints.
//!
//! The same input always yields byte-identical output: ids are assigned in
//! first-sight order, graph enumeration follows insertion order, and group
//! names are content-derived.

pub mod conflict;
pub mod duplicates;
pub mod graph;
pub mod groups;
pub mod interner;
pub mod listing;
pub mod report;
#[cfg(test)]
pub(crate) mod test_helpers;
pub mod union_find;
pub mod vectors;

pub use conflict::{RangePartition, partition_by_range, pick_cut_edge};
pub use duplicates::{DuplicateIndex, duplicate_groups};
pub use graph::{
    DedupeGraph, build_graph, connected_components, induced_subgraph, path_edges, shortest_path,
};
pub use groups::{AnalysisError, DedupeGroup, analyze};
pub use interner::{BlockFingerprint, BlockId, FileId, Interner, NodeId, Range};
pub use listing::{BlockEntry, ParseError, WholeEntry, parse_block_entry, parse_whole_entry};
pub use report::{ResolvedGroup, resolve_groups};
pub use union_find::UnionFind;
pub use vectors::{DEFAULT_MIN_BLOCKS, Vector, build_vectors, prune_vectors};

/// Returns the current version of the subdup-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
