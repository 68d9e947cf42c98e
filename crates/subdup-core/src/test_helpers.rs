//! Shared fixtures for unit test modules.
//!
//! Compiled only in test builds. Integration tests under `tests/` link
//! against the non-test library build and define their own local helpers.
#![allow(clippy::expect_used)]

use crate::interner::{BlockFingerprint, Interner, NodeId, Range};

/// Builds a `(hash, range)` fingerprint.
pub fn fingerprint(hash: &str, start: u64, end: u64) -> BlockFingerprint {
    BlockFingerprint {
        hash: hash.to_owned(),
        range: Range { start, end },
    }
}

/// Interns `files` paths (`/f0`, `/f1`, …) and `blocks` distinct
/// fingerprints (consecutive 64-byte ranges) into a throwaway interner and
/// returns the two node-id lists.
///
/// Useful for graph-shape tests that never resolve ids back to names.
pub fn graph_nodes(files: usize, blocks: usize) -> (Vec<NodeId>, Vec<NodeId>) {
    let mut interner = Interner::new();
    let fs = (0..files)
        .map(|i| NodeId::File(interner.intern_file(&format!("/f{i}"))))
        .collect();
    let bs = (0..blocks)
        .map(|i| {
            let start = i as u64 * 64;
            NodeId::Block(interner.intern_block(fingerprint(&format!("{i:02x}"), start, start + 64)))
        })
        .collect();
    (fs, bs)
}
