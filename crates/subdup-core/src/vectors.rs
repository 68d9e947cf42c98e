//! Vector construction: digesting the block listing into per-file block-id
//! lists, then pruning unshared blocks.
//!
//! The block listing is grouped by path, so a change of path marks a file
//! boundary. At each boundary the pending file is either emitted as a
//! [`Vector`] or dropped outright: secondaries of the whole-file pass are
//! already covered by whole-file dedupe, and a file with fewer than two
//! block records cannot share sub-file structure worth tracking.
//!
//! Skipped files intern nothing, so block counts reflect only files that
//! made it into the vector set.
use serde::Serialize;

use crate::duplicates::DuplicateIndex;
use crate::interner::{BlockFingerprint, BlockId, FileId, Interner};
use crate::listing::{ParseError, parse_block_entry};

/// Default for the minimum number of retained shared blocks a vector needs
/// to survive pruning.
pub const DEFAULT_MIN_BLOCKS: usize = 2;

/// One file's interned block list, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vector {
    /// The file the blocks belong to.
    pub file: FileId,
    /// Block ids in the order the listing reported them.
    pub blocks: Vec<BlockId>,
}

/// Folds the block listing into one [`Vector`] per eligible file, interning
/// paths and fingerprints as it goes.
///
/// A file is dropped at its boundary when its path is the empty sentinel,
/// when it is a secondary duplicate, or when fewer than 2 block records were
/// collected for it.
///
/// # Errors
///
/// Returns [`ParseError::MalformedLine`] on the first line that does not
/// match the block listing format; nothing is emitted in that case.
pub fn build_vectors(
    input: &str,
    duplicates: &DuplicateIndex,
    interner: &mut Interner,
) -> Result<Vec<Vector>, ParseError> {
    let mut vectors: Vec<Vector> = Vec::new();
    let mut last_path = String::new();
    let mut pending: Vec<BlockFingerprint> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let entry = parse_block_entry(line, idx + 1)?;
        if entry.path != last_path {
            flush_file(&last_path, &mut pending, duplicates, interner, &mut vectors);
            last_path = entry.path;
        }
        pending.push(entry.fingerprint);
    }
    flush_file(&last_path, &mut pending, duplicates, interner, &mut vectors);

    Ok(vectors)
}

/// Emits the pending file as a vector if it is eligible, clearing the
/// pending buffer either way.
fn flush_file(
    path: &str,
    pending: &mut Vec<BlockFingerprint>,
    duplicates: &DuplicateIndex,
    interner: &mut Interner,
    out: &mut Vec<Vector>,
) {
    let fingerprints = std::mem::take(pending);
    if path.is_empty() {
        return;
    }
    if duplicates.is_secondary(path) {
        return;
    }
    if fingerprints.len() < 2 {
        return;
    }

    let file = interner.intern_file(path);
    let blocks = fingerprints
        .into_iter()
        .map(|fp| interner.intern_block(fp))
        .collect();
    out.push(Vector { file, blocks });
}

/// Second pass over the vector set: keep only shared blocks, then only
/// vectors that retain at least `min_blocks` of them.
///
/// A block is shared when its interned count is greater than 1. Raising
/// `min_blocks` can only shrink the result, never grow it.
pub fn prune_vectors(vectors: &[Vector], interner: &Interner, min_blocks: usize) -> Vec<Vector> {
    let mut result = Vec::new();
    for vector in vectors {
        let shared: Vec<BlockId> = vector
            .blocks
            .iter()
            .copied()
            .filter(|&b| interner.count(b) > 1)
            .collect();
        if shared.len() >= min_blocks {
            result.push(Vector {
                file: vector.file,
                blocks: shared,
            });
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
