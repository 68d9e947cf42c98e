//! Id tables mapping file paths and block fingerprints to dense integers.
//!
//! The analyzer never carries path or hash strings through the graph stages;
//! the [`Interner`] assigns a dense [`FileId`] to each path and a dense
//! [`BlockId`] to each distinct `(hash, range)` pair, and records how many
//! files each block fingerprint was seen in. Ids are assigned in first-sight
//! order of the input stream, so the same input always produces the same
//! tables.
//!
//! The interner is mutable only while vectors are being built; every later
//! stage receives it by shared reference.
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Dense id for a file path, assigned on first sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FileId(u32);

impl FileId {
    /// Returns the id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense id for a `(hash, range)` block fingerprint, assigned on first
/// sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BlockId(u32);

impl BlockId {
    /// Returns the id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ---------------------------------------------------------------------------
// Range and fingerprint
// ---------------------------------------------------------------------------

/// Byte range of a block within its file.
///
/// The analyzer only compares ranges for equality; no arithmetic is performed
/// on the offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Range {
    /// Inclusive start offset in bytes.
    pub start: u64,
    /// Exclusive end offset in bytes.
    pub end: u64,
}

/// A block fingerprint: the checksum of one fixed-offset region of a file.
///
/// Two fingerprints with the same hash but different ranges are distinct, as
/// are two with the same range but different hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BlockFingerprint {
    /// Lowercase hex checksum of the block contents.
    pub hash: String,
    /// Byte range the checksum covers.
    pub range: Range,
}

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Tagged graph node id: a file or a block.
///
/// Files and blocks share one node namespace in the bipartite graph; the tag
/// keeps the two id spaces unambiguous and is recoverable from the node id
/// alone. The `Ord` derive (files before blocks, then by integer id) gives
/// path-edge sets and cut-edge selection a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    /// A file node.
    File(FileId),
    /// A block (checksum) node.
    Block(BlockId),
}

impl NodeId {
    /// Returns `true` if this node is a file.
    pub fn is_file(self) -> bool {
        matches!(self, NodeId::File(_))
    }

    /// Returns `true` if this node is a block.
    pub fn is_block(self) -> bool {
        matches!(self, NodeId::Block(_))
    }

    /// Returns the inner [`FileId`], or `None` for a block node.
    pub fn as_file(self) -> Option<FileId> {
        match self {
            NodeId::File(id) => Some(id),
            NodeId::Block(_) => None,
        }
    }

    /// Returns the inner [`BlockId`], or `None` for a file node.
    pub fn as_block(self) -> Option<BlockId> {
        match self {
            NodeId::File(_) => None,
            NodeId::Block(id) => Some(id),
        }
    }
}

impl fmt::Display for NodeId {
    /// Renders the tagged form used in diagnostics: `F:<n>` or `H:<n>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::File(id) => write!(f, "F:{}", id.0),
            NodeId::Block(id) => write!(f, "H:{}", id.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Interner
// ---------------------------------------------------------------------------

/// Owns the file and block id tables.
///
/// File interning is append-only and does **not** deduplicate: the vector
/// builder interns a path exactly once per file boundary, so a repeated call
/// with the same path would mint a spurious second id. Block interning is
/// keyed on the full `(hash, range)` pair and is idempotent; each repeat
/// sighting increments the block's file count.
#[derive(Debug, Default)]
pub struct Interner {
    paths: Vec<String>,
    block_index: HashMap<BlockFingerprint, BlockId>,
    fingerprints: Vec<BlockFingerprint>,
    counts: Vec<u32>,
}

impl Interner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next dense [`FileId`] to `path` and records the mapping.
    pub fn intern_file(&mut self, path: &str) -> FileId {
        let id = FileId(self.paths.len() as u32);
        self.paths.push(path.to_owned());
        id
    }

    /// Interns a block fingerprint.
    ///
    /// On first sighting a new [`BlockId`] is assigned with count 1; on every
    /// later sighting the existing id is returned and its count incremented.
    pub fn intern_block(&mut self, fingerprint: BlockFingerprint) -> BlockId {
        if let Some(&id) = self.block_index.get(&fingerprint) {
            self.counts[id.index()] += 1;
            return id;
        }
        let id = BlockId(self.fingerprints.len() as u32);
        self.block_index.insert(fingerprint.clone(), id);
        self.fingerprints.push(fingerprint);
        self.counts.push(1);
        id
    }

    /// Returns the path for a file id, or `None` for an id this interner
    /// never assigned.
    pub fn path(&self, id: FileId) -> Option<&str> {
        self.paths.get(id.index()).map(String::as_str)
    }

    /// Returns the fingerprint for a block id, or `None` for an id this
    /// interner never assigned.
    pub fn fingerprint(&self, id: BlockId) -> Option<&BlockFingerprint> {
        self.fingerprints.get(id.index())
    }

    /// Returns the range key for a block id.
    pub fn range(&self, id: BlockId) -> Option<Range> {
        self.fingerprints.get(id.index()).map(|fp| fp.range)
    }

    /// Returns the number of files the block was seen in (0 for an unknown
    /// id).
    pub fn count(&self, id: BlockId) -> u32 {
        self.counts.get(id.index()).copied().unwrap_or(0)
    }

    /// Number of interned file paths.
    pub fn file_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of distinct interned block fingerprints.
    pub fn block_count(&self) -> usize {
        self.fingerprints.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
