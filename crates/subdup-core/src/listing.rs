//! Line parsers for the two checksum listing formats.
//!
//! Both listings are line-oriented ASCII produced by an external
//! fingerprinting pass:
//!
//! - whole-file: `<hexhash> <path>`, sorted by hash;
//! - block: `<hexhash> <path> offset <start>-<end>`, grouped by path.
//!
//! Paths may contain interior whitespace; the hash is always lowercase hex.
//! A line that does not match its format is fatal to the pipeline.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::interner::{BlockFingerprint, Range};

/// Matches `<hexhash> <path>`.
static WHOLE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-f]+)\s+(\S.*)$").unwrap_or_else(|_| {
        // Never reached: the pattern above is always valid.
        Regex::new("a^").unwrap_or_else(|_| {
            Regex::new(".").unwrap_or_else(|_| unreachable!("regex engine broken"))
        })
    })
});

/// Matches `<hexhash> <path> offset <start>-<end>`.
static BLOCK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-f]+)\s+(\S.*)\soffset\s(\d+)-(\d+)$").unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| {
            Regex::new(".").unwrap_or_else(|_| unreachable!("regex engine broken"))
        })
    })
});

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Errors produced while parsing a checksum listing.
///
/// Parsing is all-or-nothing: the first malformed line aborts the pipeline
/// and no partial analysis is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line did not match the expected listing shape.
    MalformedLine {
        /// 1-based line number within the listing.
        line_no: usize,
        /// The offending line, verbatim.
        line: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedLine { line_no, line } => {
                write!(f, "malformed listing line {line_no}: {line:?}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One parsed line of the whole-file listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholeEntry {
    /// Whole-file checksum, lowercase hex.
    pub hash: String,
    /// File path, verbatim from the listing.
    pub path: String,
}

/// One parsed line of the block listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    /// The block's `(hash, range)` fingerprint.
    pub fingerprint: BlockFingerprint,
    /// File path, verbatim from the listing.
    pub path: String,
}

/// Parses one whole-file listing line.
///
/// # Errors
///
/// Returns [`ParseError::MalformedLine`] if the line does not match
/// `<hexhash> <path>`.
pub fn parse_whole_entry(line: &str, line_no: usize) -> Result<WholeEntry, ParseError> {
    let caps = WHOLE_LINE_RE
        .captures(line)
        .ok_or_else(|| malformed(line_no, line))?;
    Ok(WholeEntry {
        hash: caps[1].to_owned(),
        path: caps[2].to_owned(),
    })
}

/// Parses one block listing line.
///
/// The offsets must be decimal and fit in `u64`, and the range must satisfy
/// `end > start`; anything else is malformed.
///
/// # Errors
///
/// Returns [`ParseError::MalformedLine`] if the line does not match
/// `<hexhash> <path> offset <start>-<end>`.
pub fn parse_block_entry(line: &str, line_no: usize) -> Result<BlockEntry, ParseError> {
    let caps = BLOCK_LINE_RE
        .captures(line)
        .ok_or_else(|| malformed(line_no, line))?;

    let start: u64 = caps[3].parse().map_err(|_| malformed(line_no, line))?;
    let end: u64 = caps[4].parse().map_err(|_| malformed(line_no, line))?;
    if end <= start {
        return Err(malformed(line_no, line));
    }

    Ok(BlockEntry {
        fingerprint: BlockFingerprint {
            hash: caps[1].to_owned(),
            range: Range { start, end },
        },
        path: caps[2].to_owned(),
    })
}

fn malformed(line_no: usize, line: &str) -> ParseError {
    ParseError::MalformedLine {
        line_no,
        line: line.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
