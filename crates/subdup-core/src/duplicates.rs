//! Whole-file duplicate detection and the secondary-duplicate index.
//!
//! The whole-file listing arrives pre-sorted by hash, so duplicate sets are
//! simply runs of adjacent lines sharing a hash. Within each set the **last**
//! member is kept as the primary; the rest become secondaries and are
//! excluded from sub-file analysis (one vector per duplicate set is enough).
use std::collections::HashSet;

use crate::listing::{ParseError, parse_whole_entry};

/// Scans a sorted whole-file listing and returns its duplicate groups.
///
/// Each group is the ordered list of paths that share one hash, in input
/// order; runs of length 1 are not reported. A trailing run at end of input
/// is flushed like any other.
///
/// # Errors
///
/// Returns [`ParseError::MalformedLine`] on the first line that does not
/// match the listing format.
pub fn duplicate_groups(input: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut last_hash = String::new();
    let mut run: Vec<String> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let entry = parse_whole_entry(line, idx + 1)?;
        if entry.hash != last_hash {
            if run.len() > 1 {
                groups.push(std::mem::take(&mut run));
            } else {
                run.clear();
            }
            last_hash = entry.hash;
        }
        run.push(entry.path);
    }
    if run.len() > 1 {
        groups.push(run);
    }

    Ok(groups)
}

/// O(1) membership index over the secondary duplicates.
///
/// Built from the duplicate groups of the whole-file pass; the vector
/// builder consults it to skip entire files.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    secondaries: HashSet<String>,
}

impl DuplicateIndex {
    /// Builds the index from duplicate groups.
    ///
    /// The last member of each group is the primary and stays eligible for
    /// sub-file analysis; every other member is recorded as a secondary.
    pub fn from_groups(groups: &[Vec<String>]) -> Self {
        let mut secondaries = HashSet::new();
        for group in groups {
            if let Some((_primary, rest)) = group.split_last() {
                for path in rest {
                    secondaries.insert(path.clone());
                }
            }
        }
        Self { secondaries }
    }

    /// Returns `true` if `path` is a secondary duplicate.
    pub fn is_secondary(&self, path: &str) -> bool {
        self.secondaries.contains(path)
    }

    /// Number of secondary paths in the index.
    pub fn len(&self) -> usize {
        self.secondaries.len()
    }

    /// Returns `true` if no path is excluded.
    pub fn is_empty(&self) -> bool {
        self.secondaries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
