//! Resolution of id-based group trees into the serializable report form.
//!
//! A post-order walk replaces every file node with its path and every block
//! node with its `{hash, range}` fingerprint. Member lists are sorted by id
//! before resolution so that serializing the same analysis twice produces
//! identical bytes.
use serde::Serialize;

use crate::groups::{AnalysisError, DedupeGroup};
use crate::interner::{BlockFingerprint, Interner, NodeId};

/// A dedupe group with names resolved, ready for JSON emission.
///
/// The recursive field serializes as `subgroup`, matching the report schema
/// consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedGroup {
    /// Stable group identifier.
    pub name: String,
    /// Paths of all files in the group, in id order.
    pub files: Vec<String>,
    /// Paths first realized at this level.
    pub selected_files: Vec<String>,
    /// Fingerprints of all blocks in the group, in id order.
    pub csums: Vec<BlockFingerprint>,
    /// Fingerprints first realized at this level.
    pub selected_csums: Vec<BlockFingerprint>,
    /// Redundant block copies eliminated by realizing the group.
    pub savings: u64,
    /// Child groups produced by conflict-driven splitting.
    #[serde(rename = "subgroup")]
    pub subgroups: Vec<ResolvedGroup>,
}

/// Resolves a forest of dedupe groups.
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownId`] if any node id in the tree has no
/// interned entry (an internal invariant violation).
pub fn resolve_groups(
    groups: &[DedupeGroup],
    interner: &Interner,
) -> Result<Vec<ResolvedGroup>, AnalysisError> {
    groups.iter().map(|g| resolve_group(g, interner)).collect()
}

fn resolve_group(group: &DedupeGroup, interner: &Interner) -> Result<ResolvedGroup, AnalysisError> {
    let subgroups = resolve_groups(&group.subgroups, interner)?;
    Ok(ResolvedGroup {
        name: group.name.clone(),
        files: resolve_files(&group.files, interner)?,
        selected_files: resolve_files(&group.selected_files, interner)?,
        csums: resolve_csums(&group.csums, interner)?,
        selected_csums: resolve_csums(&group.selected_csums, interner)?,
        savings: group.savings,
        subgroups,
    })
}

/// Sorts file nodes by id and resolves each to its path.
fn resolve_files(nodes: &[NodeId], interner: &Interner) -> Result<Vec<String>, AnalysisError> {
    let mut sorted: Vec<NodeId> = nodes.to_vec();
    sorted.sort_unstable();
    sorted
        .into_iter()
        .map(|node| {
            node.as_file()
                .and_then(|f| interner.path(f))
                .map(str::to_owned)
                .ok_or(AnalysisError::UnknownId { node })
        })
        .collect()
}

/// Sorts block nodes by id and resolves each to its fingerprint.
fn resolve_csums(
    nodes: &[NodeId],
    interner: &Interner,
) -> Result<Vec<BlockFingerprint>, AnalysisError> {
    let mut sorted: Vec<NodeId> = nodes.to_vec();
    sorted.sort_unstable();
    sorted
        .into_iter()
        .map(|node| {
            node.as_block()
                .and_then(|b| interner.fingerprint(b))
                .cloned()
                .ok_or(AnalysisError::UnknownId { node })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
