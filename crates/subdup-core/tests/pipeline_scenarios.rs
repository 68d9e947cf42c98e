//! End-to-end scenarios over the library pipeline, from listing text to the
//! resolved report.
#![allow(clippy::expect_used)]

use subdup_core::{
    DuplicateIndex, Interner, ResolvedGroup, analyze, build_graph, build_vectors,
    duplicate_groups, prune_vectors, resolve_groups,
};

/// Runs the full sub-file pipeline for one pair of listings.
fn run_pipeline(whole: &str, block: &str, min_blocks: usize) -> Vec<ResolvedGroup> {
    let dups = duplicate_groups(whole).expect("whole listing parses");
    let index = DuplicateIndex::from_groups(&dups);
    let mut interner = Interner::new();
    let vectors = build_vectors(block, &index, &mut interner).expect("block listing parses");
    let pruned = prune_vectors(&vectors, &interner, min_blocks);
    let graph = build_graph(&pruned);
    let groups = analyze(&graph, &interner).expect("analysis succeeds");
    resolve_groups(&groups, &interner).expect("all ids resolve")
}

// ── pure whole-file duplication ──────────────────────────────────────────────

#[test]
fn whole_file_duplicates_pair_up() {
    let whole = "aaaa  /x\naaaa  /y\n";
    let dups = duplicate_groups(whole).expect("parses");
    assert_eq!(dups, vec![vec!["/x".to_owned(), "/y".to_owned()]]);
}

// ── trivial sub-file dedupe ──────────────────────────────────────────────────

#[test]
fn two_identical_block_layouts_form_one_leaf_group() {
    let whole = "aaaa  /whole1\nbbbb  /whole2\n";
    let block = "\
1111  /a offset 0-65536
2222  /a offset 65536-131072
1111  /b offset 0-65536
2222  /b offset 65536-131072
";
    let groups = run_pipeline(whole, block, 2);

    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.files, vec!["/a", "/b"]);
    assert_eq!(group.csums.len(), 2);
    assert_eq!(group.savings, 2);
    assert!(group.subgroups.is_empty());
    assert_eq!(group.selected_files, group.files);
    assert_eq!(group.selected_csums, group.csums);
}

// ── range conflict ───────────────────────────────────────────────────────────

#[test]
fn conflicting_range_claims_split_into_subgroups() {
    let whole = "ffff  /unrelated\n";
    // 1111 and 2222 both claim 0-65536; 3333 at 65536-131072 is shared by all.
    let block = "\
1111  /a offset 0-65536
3333  /a offset 65536-131072
1111  /b offset 0-65536
2222  /b offset 0-65536
3333  /b offset 65536-131072
2222  /c offset 0-65536
3333  /c offset 65536-131072
";
    let groups = run_pipeline(whole, block, 2);

    assert_eq!(groups.len(), 1);
    let root = &groups[0];
    assert_eq!(root.files, vec!["/a", "/b", "/c"]);
    assert!(root.subgroups.len() >= 2, "conflict must split the component");

    // The compatible block is realized at the root; the two conflicting
    // claimants land in different subgroups.
    assert_eq!(root.selected_csums.len(), 1);
    assert_eq!(root.selected_csums[0].hash, "3333");
    for sub in &root.subgroups {
        let claims_1111 = sub.csums.iter().any(|c| c.hash == "1111");
        let claims_2222 = sub.csums.iter().any(|c| c.hash == "2222");
        assert!(
            !(claims_1111 && claims_2222),
            "one subgroup holds both claimants of 0-65536"
        );
    }
}

// ── singleton filter ─────────────────────────────────────────────────────────

#[test]
fn a_file_left_alone_after_pruning_is_not_reported() {
    let whole = "ffff  /unrelated\n";
    // /x keeps both shared blocks; /y and /z each retain only one after
    // pruning and are dropped, leaving /x alone in its component.
    let block = "\
1111  /x offset 0-65536
2222  /x offset 65536-131072
1111  /y offset 0-65536
9999  /y offset 65536-131072
2222  /z offset 0-65536
8888  /z offset 65536-131072
";
    let groups = run_pipeline(whole, block, 2);
    assert!(groups.is_empty(), "singleton components must be filtered");
}

// ── min_blocks threshold ─────────────────────────────────────────────────────

#[test]
fn min_blocks_three_drops_pairs_but_keeps_triples() {
    let whole = "ffff  /unrelated\n";
    let two_shared = "\
1111  /a offset 0-65536
2222  /a offset 65536-131072
1111  /b offset 0-65536
2222  /b offset 65536-131072
";
    assert!(run_pipeline(whole, two_shared, 3).is_empty());

    let three_shared = "\
1111  /a offset 0-65536
2222  /a offset 65536-131072
3333  /a offset 131072-196608
1111  /b offset 0-65536
2222  /b offset 65536-131072
3333  /b offset 131072-196608
1111  /c offset 0-65536
2222  /c offset 65536-131072
3333  /c offset 131072-196608
";
    let groups = run_pipeline(whole, three_shared, 3);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files, vec!["/a", "/b", "/c"]);
    assert_eq!(groups[0].csums.len(), 3);
    // Three blocks, each in three files: 3 * (3-1).
    assert_eq!(groups[0].savings, 6);
}

// ── duplicate exclusion feeds the vector pass ────────────────────────────────

#[test]
fn secondary_duplicates_are_excluded_from_sub_file_analysis() {
    // /dup1 and /dup2 are whole-file duplicates; /dup2 (the last) is primary.
    let whole = "aaaa  /dup1\naaaa  /dup2\nbbbb  /other\n";
    let block = "\
1111  /dup1 offset 0-65536
2222  /dup1 offset 65536-131072
1111  /dup2 offset 0-65536
2222  /dup2 offset 65536-131072
1111  /other offset 0-65536
2222  /other offset 65536-131072
";
    let groups = run_pipeline(whole, block, 2);
    assert_eq!(groups.len(), 1);
    // Only the primary and the unrelated file survive into the group.
    assert_eq!(groups[0].files, vec!["/dup2", "/other"]);
}

// ── boundary: one shared block ───────────────────────────────────────────────

#[test]
fn two_files_sharing_one_block_save_exactly_one_copy() {
    let whole = "ffff  /unrelated\n";
    // Each file still needs two block records to produce a vector at all;
    // only 1111 is shared, so min_blocks=1 keeps the pair.
    let block = "\
1111  /a offset 0-65536
9999  /a offset 65536-131072
1111  /b offset 0-65536
8888  /b offset 65536-131072
";
    let groups = run_pipeline(whole, block, 1);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].csums.len(), 1);
    assert_eq!(groups[0].savings, 1);
}

// ── reproducibility ──────────────────────────────────────────────────────────

#[test]
fn identical_input_yields_identical_serialized_output() {
    let whole = "aaaa  /x\naaaa  /y\n";
    let block = "\
1111  /a offset 0-65536
3333  /a offset 65536-131072
1111  /b offset 0-65536
2222  /b offset 0-65536
3333  /b offset 65536-131072
2222  /c offset 0-65536
3333  /c offset 65536-131072
";
    let first = serde_json::to_string(&run_pipeline(whole, block, 2)).expect("serializes");
    let second = serde_json::to_string(&run_pipeline(whole, block, 2)).expect("serializes");
    assert_eq!(first, second);
}
