//! The analysis pipeline: whole-file pass, then the optional sub-file pass.
//!
//! Output artifacts land next to their input listings:
//!
//! - `<whole_base>.json` — array of duplicate groups (arrays of paths);
//! - `<block_base>.dedupe.json` — the resolved dedupe-group forest;
//! - `<block_base>.vectors.json` — the pruned vector set, with
//!   `--dump-vectors`.
//!
//! One summary line per artifact goes to stdout; `--debug` progress and the
//! `--show-graph` rendering go to stderr.
use subdup_core::{
    DedupeGraph, DuplicateIndex, Interner, NodeId, analyze, build_graph, build_vectors,
    connected_components, duplicate_groups, prune_vectors, resolve_groups,
};

use crate::cli::Cli;
use crate::error::CliError;
use crate::io;

/// Runs the whole pipeline for the parsed command line.
///
/// # Errors
///
/// Exit code 2 for read, parse, or write failures; exit code 1 when the
/// graph analysis itself fails.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let debug = |msg: &str| {
        if cli.debug {
            eprintln!("subdup: {msg}");
        }
    };

    debug("identifying whole-file duplicates");
    let whole_text = io::read_listing(&cli.whole_checksums)?;
    let dups = duplicate_groups(&whole_text).map_err(|e| CliError::MalformedInput {
        path: cli.whole_checksums.clone(),
        detail: e.to_string(),
    })?;

    let dups_path = io::derived_path(&cli.whole_checksums, "json");
    io::write_json(&dups_path, &dups)?;
    println!("{}: {} duplicate groups", dups_path.display(), dups.len());

    let Some(block_checksums) = &cli.block_checksums else {
        return Ok(());
    };

    debug("building sub-file vectors");
    let block_text = io::read_listing(block_checksums)?;
    let index = DuplicateIndex::from_groups(&dups);
    let mut interner = Interner::new();
    let vectors =
        build_vectors(&block_text, &index, &mut interner).map_err(|e| CliError::MalformedInput {
            path: block_checksums.clone(),
            detail: e.to_string(),
        })?;

    debug("pruning unshared blocks");
    let pruned = prune_vectors(&vectors, &interner, cli.min_blocks);
    if cli.dump_vectors {
        let vectors_path = io::derived_path(block_checksums, "vectors.json");
        io::write_json(&vectors_path, &pruned)?;
        println!("{}: {} vectors", vectors_path.display(), pruned.len());
    }

    debug("running graph analysis");
    let graph = build_graph(&pruned);
    if cli.show_graph {
        render_graph(&graph, &interner);
    }
    let groups = analyze(&graph, &interner)?;
    let resolved = resolve_groups(&groups, &interner)?;

    let report_path = io::derived_path(block_checksums, "dedupe.json");
    io::write_json(&report_path, &resolved)?;
    println!("{}: {} dedupe groups", report_path.display(), resolved.len());

    Ok(())
}

/// Prints one stderr block per graph component: its file and block members
/// with resolved names, then its edges.
fn render_graph(graph: &DedupeGraph, interner: &Interner) {
    for (i, component) in connected_components(graph).iter().enumerate() {
        let files = component.iter().filter(|n| n.is_file()).count();
        let blocks = component.len() - files;
        eprintln!("component {i}: {files} files, {blocks} blocks");
        for &node in component {
            eprintln!("  {} {}", node, describe(node, interner));
        }
        for (a, b) in graph.links() {
            if component.contains(&a) {
                eprintln!("  edge {a} -- {b}");
            }
        }
    }
}

/// Human-readable label for a node: the path, or `hash@start-end`.
fn describe(node: NodeId, interner: &Interner) -> String {
    match node {
        NodeId::File(f) => interner.path(f).unwrap_or("<unknown>").to_owned(),
        NodeId::Block(b) => match interner.fingerprint(b) {
            Some(fp) => format!("{}@{}-{}", fp.hash, fp.range.start, fp.range.end),
            None => "<unknown>".to_owned(),
        },
    }
}
