//! Clap definition of the `subdup` command line.
use std::path::PathBuf;

use clap::Parser;

/// Analyzes checksum listings for whole-file and sub-file deduplication
/// opportunities.
///
/// The whole-file pass always runs and writes its duplicate groups next to
/// the input listing. When a block listing is also given, the sub-file pass
/// builds the file↔block graph and writes the dedupe-group report.
#[derive(Debug, Parser)]
#[command(name = "subdup", version, about)]
pub struct Cli {
    /// Whole-file checksum listing, one `<hash> <path>` per line, sorted by
    /// hash.
    #[arg(value_name = "WHOLE_CHECKSUMS")]
    pub whole_checksums: PathBuf,

    /// Block checksum listing, one `<hash> <path> offset <start>-<end>` per
    /// line, grouped by path. Omit to run the whole-file pass only.
    #[arg(value_name = "BLOCK_CHECKSUMS")]
    pub block_checksums: Option<PathBuf>,

    /// Checksum format of the input listings. Informational only; the
    /// analysis is hash-agnostic.
    #[arg(short = 'c', long, value_name = "TYPE", default_value = "MD5")]
    pub checksum_type: String,

    /// Minimum number of shared blocks a file must retain to stay a dedupe
    /// candidate.
    #[arg(short = 'm', long, value_name = "BLOCKS", default_value_t = 2)]
    pub min_blocks: usize,

    /// Also write the pruned vector set to a `.vectors.json` sidecar next to
    /// the block listing.
    #[arg(short = 'v', long)]
    pub dump_vectors: bool,

    /// Log pipeline progress to stderr.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print a textual summary of each graph component to stderr.
    #[arg(short = 'g', long)]
    pub show_graph: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn positional_listings_parse() {
        let cli = Cli::try_parse_from(["subdup", "whole.out", "blocks.out"]).expect("parses");
        assert_eq!(cli.whole_checksums, PathBuf::from("whole.out"));
        assert_eq!(cli.block_checksums, Some(PathBuf::from("blocks.out")));
        assert_eq!(cli.min_blocks, 2);
        assert_eq!(cli.checksum_type, "MD5");
        assert!(!cli.dump_vectors);
    }

    #[test]
    fn block_listing_is_optional() {
        let cli = Cli::try_parse_from(["subdup", "whole.out"]).expect("parses");
        assert_eq!(cli.block_checksums, None);
    }

    #[test]
    fn missing_input_files_is_a_usage_error() {
        let err = Cli::try_parse_from(["subdup"]).expect_err("no inputs");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn flags_accept_short_and_long_forms() {
        let cli = Cli::try_parse_from([
            "subdup",
            "-m",
            "3",
            "-c",
            "SHA256",
            "-v",
            "-d",
            "-g",
            "whole.out",
            "blocks.out",
        ])
        .expect("parses");
        assert_eq!(cli.min_blocks, 3);
        assert_eq!(cli.checksum_type, "SHA256");
        assert!(cli.dump_vectors);
        assert!(cli.debug);
        assert!(cli.show_graph);

        let cli = Cli::try_parse_from(["subdup", "--min-blocks", "4", "whole.out"]).expect("parses");
        assert_eq!(cli.min_blocks, 4);
    }
}
