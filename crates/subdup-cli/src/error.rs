//! CLI error type with associated exit codes.
//!
//! Every variant maps to a stable exit code via [`CliError::exit_code`]:
//!
//! - Exit code **2** — input or output failure: a listing could not be read
//!   or parsed, or an artifact could not be written. These terminate before
//!   or around the domain logic.
//! - Exit code **1** — logical failure: the pipeline ran but the analysis
//!   itself failed (no separating edge, internal id violation).
use std::fmt;
use std::path::PathBuf;

use subdup_core::AnalysisError;

/// All error conditions the `subdup` binary can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input/output failures ---
    /// A listing file could not be found.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a listing.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// A listing contained invalid UTF-8.
    InvalidUtf8 {
        /// The listing path.
        path: PathBuf,
        /// Byte offset of the first invalid sequence.
        byte_offset: usize,
    },

    /// A listing line did not match its expected shape.
    MalformedInput {
        /// The listing path.
        path: PathBuf,
        /// The parse failure, including line number and content.
        detail: String,
    },

    /// A generic I/O failure while reading a listing.
    ReadError {
        /// The listing path.
        path: PathBuf,
        /// The underlying I/O error message.
        detail: String,
    },

    /// An output artifact could not be written.
    WriteError {
        /// The artifact path.
        path: PathBuf,
        /// The underlying I/O error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The graph analysis failed.
    Analysis {
        /// The underlying analysis error.
        source: AnalysisError,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::InvalidUtf8 { .. }
            | Self::MalformedInput { .. }
            | Self::ReadError { .. }
            | Self::WriteError { .. } => 2,

            Self::Analysis { .. } => 1,
        }
    }

    /// Returns the message printed to stderr before exiting.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::InvalidUtf8 { path, byte_offset } => {
                format!(
                    "error: invalid UTF-8 in {}: first invalid byte at offset {byte_offset}",
                    path.display()
                )
            }
            Self::MalformedInput { path, detail } => {
                format!("error: {}: {detail}", path.display())
            }
            Self::ReadError { path, detail } => {
                format!("error: failed to read {}: {detail}", path.display())
            }
            Self::WriteError { path, detail } => {
                format!("error: failed to write {}: {detail}", path.display())
            }
            Self::Analysis { source } => {
                format!("error: {source}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<AnalysisError> for CliError {
    fn from(source: AnalysisError) -> Self {
        Self::Analysis { source }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::path::PathBuf;

    use super::*;

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("whole.out"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/whole.out"),
            },
            CliError::InvalidUtf8 {
                path: PathBuf::from("whole.out"),
                byte_offset: 9,
            },
            CliError::MalformedInput {
                path: PathBuf::from("blocks.out"),
                detail: "malformed listing line 3".to_owned(),
            },
            CliError::ReadError {
                path: PathBuf::from("whole.out"),
                detail: "device error".to_owned(),
            },
            CliError::WriteError {
                path: PathBuf::from("out.json"),
                detail: "disk full".to_owned(),
            },
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 2, "{e:?}");
        }
    }

    #[test]
    fn analysis_failures_are_exit_1() {
        let e = CliError::from(AnalysisError::NoSeparatingEdge {
            group: "g".to_owned(),
        });
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn messages_name_the_offending_path() {
        let e = CliError::MalformedInput {
            path: PathBuf::from("blocks.out"),
            detail: "malformed listing line 3: \"x\"".to_owned(),
        };
        let msg = e.message();
        assert!(msg.contains("blocks.out"), "message: {msg}");
        assert!(msg.contains("line 3"), "message: {msg}");
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("x.out"),
        };
        assert_eq!(format!("{e}"), e.message());
    }
}
