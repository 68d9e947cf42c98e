//! Listing input, artifact output, and output-path derivation.
//!
//! All filesystem access of the binary lives here; `subdup-core` never
//! touches a file. Listings are read whole and validated as UTF-8 with the
//! offset of the first bad byte reported on failure.
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CliError;

/// Reads an entire listing file into a `String`.
///
/// # Errors
///
/// Returns a [`CliError`] (exit code 2) for a missing file, a permission
/// failure, any other read error, or invalid UTF-8.
pub fn read_listing(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path).map_err(|e| read_error(&e, path))?;
    match std::str::from_utf8(&bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            path: path.to_path_buf(),
            byte_offset: e.valid_up_to(),
        }),
    }
}

/// Maps a read-side `std::io::Error` to the matching [`CliError`] variant.
fn read_error(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::IsADirectory
        | std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::TimedOut
        | std::io::ErrorKind::Interrupted
        | std::io::ErrorKind::UnexpectedEof
        | std::io::ErrorKind::OutOfMemory
        | std::io::ErrorKind::Other
        | _ => CliError::ReadError {
            path: path.to_path_buf(),
            detail: e.to_string(),
        },
    }
}

/// Serializes `value` as pretty JSON to `path`, with a trailing newline.
///
/// # Errors
///
/// Returns [`CliError::WriteError`] (exit code 2) on serialization or write
/// failure.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let mut body = serde_json::to_string_pretty(value).map_err(|e| CliError::WriteError {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    body.push('\n');
    std::fs::write(path, body).map_err(|e| CliError::WriteError {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Derives an output path by replacing the input's final extension.
///
/// `whole.out` with `json` becomes `whole.json`; an extensionless input
/// simply gains the extension. A multi-part extension such as
/// `dedupe.json` yields the `<base>.dedupe.json` artifact name.
pub fn derived_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
