//! Error conversion utilities for CLI.
//!
//! Converts detpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use detpack_core::PackError;
use std::path::Path;

/// Converts `PackError` to a user-facing anyhow error naming the output.
pub fn convert_pack_error(err: PackError, output: &Path) -> anyhow::Error {
    match err {
        PackError::UnsupportedFormat { extension } => {
            let shown = if extension.is_empty() {
                "(none)".to_string()
            } else {
                format!("'{extension}'")
            };
            anyhow!(
                "Cannot create '{}': unsupported archive extension {shown}\n\
                 HINT: The output path must end in .zip or .tar (lowercase).",
                output.display()
            )
        }
        PackError::InvalidPattern { pattern, reason } => {
            anyhow!(
                "Invalid exclude pattern '{pattern}': {reason}\n\
                 HINT: Patterns are globs relative to the input directory, e.g. '**/*.log'."
            )
        }
        PackError::Discovery { path, reason } => {
            anyhow!(
                "Cannot read input directory '{}': {reason}\n\
                 HINT: Check that the directory exists and is readable.",
                path.display()
            )
        }
        PackError::Stream { path, source } if path == output => {
            anyhow!(
                "Cannot write archive '{}': {source}\n\
                 HINT: Check that the parent directory exists and is writable.",
                output.display()
            )
        }
        PackError::Stream { path, source } => {
            anyhow!(
                "Cannot read '{}' while writing '{}': {source}",
                path.display(),
                output.display()
            )
        }
        PackError::Archive(reason) => {
            anyhow!(
                "Archive writer failed for '{}': {reason}\n\
                 HINT: Zip archives cannot hold two entries with the same name; \
                 check --include files against --prefix and discovered paths.",
                output.display()
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error packing '{}'", output.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_unsupported_format() {
        let err = PackError::UnsupportedFormat {
            extension: "rar".to_string(),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("out.rar")));
        assert!(msg.contains("'rar'"));
        assert!(msg.contains("out.rar"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_missing_extension() {
        let err = PackError::UnsupportedFormat {
            extension: String::new(),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("archive")));
        assert!(msg.contains("(none)"));
    }

    #[test]
    fn test_convert_output_stream_error() {
        let err = PackError::Stream {
            path: PathBuf::from("missing/out.zip"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("missing/out.zip")));
        assert!(msg.contains("Cannot write archive"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_source_stream_error() {
        let err = PackError::Stream {
            path: PathBuf::from("README.md"),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("out.tar")));
        assert!(msg.contains("Cannot read 'README.md'"));
        assert!(msg.contains("out.tar"));
    }

    #[test]
    fn test_convert_other_keeps_context() {
        let err = PackError::InvalidEntryName {
            path: PathBuf::from("/"),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("out.zip")));
        assert!(msg.contains("Error packing 'out.zip'"));
    }
}
