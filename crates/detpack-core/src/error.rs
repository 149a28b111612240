//! Error types for packing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Broad failure class of a [`PackError`].
///
/// Every error surfaces to the caller as a single failure outcome; the
/// category only tells at which stage of the pipeline it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Request validation failed before any I/O was performed.
    Format,
    /// Walking the input directory failed.
    Discovery,
    /// Opening, reading, or writing a file stream failed.
    Stream,
    /// The archive writer rejected an entry or failed internally.
    Archive,
}

/// Errors that can occur while packing a directory.
#[derive(Error, Debug)]
pub enum PackError {
    /// Output extension is not `zip` or `tar`.
    #[error("unsupported archive format '{extension}': expected \"zip\" or \"tar\"")]
    UnsupportedFormat {
        /// The extension found after the final `.` of the output path.
        extension: String,
    },

    /// Exclude pattern could not be compiled.
    #[error("invalid exclude pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Request options are out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the problem.
        reason: String,
    },

    /// Input directory could not be traversed.
    #[error("cannot discover files under {path}: {reason}")]
    Discovery {
        /// Path being traversed when the failure happened.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// A source file or the output file could not be opened, read, or
    /// written.
    #[error("stream error on {path}: {source}")]
    Stream {
        /// The file whose stream failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O operation failed outside of a specific file stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry path has no usable file name to store in the archive.
    #[error("cannot derive an archive entry name from {path}")]
    InvalidEntryName {
        /// The path without a file name component.
        path: PathBuf,
    },

    /// The archive writer failed.
    #[error("archive error: {0}")]
    Archive(String),
}

impl PackError {
    /// Wraps an I/O error with the path of the stream it came from.
    pub(crate) fn stream(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Stream {
            path: path.into(),
            source,
        }
    }

    /// Returns the pipeline stage this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use detpack_core::ErrorCategory;
    /// use detpack_core::PackError;
    ///
    /// let err = PackError::UnsupportedFormat {
    ///     extension: "rar".to_string(),
    /// };
    /// assert_eq!(err.category(), ErrorCategory::Format);
    ///
    /// let err = PackError::Archive("duplicate entry".to_string());
    /// assert_eq!(err.category(), ErrorCategory::Archive);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFormat { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidConfiguration { .. } => ErrorCategory::Format,
            Self::Discovery { .. } => ErrorCategory::Discovery,
            Self::Stream { .. } | Self::Io(_) => ErrorCategory::Stream,
            Self::InvalidEntryName { .. } | Self::Archive(_) => ErrorCategory::Archive,
        }
    }

    /// Returns `true` if the error was raised before touching the
    /// filesystem.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Format)
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Discovery { path, .. }
            | Self::Stream { path, .. }
            | Self::InvalidEntryName { path } => Some(path),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for PackError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Archive(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unsupported_format_display() {
        let err = PackError::UnsupportedFormat {
            extension: "rar".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported archive format 'rar': expected \"zip\" or \"tar\""
        );
    }

    #[test]
    fn test_stream_error_keeps_source() {
        let err = PackError::stream(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.txt"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.path(), Some(std::path::Path::new("missing.txt")));
    }

    #[test]
    fn test_categories() {
        let pattern = PackError::InvalidPattern {
            pattern: "[".to_string(),
            reason: "unclosed class".to_string(),
        };
        assert_eq!(pattern.category(), ErrorCategory::Format);
        assert!(pattern.is_validation_error());

        let discovery = PackError::Discovery {
            path: PathBuf::from("in"),
            reason: "not a directory".to_string(),
        };
        assert_eq!(discovery.category(), ErrorCategory::Discovery);
        assert!(!discovery.is_validation_error());

        let io_err = PackError::from(io::Error::other("disk full"));
        assert_eq!(io_err.category(), ErrorCategory::Stream);

        let name = PackError::InvalidEntryName {
            path: PathBuf::from("/"),
        };
        assert_eq!(name.category(), ErrorCategory::Archive);
    }

    #[test]
    fn test_zip_error_conversion() {
        let err = PackError::from(zip::result::ZipError::FileNotFound);
        assert!(matches!(err, PackError::Archive(_)));

        let err = PackError::from(zip::result::ZipError::Io(io::Error::other("boom")));
        assert!(matches!(err, PackError::Io(_)));
    }
}
