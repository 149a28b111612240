//! Output format detection.

use std::fmt;
use std::path::Path;

use crate::PackError;
use crate::Result;

/// Archive formats the packer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// ZIP archive, Deflate-compressed.
    Zip,
    /// Uncompressed tar archive.
    Tar,
}

impl ArchiveFormat {
    /// Returns the extension that selects this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar => "tar",
        }
    }

    /// Returns `true` if the format applies a compression level.
    #[must_use]
    pub const fn supports_compression(self) -> bool {
        matches!(self, Self::Zip)
    }

    /// Determines the format from an output path.
    ///
    /// The format is the text after the final `.` of the whole path and must
    /// be exactly `zip` or `tar`. Matching is case-sensitive, so `OUT.ZIP` is
    /// rejected, and `out.tar.gz` resolves to `gz` and is rejected too.
    ///
    /// # Examples
    ///
    /// ```
    /// use detpack_core::ArchiveFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(
    ///     ArchiveFormat::from_path(Path::new("dist/app.zip")).unwrap(),
    ///     ArchiveFormat::Zip
    /// );
    /// assert!(ArchiveFormat::from_path(Path::new("out.rar")).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PackError::UnsupportedFormat` for anything other than `zip`
    /// or `tar`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = path.to_string_lossy();
        let extension = text.rsplit('.').next().unwrap_or_default();

        // Without a dot, rsplit yields the whole path.
        if !text.contains('.') {
            return Err(PackError::UnsupportedFormat {
                extension: String::new(),
            });
        }

        match extension {
            "zip" => Ok(Self::Zip),
            "tar" => Ok(Self::Tar),
            other => Err(PackError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip() {
        let format = ArchiveFormat::from_path(Path::new("out.zip")).unwrap();
        assert_eq!(format, ArchiveFormat::Zip);
        assert!(format.supports_compression());
    }

    #[test]
    fn test_detect_tar() {
        let format = ArchiveFormat::from_path(Path::new("/tmp/build/out.tar")).unwrap();
        assert_eq!(format, ArchiveFormat::Tar);
        assert!(!format.supports_compression());
    }

    #[test]
    fn test_hidden_file_named_after_format() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new(".zip")).unwrap(),
            ArchiveFormat::Zip
        );
    }

    #[test]
    fn test_detect_rejects_other_extensions() {
        for name in ["out.rar", "out.tar.gz", "out.tgz", "out.7z", "out.ZIP"] {
            let result = ArchiveFormat::from_path(Path::new(name));
            assert!(
                matches!(result, Err(PackError::UnsupportedFormat { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_detect_reports_extension() {
        match ArchiveFormat::from_path(Path::new("out.tar.gz")) {
            Err(PackError::UnsupportedFormat { extension }) => assert_eq!(extension, "gz"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_detect_without_dot() {
        assert!(ArchiveFormat::from_path(Path::new("archive")).is_err());
        assert!(ArchiveFormat::from_path(Path::new("dir.zip/archive")).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ArchiveFormat::Zip.to_string(), "zip");
        assert_eq!(ArchiveFormat::Tar.to_string(), "tar");
    }
}
