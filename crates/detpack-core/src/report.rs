//! Packing operation reporting.

use crate::format::ArchiveFormat;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a finished packing operation.
///
/// Only returned to the caller; none of these values end up in the archive.
///
/// # Examples
///
/// ```
/// use detpack_core::ArchiveFormat;
/// use detpack_core::PackReport;
///
/// let mut report = PackReport::new("out.zip", ArchiveFormat::Zip);
/// report.bytes_read = 1000;
/// report.bytes_written = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct PackReport {
    /// Path of the archive that was written.
    pub output_path: PathBuf,

    /// Format of the archive.
    pub format: ArchiveFormat,

    /// Archive names in the order they were appended.
    pub entries: Vec<String>,

    /// Number of entries found by discovery.
    pub files_discovered: usize,

    /// Number of explicitly included entries.
    pub files_included: usize,

    /// Source bytes read.
    pub bytes_read: u64,

    /// Size of the finished archive in bytes.
    pub bytes_written: u64,

    /// Wall-clock duration of the operation.
    pub duration: Duration,
}

impl PackReport {
    /// Creates an empty report for the given output.
    #[must_use]
    pub fn new(output_path: impl Into<PathBuf>, format: ArchiveFormat) -> Self {
        Self {
            output_path: output_path.into(),
            format,
            entries: Vec::new(),
            files_discovered: 0,
            files_included: 0,
            bytes_read: 0,
            bytes_written: 0,
            duration: Duration::ZERO,
        }
    }

    /// Total number of entries in the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_discovered + self.files_included
    }

    /// Returns the compression ratio (read / written).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_read == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes_written as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = PackReport::new("out.tar", ArchiveFormat::Tar);
        assert_eq!(report.output_path, PathBuf::from("out.tar"));
        assert_eq!(report.total_entries(), 0);
        assert!(report.entries.is_empty());
        assert_eq!(report.duration, Duration::ZERO);
    }

    #[test]
    fn test_compression_ratio_edge_cases() {
        let mut report = PackReport::new("out.zip", ArchiveFormat::Zip);
        assert!(report.compression_ratio().abs() < f64::EPSILON);

        report.bytes_read = 1000;
        assert!(report.compression_ratio().abs() < f64::EPSILON);

        report.bytes_written = 1000;
        assert!((report.compression_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_entries() {
        let mut report = PackReport::new("out.zip", ArchiveFormat::Zip);
        report.files_discovered = 3;
        report.files_included = 2;
        assert_eq!(report.total_entries(), 5);
    }
}
