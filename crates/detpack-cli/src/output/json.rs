//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use detpack_core::EntryOrigin;
use detpack_core::FileEntry;
use detpack_core::PackReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackOutput {
    output_path: String,
    format: String,
    entries: Vec<String>,
    files_discovered: usize,
    files_included: usize,
    bytes_read: u64,
    bytes_written: u64,
    compression_ratio: f64,
    duration_ms: u128,
}

impl From<&PackReport> for PackOutput {
    fn from(report: &PackReport) -> Self {
        Self {
            output_path: report.output_path.display().to_string(),
            format: report.format.to_string(),
            entries: report.entries.clone(),
            files_discovered: report.files_discovered,
            files_included: report.files_included,
            bytes_read: report.bytes_read,
            bytes_written: report.bytes_written,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

#[derive(Serialize)]
struct PlanEntry {
    archive_name: String,
    input_path: String,
    included: bool,
}

#[derive(Serialize)]
struct PlanOutput {
    output_path: String,
    total_entries: usize,
    entries: Vec<PlanEntry>,
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        Self::output(&JsonOutput::success("pack", PackOutput::from(report)))
    }

    fn format_plan(&self, output_path: &Path, entries: &[FileEntry]) -> Result<()> {
        let data = PlanOutput {
            output_path: output_path.display().to_string(),
            total_entries: entries.len(),
            entries: entries
                .iter()
                .map(|entry| PlanEntry {
                    archive_name: entry.archive_name.clone(),
                    input_path: entry.input_path.display().to_string(),
                    included: entry.origin == EntryOrigin::Included,
                })
                .collect(),
        };
        Self::output(&JsonOutput::success("plan", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use detpack_core::ArchiveFormat;

    #[test]
    fn test_pack_output_fields() {
        let mut report = PackReport::new("out.tar", ArchiveFormat::Tar);
        report.entries = vec!["a.txt".to_string(), "b.txt".to_string()];
        report.files_discovered = 2;
        report.bytes_read = 10;
        report.bytes_written = 3072;

        let json = serde_json::to_value(PackOutput::from(&report)).unwrap();
        assert_eq!(json["output_path"], "out.tar");
        assert_eq!(json["format"], "tar");
        assert_eq!(json["entries"][1], "b.txt");
        assert_eq!(json["files_discovered"], 2);
        assert_eq!(json["bytes_written"], 3072);
    }
}
