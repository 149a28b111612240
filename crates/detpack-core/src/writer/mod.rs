//! Deterministic archive writers.
//!
//! Every entry is written with the same synthetic metadata: a fixed
//! timestamp, mode `0o644` and no ownership. Combined with the sorted entry
//! list from discovery, the archive bytes depend only on file names and
//! contents.

pub(crate) mod tar;
pub(crate) mod zip;

use crate::PackError;
use crate::Result;
use crate::discovery::FileEntry;
use crate::format::ArchiveFormat;
use crate::progress::ProgressCallback;
use crate::progress::ProgressReader;
use crate::report::PackReport;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Permission bits stored for every entry.
pub const FILE_MODE: u32 = 0o644;

/// Modification time stored for every tar entry (Unix epoch zero).
pub const FIXED_MTIME: u64 = 0;

/// Destination for archive entries.
pub(crate) trait EntrySink {
    /// Underlying writer returned by `finish`.
    type Inner;

    /// Appends one regular file of `size` bytes read from `content`.
    ///
    /// Plain I/O failures come back as `PackError::Io` and are attributed to
    /// the source file by the caller.
    fn append(&mut self, name: &str, size: u64, content: &mut dyn Read) -> Result<()>;

    /// Writes the archive trailer and returns the underlying writer.
    fn finish(self) -> Result<Self::Inner>;
}

/// Writes `entries` to a new archive at `output`.
///
/// Entries are appended strictly in the given order. The function returns
/// only after the archive is finalized, flushed and synced to storage. On
/// failure the partially written file is left in place.
///
/// # Errors
///
/// Returns an error if:
/// - The output file cannot be created or written
/// - A source file cannot be opened or read, or is not a regular file
/// - The archive writer rejects an entry (e.g. a duplicate zip name)
pub fn write_archive(
    format: ArchiveFormat,
    output: &Path,
    entries: &[FileEntry],
    compression_level: u8,
    progress: &mut dyn ProgressCallback,
    report: &mut PackReport,
) -> Result<()> {
    let file = File::create(output).map_err(|e| PackError::stream(output, e))?;
    let writer = BufWriter::new(file);

    let writer = match format {
        ArchiveFormat::Tar => {
            let mut sink = tar::TarSink::new(writer);
            append_entries(&mut sink, entries, progress, report)?;
            sink.finish()?
        }
        ArchiveFormat::Zip => {
            let mut sink = zip::ZipSink::new(writer, compression_level);
            append_entries(&mut sink, entries, progress, report)?;
            sink.finish()?
        }
    };

    let file = writer
        .into_inner()
        .map_err(|e| PackError::stream(output, e.into_error()))?;
    file.sync_all().map_err(|e| PackError::stream(output, e))?;
    report.bytes_written = file
        .metadata()
        .map_err(|e| PackError::stream(output, e))?
        .len();
    drop(file);

    progress.on_complete();
    Ok(())
}

fn append_entries<S: EntrySink>(
    sink: &mut S,
    entries: &[FileEntry],
    progress: &mut dyn ProgressCallback,
    report: &mut PackReport,
) -> Result<()> {
    let total = entries.len();

    for (idx, entry) in entries.iter().enumerate() {
        progress.on_entry_start(&entry.archive_name, total, idx + 1);

        let path = &entry.input_path;
        let file = File::open(path).map_err(|e| PackError::stream(path, e))?;
        let metadata = file.metadata().map_err(|e| PackError::stream(path, e))?;
        if !metadata.is_file() {
            return Err(PackError::stream(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }
        let size = metadata.len();

        {
            let mut reader = ProgressReader::new(file, progress);
            sink.append(&entry.archive_name, size, &mut reader)
                .map_err(|e| match e {
                    PackError::Io(source) => PackError::stream(path, source),
                    other => other,
                })?;
            report.bytes_read += reader.total();
        }

        debug!(name = %entry.archive_name, size, "appended entry");
        report.entries.push(entry.archive_name.clone());
        progress.on_entry_complete(&entry.archive_name);
    }

    Ok(())
}
