//! High-level public API for deterministic packing.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::PackError;
use crate::PackReport;
use crate::PackRequest;
use crate::Result;
use crate::discovery;
use crate::discovery::EntryOrigin;
use crate::discovery::ExcludeMatcher;
use crate::discovery::FileEntry;
use crate::progress::NoopProgress;
use crate::progress::ProgressCallback;
use crate::writer;

/// Packs a directory into a deterministic archive.
///
/// The request is validated before the first suspension point: an
/// unsupported output extension, an invalid exclude pattern or an
/// out-of-range compression level fail without touching the filesystem.
/// Discovery and archive writing then run on tokio's blocking pool, and the
/// future resolves only after the archive is finalized, flushed and synced.
///
/// Dropping the future does not cancel the blocking work, and a partially
/// written archive is not removed on failure.
///
/// # Errors
///
/// Returns an error if:
/// - The output extension is not `zip` or `tar`
/// - An exclude pattern is invalid
/// - The input directory cannot be traversed
/// - The output or any source file cannot be opened, read, or written
/// - The archive writer rejects an entry
///
/// # Examples
///
/// ```no_run
/// use detpack_core::PackRequest;
/// use detpack_core::pack;
///
/// # async fn run() -> Result<(), detpack_core::PackError> {
/// let request = PackRequest::new("build", "dist/app.zip")
///     .with_exclude(vec!["**/*.map".to_string()]);
/// let report = pack(request).await?;
/// println!("Packed {} entries", report.total_entries());
/// # Ok(())
/// # }
/// ```
pub async fn pack(request: PackRequest) -> Result<PackReport> {
    request.validate()?;
    ExcludeMatcher::new(&request.exclude)?;

    tokio::task::spawn_blocking(move || pack_blocking(&request))
        .await
        .map_err(|e| PackError::Io(std::io::Error::other(format!("packing task failed: {e}"))))?
}

/// Packs `input_dir` into `output_path` and resolves with `output_path`.
///
/// This is the positional form of [`pack`]: `include` files are appended
/// after the discovered ones under their base names, `exclude` globs remove
/// files from discovery, and `prefix` is prepended to every discovered
/// file's archive name. Absent and empty lists behave the same.
///
/// # Errors
///
/// See [`pack`].
///
/// # Examples
///
/// ```no_run
/// use detpack_core::pack_dir;
///
/// # async fn run() -> Result<(), detpack_core::PackError> {
/// let output = pack_dir("build", "dist/app.tar", vec![], vec!["*.log".into()], None).await?;
/// assert_eq!(output, std::path::PathBuf::from("dist/app.tar"));
/// # Ok(())
/// # }
/// ```
pub async fn pack_dir(
    input_dir: impl Into<PathBuf>,
    output_path: impl Into<PathBuf>,
    include: Vec<PathBuf>,
    exclude: Vec<String>,
    prefix: Option<PathBuf>,
) -> Result<PathBuf> {
    let request = PackRequest::new(input_dir, output_path)
        .with_include(include)
        .with_exclude(exclude)
        .with_prefix(prefix);
    let report = pack(request).await?;
    Ok(report.output_path)
}

/// Packs a directory on the current thread.
///
/// # Errors
///
/// See [`pack`].
pub fn pack_blocking(request: &PackRequest) -> Result<PackReport> {
    pack_with_progress(request, &mut NoopProgress)
}

/// Packs a directory on the current thread, reporting progress.
///
/// # Errors
///
/// See [`pack`].
pub fn pack_with_progress(
    request: &PackRequest,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();
    let format = request.validate()?;
    let entries = plan(request)?;

    let mut report = PackReport::new(&request.output_path, format);
    report.files_discovered = count(&entries, EntryOrigin::Discovered);
    report.files_included = count(&entries, EntryOrigin::Included);

    writer::write_archive(
        format,
        &request.output_path,
        &entries,
        request.compression_level,
        progress,
        &mut report,
    )?;
    report.duration = start.elapsed();

    info!(
        output = %request.output_path.display(),
        %format,
        entries = report.total_entries(),
        bytes = report.bytes_written,
        "archive written"
    );

    Ok(report)
}

/// Returns the entries a request would pack, in archive order, without
/// writing anything.
///
/// # Errors
///
/// Returns an error if the request is invalid or discovery fails.
///
/// # Examples
///
/// ```no_run
/// use detpack_core::PackRequest;
/// use detpack_core::plan;
///
/// let entries = plan(&PackRequest::new("build", "out.zip"))?;
/// for entry in entries {
///     println!("{}", entry.archive_name);
/// }
/// # Ok::<(), detpack_core::PackError>(())
/// ```
pub fn plan(request: &PackRequest) -> Result<Vec<FileEntry>> {
    request.validate()?;
    discovery::collect_entries(request)
}

fn count(entries: &[FileEntry], origin: EntryOrigin) -> usize {
    entries.iter().filter(|e| e.origin == origin).count()
}
