//! Progress reporting for packing operations.

use std::io::Read;

/// Bytes accumulated before `on_bytes_read` is invoked.
const BATCH_THRESHOLD: u64 = 1024 * 1024;

/// Callback trait for progress reporting while packing.
///
/// The trait requires `Send` so a callback can travel with the packing job
/// onto a blocking worker thread. Callbacks observe the operation only;
/// nothing they do changes the archive bytes.
///
/// # Examples
///
/// ```
/// use detpack_core::ProgressCallback;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, name: &str, total: usize, current: usize) {
///         println!("[{current}/{total}] {name}");
///     }
///
///     fn on_bytes_read(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _name: &str) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an entry is appended.
    ///
    /// # Arguments
    ///
    /// * `name` - Archive name of the entry
    /// * `total` - Total number of entries
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called as source bytes are read, in batches of about 1 MiB.
    fn on_bytes_read(&mut self, bytes: u64);

    /// Called after an entry has been fully appended.
    fn on_entry_complete(&mut self, name: &str);

    /// Called once the archive is finalized and flushed.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_read(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}

/// Reader wrapper that counts bytes and reports them in batches.
pub(crate) struct ProgressReader<'a, R> {
    inner: R,
    progress: &'a mut dyn ProgressCallback,
    pending: u64,
    total: u64,
}

impl<'a, R> ProgressReader<'a, R> {
    pub(crate) fn new(inner: R, progress: &'a mut dyn ProgressCallback) -> Self {
        Self {
            inner,
            progress,
            pending: 0,
            total: 0,
        }
    }

    /// Total bytes read so far.
    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    fn flush_progress(&mut self) {
        if self.pending > 0 {
            self.progress.on_bytes_read(self.pending);
            self.pending = 0;
        }
    }
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.pending += n as u64;
            self.total += n as u64;
            if self.pending >= BATCH_THRESHOLD {
                self.flush_progress();
            }
        }
        Ok(n)
    }
}

impl<R> Drop for ProgressReader<'_, R> {
    fn drop(&mut self) {
        self.flush_progress();
    }
}
