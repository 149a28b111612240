//! Deterministic ZIP writer.
//!
//! DOS timestamps cannot represent 1970, so zip entries carry the earliest
//! representable time, 1980-01-01 00:00:00, instead of epoch zero.
//!
//! Entries whose source size reaches the 32-bit limit are written with
//! ZIP64 extensions. The switch depends only on the size, so the output
//! stays reproducible.

use super::EntrySink;
use super::FILE_MODE;
use crate::Result;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// ZIP archive sink.
pub struct ZipSink<W: Write + Seek> {
    zip: ZipWriter<W>,
    compression_level: u8,
}

impl<W: Write + Seek> ZipSink<W> {
    /// Wraps `writer` in a zip writer using Deflate at `compression_level`.
    pub fn new(writer: W, compression_level: u8) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            compression_level,
        }
    }
}

/// Size at which an entry needs ZIP64 size fields.
pub const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Returns `true` if an entry of `size` source bytes must be written as
/// ZIP64.
#[must_use]
pub const fn needs_zip64(size: u64) -> bool {
    size >= ZIP64_THRESHOLD
}

/// Builds the options for one zip entry of `size` source bytes.
#[must_use]
pub fn entry_options(compression_level: u8, size: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(compression_level)))
        .last_modified_time(DateTime::default())
        .unix_permissions(FILE_MODE)
        .large_file(needs_zip64(size))
}

impl<W: Write + Seek> EntrySink for ZipSink<W> {
    type Inner = W;

    fn append(&mut self, name: &str, size: u64, content: &mut dyn Read) -> Result<()> {
        self.zip
            .start_file(name, entry_options(self.compression_level, size))?;
        std::io::copy(content, &mut self.zip)?;
        Ok(())
    }

    fn finish(self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}
