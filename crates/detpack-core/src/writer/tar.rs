//! Deterministic TAR writer.
//!
//! Entries use ustar headers with zeroed ownership, fixed mode and an mtime
//! of Unix epoch zero. Names longer than the ustar limit are handled by the
//! `tar` crate's long-name extension, which is itself deterministic.

use super::EntrySink;
use super::FILE_MODE;
use super::FIXED_MTIME;
use crate::Result;
use std::io::Read;
use std::io::Write;
use tar::Builder;
use tar::EntryType;
use tar::Header;
use tar::HeaderMode;

/// TAR archive sink.
pub struct TarSink<W: Write> {
    builder: Builder<W>,
}

impl<W: Write> TarSink<W> {
    /// Wraps `writer` in a tar builder.
    pub fn new(writer: W) -> Self {
        let mut builder = Builder::new(writer);
        builder.mode(HeaderMode::Deterministic);
        Self { builder }
    }
}

/// Builds the header shared by every tar entry, differing only in size.
#[must_use]
pub fn entry_header(size: u64) -> Header {
    let mut header = Header::new_ustar();
    header.set_entry_type(EntryType::Regular);
    header.set_size(size);
    header.set_mode(FILE_MODE);
    header.set_uid(0);
    header.set_gid(0);
    header.set_mtime(FIXED_MTIME);
    header
}

impl<W: Write> EntrySink for TarSink<W> {
    type Inner = W;

    fn append(&mut self, name: &str, size: u64, content: &mut dyn Read) -> Result<()> {
        let mut header = entry_header(size);
        // append_data sets the path and checksum.
        self.builder
            .append_data(&mut header, name, content.take(size))?;
        Ok(())
    }

    fn finish(self) -> Result<W> {
        Ok(self.builder.into_inner()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut sink = TarSink::new(Vec::new());
        for (name, data) in entries {
            let mut content = Cursor::new(data.as_bytes());
            sink.append(name, data.len() as u64, &mut content).unwrap();
        }
        sink.finish().unwrap()
    }

    #[test]
    fn test_entry_header_fixed_metadata() {
        let header = entry_header(42);
        assert_eq!(header.size().unwrap(), 42);
        assert_eq!(header.mode().unwrap(), FILE_MODE);
        assert_eq!(header.mtime().unwrap(), 0);
        assert_eq!(header.uid().unwrap(), 0);
        assert_eq!(header.gid().unwrap(), 0);
        assert_eq!(header.entry_type(), EntryType::Regular);
    }

    #[test]
    fn test_tar_sink_writes_entries_in_order() {
        let data = build(&[("b.txt", "bee"), ("a/c.txt", "sea")]);

        let mut archive = tar::Archive::new(Cursor::new(data));
        let mut seen = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            assert_eq!(entry.header().mtime().unwrap(), 0);
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            seen.push((name, body));
        }

        assert_eq!(
            seen,
            vec![
                ("b.txt".to_string(), "bee".to_string()),
                ("a/c.txt".to_string(), "sea".to_string()),
            ]
        );
    }

    #[test]
    fn test_tar_sink_long_names() {
        let long = format!("{}/file.txt", "d".repeat(150));
        let data = build(&[(long.as_str(), "x")]);

        let mut archive = tar::Archive::new(Cursor::new(data));
        let entry = archive.entries().unwrap().next().unwrap().unwrap();
        assert_eq!(entry.path().unwrap().to_string_lossy(), long);
    }

    #[test]
    fn test_tar_sink_is_byte_stable() {
        let first = build(&[("a.txt", "same")]);
        let second = build(&[("a.txt", "same")]);
        assert_eq!(first, second);
    }
}
