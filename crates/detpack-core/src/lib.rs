//! Deterministic, byte-reproducible packing of directory trees.
//!
//! `detpack-core` snapshots a directory into a zip or tar archive whose bytes
//! depend only on the packed file names and contents: files are discovered
//! through glob patterns, sorted by relative path, and written with a fixed
//! timestamp and fixed permissions. Packing the same tree twice, at any time,
//! produces identical archives, which makes the output safe to content-hash.
//!
//! # Examples
//!
//! ```no_run
//! use detpack_core::PackRequest;
//! use detpack_core::pack_blocking;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = PackRequest::new("build/lambda", "dist/lambda.zip")
//!     .with_exclude(vec!["**/*.test.js".to_string()])
//!     .with_include(vec!["package.json".into()]);
//! let report = pack_blocking(&request)?;
//! println!("Packed {} entries", report.total_entries());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod discovery;
pub mod error;
pub mod format;
pub mod progress;
pub mod report;
pub mod request;
pub mod writer;

// Re-export main API types
pub use api::pack;
pub use api::pack_blocking;
pub use api::pack_dir;
pub use api::pack_with_progress;
pub use api::plan;
pub use discovery::EntryOrigin;
pub use discovery::FileEntry;
pub use error::ErrorCategory;
pub use error::PackError;
pub use error::Result;
pub use format::ArchiveFormat;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
pub use report::PackReport;
pub use request::PackRequest;
