//! Packing request and its options.

use crate::PackError;
use crate::Result;
use crate::format::ArchiveFormat;
use std::path::Path;
use std::path::PathBuf;

/// Highest compression level, used unless overridden.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Describes a single packing operation.
///
/// A request names the directory to snapshot, the archive to write (whose
/// extension selects zip or tar), extra standalone files to append, exclude
/// globs, and an optional in-archive prefix.
///
/// # Examples
///
/// ```
/// use detpack_core::PackRequest;
///
/// let request = PackRequest::new("build/lambda", "dist/lambda.zip")
///     .with_exclude(vec!["**/*.map".to_string()])
///     .with_include(vec!["LICENSE".into()])
///     .with_prefix(Some("app".into()));
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRequest {
    /// Directory whose files are discovered and packed.
    pub input_dir: PathBuf,

    /// Archive to create. Its final extension must be `zip` or `tar`.
    pub output_path: PathBuf,

    /// Extra files appended after the discovered ones, in order, each stored
    /// under its base name.
    pub include: Vec<PathBuf>,

    /// Glob patterns, relative to `input_dir`, removing files from
    /// discovery.
    pub exclude: Vec<String>,

    /// Path segment prepended to every discovered file's archive name.
    pub prefix: Option<PathBuf>,

    /// Compression level (1-9). Only zip applies it.
    ///
    /// Default: `9`.
    pub compression_level: u8,

    /// Match files and directories whose name starts with `.`.
    ///
    /// Default: `false`.
    pub include_hidden: bool,

    /// Follow symbolic links while discovering files.
    ///
    /// Default: `true`. Linked files are stored with their target's content.
    pub follow_symlinks: bool,
}

impl PackRequest {
    /// Creates a request with no extra files, no excludes and no prefix.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            prefix: None,
            compression_level: MAX_COMPRESSION_LEVEL,
            include_hidden: false,
            follow_symlinks: true,
        }
    }

    /// Sets the extra files to append.
    #[must_use]
    pub fn with_include(mut self, include: Vec<PathBuf>) -> Self {
        self.include = include;
        self
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Sets the in-archive prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Option<PathBuf>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = level;
        self
    }

    /// Sets whether dot-files are matched.
    #[must_use]
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether symlinks are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Returns the archive format selected by the output path.
    ///
    /// # Errors
    ///
    /// Returns `PackError::UnsupportedFormat` if the output extension is not
    /// `zip` or `tar`.
    pub fn format(&self) -> Result<ArchiveFormat> {
        ArchiveFormat::from_path(&self.output_path)
    }

    /// Returns the prefix normalized like a path join (`a//b/./c/..` becomes
    /// `a/b`), or `None` when it is absent or resolves to nothing.
    #[must_use]
    pub fn normalized_prefix(&self) -> Option<String> {
        let prefix = self.prefix.as_deref()?;
        normalize_prefix(prefix)
    }

    /// Checks the request without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output extension is not `zip` or `tar`
    /// - The compression level is not in range 1-9
    pub fn validate(&self) -> Result<ArchiveFormat> {
        let format = self.format()?;
        if !(1..=9).contains(&self.compression_level) {
            return Err(PackError::InvalidConfiguration {
                reason: format!(
                    "compression level must be 1-9, got {}",
                    self.compression_level
                ),
            });
        }
        Ok(format)
    }
}

/// Collapses empty and `.` segments and resolves `..` against the segment
/// before it, keeping a leading `/`.
fn normalize_prefix(prefix: &Path) -> Option<String> {
    let text = prefix.to_string_lossy();
    let absolute = text.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in text.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return None;
    }
    let joined = segments.join("/");
    Some(if absolute { format!("/{joined}") } else { joined })
}
