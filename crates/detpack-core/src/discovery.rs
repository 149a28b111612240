//! File discovery with glob-based exclusion.
//!
//! Discovery resolves the pattern list `["**", "!<exclude>"...]` against the
//! input directory and turns every surviving file into a [`FileEntry`]. The
//! resulting list is sorted by relative path so that the archive layout only
//! depends on the directory's contents, never on the order in which the file
//! system lists them.

use crate::PackError;
use crate::PackRequest;
use crate::Result;
use globset::GlobBuilder;
use globset::GlobSet;
use globset::GlobSetBuilder;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Pattern that selects every file under the input directory.
pub const CATCH_ALL_PATTERN: &str = "**";

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Found by walking the input directory.
    Discovered,
    /// Listed explicitly by the caller.
    Included,
}

/// A file scheduled for packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Where the content is read from.
    pub input_path: PathBuf,

    /// Name stored in the archive, `/`-separated.
    pub archive_name: String,

    /// Whether the entry was discovered or explicitly included.
    pub origin: EntryOrigin,
}

/// Builds the discovery pattern list for the given excludes.
///
/// # Examples
///
/// ```
/// use detpack_core::discovery::pattern_list;
///
/// let patterns = pattern_list(&["*.log".to_string(), "tmp/**".to_string()]);
/// assert_eq!(patterns, vec!["**", "!*.log", "!tmp/**"]);
/// ```
#[must_use]
pub fn pattern_list(exclude: &[String]) -> Vec<String> {
    std::iter::once(CATCH_ALL_PATTERN.to_string())
        .chain(exclude.iter().map(|pattern| format!("!{pattern}")))
        .collect()
}

/// Compiled set of exclude patterns.
///
/// Patterns are matched against `/`-separated paths relative to the input
/// directory. `*` does not cross directory boundaries, so `*.log` only
/// excludes top-level logs while `**/*.log` excludes them at any depth.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    set: GlobSet,
}

impl ExcludeMatcher {
    /// Compiles the exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidPattern` for the first pattern that is not
    /// a valid glob.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| PackError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.kind().to_string(),
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| PackError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        })?;
        Ok(Self { set })
    }

    /// Returns `true` if the relative path matches any exclude pattern.
    #[must_use]
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.set.is_match(relative)
    }

    /// Returns `true` if no patterns were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Checks if a file name is hidden (starts with `.`).
#[must_use]
pub fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

/// Discovers, filters and sorts the files under `request.input_dir`.
///
/// Directories are never returned. A directory matching an exclude pattern
/// is skipped along with everything below it.
///
/// # Errors
///
/// Returns `PackError::Discovery` if the input directory is missing, is not
/// a directory, cannot be traversed, or contains a non-UTF-8 name.
pub fn discover(request: &PackRequest, matcher: &ExcludeMatcher) -> Result<Vec<FileEntry>> {
    let root = request.input_dir.as_path();
    check_root(root)?;

    let walker = WalkDir::new(root)
        .follow_links(request.follow_symlinks)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, root, request, matcher));

    let mut matched = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_dangling_symlink(&e) => {
                debug!(path = ?e.path(), "skipping dangling symlink");
                continue;
            }
            Err(e) => {
                return Err(PackError::Discovery {
                    path: e.path().unwrap_or(root).to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            // Only reachable when links are not followed.
            debug!(path = %entry.path().display(), "skipping symlink");
            continue;
        }

        let relative = relative_name(entry.path(), root)?;
        if matcher.is_excluded(&relative) {
            continue;
        }
        matched.push((relative, entry.into_path()));
    }

    // Byte order of the relative names is part of the output contract.
    matched.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let prefix = request.normalized_prefix();
    let entries: Vec<FileEntry> = matched
        .into_iter()
        .map(|(relative, input_path)| FileEntry {
            input_path,
            archive_name: match &prefix {
                Some(prefix) => format!("{prefix}/{relative}"),
                None => relative,
            },
            origin: EntryOrigin::Discovered,
        })
        .collect();

    debug!(
        root = %root.display(),
        files = entries.len(),
        patterns = ?pattern_list(&request.exclude),
        "discovered files"
    );

    Ok(entries)
}

/// Builds entries for the explicitly included files, in the given order.
///
/// Each file is stored under its base name. The files are not opened here;
/// a missing file fails later, when its content is appended.
///
/// # Errors
///
/// Returns `PackError::InvalidEntryName` if a path has no UTF-8 file name.
pub fn included_entries(include: &[PathBuf]) -> Result<Vec<FileEntry>> {
    include
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| PackError::InvalidEntryName { path: path.clone() })?;
            Ok(FileEntry {
                input_path: path.clone(),
                archive_name: name.to_string(),
                origin: EntryOrigin::Included,
            })
        })
        .collect()
}

/// Returns every entry of the request in archive order: discovered files
/// sorted by relative path, then included files in caller order.
///
/// # Errors
///
/// Returns an error if the patterns are invalid, discovery fails, or an
/// include path has no file name.
pub fn collect_entries(request: &PackRequest) -> Result<Vec<FileEntry>> {
    let matcher = ExcludeMatcher::new(&request.exclude)?;
    let mut entries = discover(request, &matcher)?;
    entries.extend(included_entries(&request.include)?);
    Ok(entries)
}

fn check_root(root: &Path) -> Result<()> {
    let metadata = std::fs::metadata(root).map_err(|e| PackError::Discovery {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(PackError::Discovery {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

fn is_pruned(
    entry: &DirEntry,
    root: &Path,
    request: &PackRequest,
    matcher: &ExcludeMatcher,
) -> bool {
    if !request.include_hidden && is_hidden(entry.file_name()) {
        return true;
    }
    if !entry.file_type().is_dir() || matcher.is_empty() {
        return false;
    }
    // Names that fail to render are reported by the main loop.
    relative_name(entry.path(), root).is_ok_and(|relative| matcher.is_excluded(&relative))
}

/// A followed link whose target is gone is not a file, so it is skipped
/// rather than failing the walk.
fn is_dangling_symlink(err: &walkdir::Error) -> bool {
    let not_found = err
        .io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
    not_found
        && err.path().is_some_and(|path| {
            std::fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
        })
}

/// Renders `path` relative to `root` with `/` separators.
fn relative_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| PackError::Discovery {
        path: path.to_path_buf(),
        reason: format!("not under input directory {}", root.display()),
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| PackError::Discovery {
                path: path.to_path_buf(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
