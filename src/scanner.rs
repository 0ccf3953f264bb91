//! Recursive file enumeration.
//!
//! Walks a source tree and yields every regular file whose basename passes
//! the compiled filter. Directories are always descended, even when their
//! own names would match an exclusion pattern; unreadable entries are
//! skipped. Sibling ordering is whatever the filesystem reports.

use crate::config::BasenameFilter;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Lazily enumerates the regular files under `root` that pass `filter`.
///
/// Each file appears exactly once; symlinks are not followed.
pub fn scan<'a>(
    root: &'a Path,
    filter: &'a BasenameFilter,
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| filter.is_match(&entry.file_name().to_string_lossy()))
}
