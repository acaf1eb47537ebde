//! Project tree traversal.
//!
//! The walk is depth-first. Each directory is listed in full, sorted by
//! name, before any of its entries is yielded, so files replaced by a rename
//! during the walk are never visited twice. Directories matching the
//! exclusion predicate are pruned before their contents are read.
//!
//! Symlinks are followed: a link to a directory is descended into like any
//! other directory, and a link cycle is reported as an error. Dangling links
//! point at nothing to rewrite and are skipped.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::RepackageResult;

/// Lazily yield every non-directory entry under `root`.
///
/// `exclude` is consulted for each directory below the root; returning
/// `true` prunes that directory and everything beneath it. The root itself is
/// always walked. An unreadable entry yields an `Err` in place.
pub fn walk_files<P>(root: &Path, mut exclude: P) -> impl Iterator<Item = RepackageResult<DirEntry>>
where
    P: FnMut(&DirEntry) -> bool,
{
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            if exclude(entry) {
                debug!("Skipping excluded directory: {}", entry.path().display());
                return false;
            }
            debug!("Current directory: {}", entry.path().display());
            true
        })
        .filter_map(|result| match result {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => Some(Ok(entry)),
            Err(e) if is_dangling_link(&e) => {
                if let Some(path) = e.path() {
                    debug!("Skipping dangling symlink: {}", path.display());
                }
                None
            }
            Err(e) => Some(Err(e.into())),
        })
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return false;
    }
    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    not_found
        && err
            .path()
            .and_then(|p| fs::symlink_metadata(p).ok())
            .is_some_and(|m| m.file_type().is_symlink())
}

/// Exclusion predicate: directory whose name is exactly `name`.
pub fn dir_named(name: impl Into<String>) -> impl FnMut(&DirEntry) -> bool {
    let name = name.into();
    move |entry| entry.file_name().to_str() == Some(name.as_str())
}

/// Path of `path` relative to `root`, with forward slashes.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
