//! File classification and in-place package substitution.
//!
//! Substitution is a naive literal replacement: every occurrence of the old
//! package string is replaced, with no awareness of Java, XML or Gradle
//! syntax and no word-boundary check. An old package that is a substring of
//! an unrelated identifier gets rewritten too.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{RenameConfig, WriteMode};
use crate::error::{IoContext, IoOp, RepackageError, RepackageResult};

// ============================================================================
// Content Hash
// ============================================================================

/// SHA-256 hash of file content, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(pub String);

impl ContentHash {
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentHash(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// What the rewrite phase does with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    /// Recognized source/build suffix.
    Rewrite,
    /// The configured proguard file.
    Proguard,
    /// Left alone.
    Ignore,
}

/// Decide the action for a file by name. Suffix matches win over the
/// proguard name.
pub fn classify(file_name: &str, config: &RenameConfig) -> FileAction {
    if config.is_rewrite_target(file_name) {
        FileAction::Rewrite
    } else if config.is_proguard(file_name) {
        FileAction::Proguard
    } else {
        FileAction::Ignore
    }
}

// ============================================================================
// Substitution
// ============================================================================

/// Replace every non-overlapping occurrence of `old` with `new`, left to right.
///
/// Returns the new content and the number of replacements. An empty `old`
/// is never matched.
pub fn substitute(content: &str, old: &str, new: &str) -> (String, usize) {
    if old.is_empty() {
        return (content.to_string(), 0);
    }
    let count = content.matches(old).count();
    if count == 0 {
        return (content.to_string(), 0);
    }
    (content.replace(old, new), count)
}

/// Result of rewriting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub path: PathBuf,
    pub replacements: usize,
    pub before: ContentHash,
    pub after: ContentHash,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        self.replacements > 0
    }
}

/// Substitute `old` with `new` in the file at `path`.
///
/// The whole file is read as UTF-8 before anything is written. When nothing
/// matches the file is not written at all.
pub fn rewrite_file(path: &Path, old: &str, new: &str, mode: WriteMode) -> RepackageResult<RewriteOutcome> {
    let content = read_text(path)?;
    let before = ContentHash::compute(content.as_bytes());
    let (rewritten, replacements) = substitute(&content, old, new);

    if replacements == 0 {
        return Ok(RewriteOutcome {
            path: path.to_path_buf(),
            replacements,
            after: before.clone(),
            before,
        });
    }

    match mode {
        WriteMode::InPlace => write_in_place(path, rewritten.as_bytes())?,
        WriteMode::Atomic => atomic_write(path, rewritten.as_bytes())?,
    }

    Ok(RewriteOutcome {
        path: path.to_path_buf(),
        replacements,
        before,
        after: ContentHash::compute(rewritten.as_bytes()),
    })
}

fn read_text(path: &Path) -> RepackageResult<String> {
    let mut file = File::open(path).with_io(IoOp::Read, path)?;
    let mut content = String::new();
    file.read_to_string(&mut content).with_io(IoOp::Read, path)?;
    Ok(content)
}

/// Truncate and overwrite. Not atomic.
fn write_in_place(path: &Path, content: &[u8]) -> RepackageResult<()> {
    let mut file = File::create(path).with_io(IoOp::Write, path)?;
    file.write_all(content).with_io(IoOp::Write, path)?;
    file.flush().with_io(IoOp::Write, path)
}

/// Write content via a hidden sibling temp file renamed over the target.
///
/// Readers see either the old or the new content. If the process dies before
/// the rename, the temp file is orphaned next to the original. Symlinks are
/// resolved so the link target is replaced, not the link. The original
/// permissions are copied onto the replacement.
///
/// A read-only target is refused with `PermissionDenied` even though the
/// rename itself would only need write access to the directory.
fn atomic_write(path: &Path, content: &[u8]) -> RepackageResult<()> {
    let is_link = fs::symlink_metadata(path)
        .with_io(IoOp::Metadata, path)?
        .file_type()
        .is_symlink();
    let target = if is_link {
        fs::canonicalize(path).with_io(IoOp::Metadata, path)?
    } else {
        path.to_path_buf()
    };
    let permissions = fs::metadata(&target)
        .with_io(IoOp::Metadata, &target)?
        .permissions();
    if permissions.readonly() {
        return Err(RepackageError::io(
            IoOp::Write,
            target,
            io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
        ));
    }

    let pid = std::process::id();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = target.with_file_name(format!(
        ".{}.{}.{}.tmp",
        target.file_name().unwrap_or_default().to_string_lossy(),
        pid,
        timestamp
    ));

    {
        let mut file = File::create(&temp_path).with_io(IoOp::Write, &temp_path)?;
        file.write_all(content).with_io(IoOp::Write, &temp_path)?;
        file.sync_all().with_io(IoOp::Write, &temp_path)?;
    }
    fs::set_permissions(&temp_path, permissions).with_io(IoOp::Write, &temp_path)?;
    fs::rename(&temp_path, &target).with_io(IoOp::Move, &target)
}
