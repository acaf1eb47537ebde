//! Error types and exit code mapping for repackage.
//!
//! Every failure in the core surfaces as a [`RepackageError`] and propagates
//! unchanged to the binary. Nothing is retried or compensated: a failure in
//! the middle of a run leaves the project partially renamed.
//!
//! ## Exit Codes
//!
//! - `2`: Invalid arguments (bad input from caller)
//! - `3`: Precondition failure (old package directory not found, nothing mutated)
//! - `4`: Apply errors (I/O while rewriting or moving, project may be partial)
//! - `10`: Internal errors (bugs, unexpected state)

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Stable numeric codes used as process exit codes and in JSON error output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller.
    InvalidArguments = 2,
    /// The old package directory does not exist.
    PreconditionFailed = 3,
    /// Failed while rewriting files or moving directories.
    ApplyError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Filesystem operation that failed, carried in [`RepackageError::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Read,
    Write,
    Move,
    Remove,
    CreateDir,
    Metadata,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IoOp::Read => "read",
            IoOp::Write => "write",
            IoOp::Move => "move",
            IoOp::Remove => "remove",
            IoOp::CreateDir => "create directory",
            IoOp::Metadata => "stat",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum RepackageError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The old package's source directory does not exist.
    #[error("original folder not found at {}", path.display())]
    SourceDirMissing { path: PathBuf },

    /// A filesystem operation failed.
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tree walk could not read an entry.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The fixed staging directory name is already taken at the project root.
    #[error("staging path already exists: {}", path.display())]
    StagingCollision { path: PathBuf },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Result type for repackage operations.
pub type RepackageResult<T> = Result<T, RepackageError>;

impl RepackageError {
    pub fn invalid_args(message: impl Into<String>) -> Self {
        RepackageError::InvalidArguments {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RepackageError::Internal {
            message: message.into(),
        }
    }

    /// Wrap an `io::Error` with the operation and path it failed on.
    pub fn io(op: IoOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        RepackageError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Whether the project is guaranteed untouched after this error.
    pub fn is_clean(&self) -> bool {
        matches!(
            self,
            RepackageError::InvalidArguments { .. } | RepackageError::SourceDirMissing { .. }
        )
    }
}

impl From<&RepackageError> for OutputErrorCode {
    fn from(err: &RepackageError) -> Self {
        match err {
            RepackageError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            RepackageError::SourceDirMissing { .. } => OutputErrorCode::PreconditionFailed,
            RepackageError::Io { .. } => OutputErrorCode::ApplyError,
            RepackageError::Walk(_) => OutputErrorCode::ApplyError,
            RepackageError::StagingCollision { .. } => OutputErrorCode::ApplyError,
            RepackageError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<RepackageError> for OutputErrorCode {
    fn from(err: RepackageError) -> Self {
        OutputErrorCode::from(&err)
    }
}

/// Attach operation and path context to `io::Result`s.
pub(crate) trait IoContext<T> {
    fn with_io(self, op: IoOp, path: impl Into<PathBuf>) -> RepackageResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn with_io(self, op: IoOp, path: impl Into<PathBuf>) -> RepackageResult<T> {
        self.map_err(|e| RepackageError::io(op, path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_exit_codes() {
        let missing = RepackageError::SourceDirMissing {
            path: PathBuf::from("src/main/java/com/old"),
        };
        assert_eq!(OutputErrorCode::from(&missing).code(), 3);

        let io_err = RepackageError::io(
            IoOp::Write,
            "Main.java",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(OutputErrorCode::from(&io_err).code(), 4);

        let staging = RepackageError::StagingCollision {
            path: PathBuf::from("my_temporal_folder"),
        };
        assert_eq!(OutputErrorCode::from(staging).code(), 4);

        assert_eq!(
            OutputErrorCode::from(RepackageError::invalid_args("empty")).code(),
            2
        );
        assert_eq!(
            OutputErrorCode::from(RepackageError::internal("bug")).code(),
            10
        );
    }

    #[test]
    fn io_error_message_names_operation_and_path() {
        let err = RepackageError::io(
            IoOp::Move,
            "/project/src/main/java/com/old",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("failed to move /project/src/main/java/com/old"));
        assert!(msg.ends_with("gone"));
    }

    #[test]
    fn only_argument_and_precondition_errors_are_clean() {
        assert!(RepackageError::invalid_args("x").is_clean());
        assert!(RepackageError::SourceDirMissing {
            path: PathBuf::from("x")
        }
        .is_clean());
        assert!(!RepackageError::internal("x").is_clean());
        assert!(!RepackageError::StagingCollision {
            path: PathBuf::from("x")
        }
        .is_clean());
    }
}
