//! Run reports and their text/JSON rendering.
//!
//! JSON output is opt-in (`--format json`). The text rendering is what an
//! operator sees by default.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{OutputErrorCode, RepackageError};
use crate::package::PackageName;
use crate::relocate::Relocation;
use crate::rewrite::{ContentHash, FileAction};

/// Schema version of the JSON report.
pub const SCHEMA_VERSION: &str = "1";

/// A file whose content was changed by the rewrite phase.
#[derive(Debug, Clone, Serialize)]
pub struct RewrittenFile {
    /// Path relative to the project root, forward slashes.
    pub path: String,
    /// `rewrite` or `proguard`.
    pub kind: FileAction,
    pub replacements: usize,
    pub before_hash: ContentHash,
    pub after_hash: ContentHash,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    /// Status: "ok".
    pub status: String,
    pub schema_version: String,
    pub old_package: PackageName,
    pub new_package: PackageName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proguard: Option<String>,
    pub project_root: PathBuf,
    pub rewritten: Vec<RewrittenFile>,
    /// Recognized files that contained no occurrence of the old package.
    pub unchanged_files: usize,
    /// Files left alone because of their name.
    pub ignored_files: usize,
    pub relocation: Relocation,
    /// Completion time, RFC 3339 UTC.
    pub finished_at: String,
}

impl RenameReport {
    pub fn total_replacements(&self) -> usize {
        self.rewritten.iter().map(|f| f.replacements).sum()
    }
}

/// Error information carried in [`ErrorResponse`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: u8,
    pub message: String,
    /// Whether the project is known to be untouched.
    pub clean: bool,
}

impl ErrorInfo {
    pub fn from_error(err: &RepackageError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
            clean: err.is_clean(),
        }
    }
}

/// JSON error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn from_error(err: &RepackageError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Emit a response as pretty JSON followed by a newline.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Human-readable summary of a report.
pub fn render_text(report: &RenameReport) -> String {
    let mut out = String::new();
    for file in &report.rewritten {
        let label = match file.kind {
            FileAction::Proguard => " (proguard)",
            _ => "",
        };
        out.push_str(&format!(
            "rewrote {}{}: {} replacement{}\n",
            file.path,
            label,
            file.replacements,
            if file.replacements == 1 { "" } else { "s" }
        ));
    }
    out.push_str(&format!(
        "{} file(s) rewritten, {} replacement(s), {} unchanged, {} ignored\n",
        report.rewritten.len(),
        report.total_replacements(),
        report.unchanged_files,
        report.ignored_files
    ));
    out.push_str(&format!(
        "new java route: {}\n",
        report.relocation.destination.display()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn report() -> RenameReport {
        let root = Path::new("/project");
        RenameReport {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            old_package: PackageName::new("com.old.app"),
            new_package: PackageName::new("com.new.app"),
            proguard: Some("proguard-rules.pro".to_string()),
            project_root: root.to_path_buf(),
            rewritten: vec![
                RewrittenFile {
                    path: "src/main/java/com/old/app/Main.java".to_string(),
                    kind: FileAction::Rewrite,
                    replacements: 2,
                    before_hash: ContentHash::compute(b"a"),
                    after_hash: ContentHash::compute(b"b"),
                },
                RewrittenFile {
                    path: "proguard-rules.pro".to_string(),
                    kind: FileAction::Proguard,
                    replacements: 1,
                    before_hash: ContentHash::compute(b"c"),
                    after_hash: ContentHash::compute(b"d"),
                },
            ],
            unchanged_files: 3,
            ignored_files: 4,
            relocation: Relocation {
                source: root.join("src/main/java/com/old/app"),
                staging: root.join("my_temporal_folder"),
                destination: root.join("src/main/java/com/new/app"),
            },
            finished_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn report_serializes_expected_fields() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["schema_version"], "1");
        assert_eq!(value["old_package"], "com.old.app");
        assert_eq!(value["new_package"], "com.new.app");
        assert_eq!(value["rewritten"][1]["kind"], "proguard");
        assert_eq!(value["rewritten"][0]["replacements"], 2);
        assert_eq!(value["relocation"]["staging"], "/project/my_temporal_folder");
        assert_eq!(value["unchanged_files"], 3);
    }

    #[test]
    fn proguard_omitted_when_absent() {
        let mut report = report();
        report.proguard = None;
        let value = serde_json::to_value(report).unwrap();
        assert!(value.get("proguard").is_none());
    }

    #[test]
    fn text_rendering_summarizes() {
        let text = render_text(&report());
        assert!(text.contains("rewrote src/main/java/com/old/app/Main.java: 2 replacements"));
        assert!(text.contains("rewrote proguard-rules.pro (proguard): 1 replacement\n"));
        assert!(text.contains("2 file(s) rewritten, 3 replacement(s), 3 unchanged, 4 ignored"));
        assert!(text.contains("new java route: /project/src/main/java/com/new/app"));
    }

    #[test]
    fn error_response_carries_code() {
        let err = RepackageError::SourceDirMissing {
            path: PathBuf::from("/project/src/main/java/com/old"),
        };
        let response = ErrorResponse::from_error(&err);
        let mut buf = Vec::new();
        emit_response(&response, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], 3);
        assert_eq!(value["error"]["clean"], true);
        assert!(buf.ends_with(b"\n"));
    }
}
