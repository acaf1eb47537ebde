//! CLI front door.
//!
//! Turns the positional arguments into a [`RenameConfig`], echoes the
//! resolved parameters, and runs the rename. The binary in `main.rs` only
//! handles argument parsing, logging setup and exit codes.
//!
//! ## Output Streams
//!
//! - Text format: parameters, the precondition diagnostic, the summary and
//!   `finished success` go to stdout.
//! - JSON format: stdout carries only the report or error envelope; the
//!   parameter echo moves to stderr.

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use repackage_core::config::{RenameConfig, WriteMode};
use repackage_core::error::{RepackageError, RepackageResult};
use repackage_core::output::{emit_response, render_text, ErrorResponse, RenameReport};
use repackage_core::package::PackageName;
use repackage_core::renamer::PackageRenamer;

/// Final message of a successful text-mode run.
pub const SUCCESS_MESSAGE: &str = "finished success";

/// Report format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress and summary (default).
    #[default]
    Text,
    /// JSON report on stdout.
    Json,
}

/// Build the run configuration from raw arguments.
pub fn build_config(
    old_package: &str,
    new_package: &str,
    proguard: Option<String>,
    write_mode: WriteMode,
) -> RepackageResult<RenameConfig> {
    let old = PackageName::parse(old_package)?;
    let new = PackageName::new(new_package);
    Ok(RenameConfig::new(old, new)
        .with_proguard(proguard)
        .with_write_mode(write_mode))
}

/// Lines echoed before any mutation so the operator can abort.
pub fn parameter_lines(config: &RenameConfig) -> String {
    format!(
        "old package: {}\nnew package: {}\nproguard: {}\n",
        config.old_package,
        config.new_package,
        config.proguard_display()
    )
}

/// Echo parameters, then run the rename in `root`.
pub fn run_rename(
    root: &Path,
    config: RenameConfig,
    format: OutputFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> RepackageResult<RenameReport> {
    let echo = parameter_lines(&config);
    match format {
        OutputFormat::Text => write_all(out, &echo)?,
        OutputFormat::Json => write_all(err, &echo)?,
    }

    let report = PackageRenamer::new(root, config).run()?;

    match format {
        OutputFormat::Text => {
            write_all(out, &render_text(&report))?;
            writeln!(out, "{}", SUCCESS_MESSAGE).map_err(stdout_error)?;
        }
        OutputFormat::Json => emit_response(&report, out).map_err(stdout_error)?,
    }
    Ok(report)
}

/// Report a failed run in the requested format.
pub fn report_error(
    error: &RepackageError,
    format: OutputFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    match (format, error) {
        (OutputFormat::Json, _) => emit_response(&ErrorResponse::from_error(error), out),
        (OutputFormat::Text, RepackageError::SourceDirMissing { .. }) => {
            writeln!(out, "{}, write a correct original package", error)
        }
        (OutputFormat::Text, _) => {
            writeln!(err, "error: {}", error)?;
            if !error.is_clean() {
                writeln!(
                    err,
                    "the project may be partially renamed; check src/main/java and the staging directory"
                )?;
            }
            Ok(())
        }
    }
}

fn write_all(out: &mut impl Write, text: &str) -> RepackageResult<()> {
    out.write_all(text.as_bytes()).map_err(stdout_error)
}

fn stdout_error(e: io::Error) -> RepackageError {
    RepackageError::internal(format!("failed to write output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("src/main/java/com/old/app");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Main.java"), "package com.old.app;\n").unwrap();
        temp
    }

    #[test]
    fn parameter_echo_names_proguard_or_none() {
        let config = build_config("com.old.app", "com.new.app", None, WriteMode::Atomic).unwrap();
        assert_eq!(
            parameter_lines(&config),
            "old package: com.old.app\nnew package: com.new.app\nproguard: none\n"
        );

        let config = build_config(
            "com.old.app",
            "com.new.app",
            Some("proguard-rules.pro".to_string()),
            WriteMode::Atomic,
        )
        .unwrap();
        assert!(parameter_lines(&config).ends_with("proguard: proguard-rules.pro\n"));
    }

    #[test]
    fn empty_old_package_is_invalid() {
        let err = build_config("", "com.new", None, WriteMode::Atomic).unwrap_err();
        assert!(matches!(err, RepackageError::InvalidArguments { .. }));
    }

    #[test]
    fn text_run_ends_with_success() {
        let temp = project();
        let config = build_config("com.old.app", "com.new.app", None, WriteMode::Atomic).unwrap();
        let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());

        run_rename(temp.path(), config, OutputFormat::Text, &mut out, &mut err).unwrap();

        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.starts_with("old package: com.old.app\n"));
        assert!(stdout.ends_with("finished success\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn json_run_keeps_stdout_parseable() {
        let temp = project();
        let config = build_config("com.old.app", "com.new.app", None, WriteMode::Atomic).unwrap();
        let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());

        run_rename(temp.path(), config, OutputFormat::Json, &mut out, &mut err).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "ok");
        assert!(String::from_utf8(err).unwrap().contains("old package: com.old.app"));
    }

    #[test]
    fn missing_source_diagnostic_in_text() {
        let temp = TempDir::new().unwrap();
        let config = build_config("com.old.app", "com.new.app", None, WriteMode::Atomic).unwrap();
        let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());

        let error = run_rename(temp.path(), config, OutputFormat::Text, &mut out, &mut err)
            .unwrap_err();
        report_error(&error, OutputFormat::Text, &mut out, &mut err).unwrap();

        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.contains("original folder not found at"));
        assert!(stdout.contains("write a correct original package"));
        assert!(!stdout.contains(SUCCESS_MESSAGE));
    }

    #[test]
    fn non_clean_errors_warn_about_partial_state() {
        let error = RepackageError::StagingCollision {
            path: "/p/my_temporal_folder".into(),
        };
        let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());
        report_error(&error, OutputFormat::Text, &mut out, &mut err).unwrap();

        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.starts_with("error: staging path already exists"));
        assert!(stderr.contains("partially renamed"));
        assert!(out.is_empty());
    }
}
