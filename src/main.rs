//! Binary entry point for the repackage CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Run from the Android module directory (the one containing src/main/java)
//! repackage com.old.app com.new.app
//!
//! # Also rewrite the proguard rules file wherever it appears
//! repackage com.old.app com.new.app proguard-rules.pro
//!
//! # Machine-readable report
//! repackage --format json com.old.app com.new.app
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: renamed
//! - `2`: invalid arguments
//! - `3`: old package directory not found. Nothing was changed, but the run
//!   is reported as a failure rather than a silent success.
//! - `4`: I/O failure while rewriting or moving (project may be partial)
//! - `10`: internal error

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use repackage::cli::{build_config, report_error, run_rename, OutputFormat};
use repackage::config::WriteMode;
use repackage::error::{OutputErrorCode, RepackageError};

// ============================================================================
// CLI Structure
// ============================================================================

/// Rename the Java package of an Android project.
///
/// Rewrites the old package string in every .java, .xml and .gradle file
/// (outside `build` directories), then moves src/main/java/<old> to
/// src/main/java/<new>. There is no undo: commit or back up first.
#[derive(Parser, Debug)]
#[command(name = "repackage", version)]
struct Cli {
    /// Package to rename (e.g. com.example.old).
    old_package: String,

    /// New package name (e.g. com.example.new).
    new_package: String,

    /// Extra filename to rewrite wherever it appears (e.g. proguard-rules.pro).
    proguard: Option<String>,

    /// Project root (default: current directory).
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Truncate and rewrite files directly instead of replacing them atomically.
    #[arg(long)]
    in_place: bool,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Emit log events as JSON lines.
    #[arg(long)]
    log_json: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level, cli.log_json);

    let format = cli.format;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = report_error(&err, format, &mut io::stdout(), &mut io::stderr());
            ExitCode::from(OutputErrorCode::from(&err).code())
        }
    }
}

/// Initialize tracing subscriber. `RUST_LOG` overrides `--log-level`.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn execute(cli: Cli) -> Result<(), RepackageError> {
    let root = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| {
            RepackageError::internal(format!("cannot determine current directory: {}", e))
        })?,
    };

    let write_mode = if cli.in_place {
        WriteMode::InPlace
    } else {
        WriteMode::Atomic
    };
    let config = build_config(&cli.old_package, &cli.new_package, cli.proguard, write_mode)?;

    run_rename(
        &root,
        config,
        cli.format,
        &mut io::stdout(),
        &mut io::stderr(),
    )?;
    Ok(())
}
