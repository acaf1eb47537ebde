//! Rename configuration.
//!
//! A single [`RenameConfig`] is built once from the parsed arguments and
//! passed by reference into every phase of a run.

use serde::Serialize;

use crate::package::PackageName;

/// Directory name that is never descended into during the walk.
pub const DEFAULT_EXCLUDED_DIR: &str = "build";

/// File suffixes whose content is rewritten.
pub const DEFAULT_EXTENSIONS: [&str; 3] = [".java", ".xml", ".gradle"];

/// Fixed name of the staging directory created at the project root.
pub const DEFAULT_STAGING_DIR: &str = "my_temporal_folder";

/// How rewritten content is written back to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Write a sibling temp file and rename it over the original.
    #[default]
    Atomic,
    /// Truncate the original and write into it. A crash mid-write loses content.
    InPlace,
}

/// Configuration for a package rename run.
#[derive(Debug, Clone)]
pub struct RenameConfig {
    /// Package being renamed.
    pub old_package: PackageName,
    /// Package it becomes.
    pub new_package: PackageName,
    /// Extra filename (e.g. `proguard-rules.pro`) rewritten wherever it appears.
    pub proguard: Option<String>,
    /// How rewritten files are written back.
    pub write_mode: WriteMode,
    /// Directory name pruned from the walk at any depth.
    pub excluded_dir: String,
    /// Case-sensitive suffixes selecting files to rewrite.
    pub extensions: Vec<String>,
    /// Staging directory name at the project root.
    pub staging_dir: String,
}

impl RenameConfig {
    pub fn new(old_package: PackageName, new_package: PackageName) -> Self {
        RenameConfig {
            old_package,
            new_package,
            proguard: None,
            write_mode: WriteMode::default(),
            excluded_dir: DEFAULT_EXCLUDED_DIR.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            staging_dir: DEFAULT_STAGING_DIR.to_string(),
        }
    }

    /// Also rewrite every file with this exact name.
    pub fn with_proguard(mut self, proguard: Option<String>) -> Self {
        self.proguard = proguard;
        self
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    pub fn with_excluded_dir(mut self, name: impl Into<String>) -> Self {
        self.excluded_dir = name.into();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_staging_dir(mut self, name: impl Into<String>) -> Self {
        self.staging_dir = name.into();
        self
    }

    /// Whether `file_name` ends with one of the rewrite suffixes.
    pub fn is_rewrite_target(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    /// Whether `file_name` is exactly the configured proguard file.
    pub fn is_proguard(&self, file_name: &str) -> bool {
        self.proguard.as_deref() == Some(file_name)
    }

    /// Proguard filename for display, `none` when absent.
    pub fn proguard_display(&self) -> &str {
        self.proguard.as_deref().unwrap_or("none")
    }
}
