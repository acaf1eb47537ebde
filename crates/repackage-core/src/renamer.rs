//! Package rename orchestration.
//!
//! A run is a linear pipeline:
//!
//! 1. [`PackageRenamer::validate_source_layout`] checks the old package
//!    directory exists. This is the only gate; failing it mutates nothing.
//! 2. [`PackageRenamer::rewrite_tree`] substitutes the package string in every
//!    recognized file outside excluded directories.
//! 3. [`PackageRenamer::relocate_sources`] moves the package directory.
//!
//! Any error after step 1 aborts the run where it stands. Files rewritten
//! before the failure stay rewritten.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::config::RenameConfig;
use crate::error::{RepackageError, RepackageResult};
use crate::output::{RenameReport, RewrittenFile, SCHEMA_VERSION};
use crate::package::package_dir;
use crate::relocate::{relocate, Relocation};
use crate::rewrite::{classify, rewrite_file, FileAction};
use crate::walk::{dir_named, relative_display, walk_files};

/// Outcome of the rewrite phase.
#[derive(Debug, Clone, Default)]
pub struct TreeRewrite {
    pub rewritten: Vec<RewrittenFile>,
    pub unchanged_files: usize,
    pub ignored_files: usize,
}

/// Renames one package in one project.
#[derive(Debug, Clone)]
pub struct PackageRenamer {
    root: PathBuf,
    config: RenameConfig,
}

impl PackageRenamer {
    pub fn new(root: impl Into<PathBuf>, config: RenameConfig) -> Self {
        PackageRenamer {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Check that `src/main/java/<old package>` is an existing directory.
    pub fn validate_source_layout(&self) -> RepackageResult<PathBuf> {
        info!("Checking original package...");
        let source = package_dir(&self.root, &self.config.old_package);
        if source.is_dir() {
            info!("Original folder exists: {}", source.display());
            Ok(source)
        } else {
            Err(RepackageError::SourceDirMissing { path: source })
        }
    }

    /// Substitute the old package with the new one across the project tree.
    pub fn rewrite_tree(&self) -> RepackageResult<TreeRewrite> {
        let old = self.config.old_package.as_str();
        let new = self.config.new_package.as_str();
        let mut result = TreeRewrite::default();

        for entry in walk_files(&self.root, dir_named(self.config.excluded_dir.as_str())) {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy();
            let rel = relative_display(&self.root, path);

            let action = classify(&name, &self.config);
            if action == FileAction::Ignore {
                debug!("Ignoring file: {}", rel);
                result.ignored_files += 1;
                continue;
            }

            let outcome = rewrite_file(path, old, new, self.config.write_mode)?;
            if action == FileAction::Proguard {
                info!("Proguard changed: {}", rel);
            }
            if !outcome.changed() {
                debug!("No occurrences in {}", rel);
                result.unchanged_files += 1;
                continue;
            }

            info!("Rewrote {} ({} replacements)", rel, outcome.replacements);
            result.rewritten.push(RewrittenFile {
                path: rel,
                kind: action,
                replacements: outcome.replacements,
                before_hash: outcome.before,
                after_hash: outcome.after,
            });
        }

        Ok(result)
    }

    /// Move the old package directory to the new package path.
    pub fn relocate_sources(&self) -> RepackageResult<Relocation> {
        relocate(&self.root, &self.config)
    }

    /// Validate, rewrite, then relocate.
    pub fn run(&self) -> RepackageResult<RenameReport> {
        self.validate_source_layout()?;
        let tree = self.rewrite_tree()?;
        let relocation = self.relocate_sources()?;

        Ok(RenameReport {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            old_package: self.config.old_package.clone(),
            new_package: self.config.new_package.clone(),
            proguard: self.config.proguard.clone(),
            project_root: self.root.clone(),
            rewritten: tree.rewritten,
            unchanged_files: tree.unchanged_files,
            ignored_files: tree.ignored_files,
            relocation,
            finished_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}
