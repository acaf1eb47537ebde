//! Java package names and the conventional source layout.
//!
//! A package `com.example.app` lives at `<root>/src/main/java/com/example/app`.
//! Package strings are taken as-is: no identifier validation is performed.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{RepackageError, RepackageResult};

/// Separator between package segments.
pub const PACKAGE_SEPARATOR: char = '.';

/// Path components of the Java source root, relative to the project root.
pub const JAVA_SOURCE_ROOT: [&str; 3] = ["src", "main", "java"];

/// A dot-delimited Java package name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Wrap a package string without validating its segments.
    pub fn new(name: impl Into<String>) -> Self {
        PackageName(name.into())
    }

    /// Parse a package argument, rejecting only the empty string.
    pub fn parse(name: &str) -> RepackageResult<Self> {
        if name.is_empty() {
            return Err(RepackageError::invalid_args("package name must not be empty"));
        }
        Ok(PackageName::new(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `com.old.app` -> `com/old/app` using the platform separator.
    pub fn to_relative_path(&self) -> PathBuf {
        self.0.split(PACKAGE_SEPARATOR).collect()
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<root>/src/main/java`
pub fn java_source_root(root: &Path) -> PathBuf {
    JAVA_SOURCE_ROOT
        .iter()
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

/// `<root>/src/main/java/<package as path>`
pub fn package_dir(root: &Path, package: &PackageName) -> PathBuf {
    java_source_root(root).join(package.to_relative_path())
}
