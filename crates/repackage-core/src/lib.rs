//! Core infrastructure for repackage.
//!
//! This crate renames the Java package of an Android project:
//! - Package names and the `src/main/java` layout
//! - Rename configuration
//! - Project tree traversal with directory exclusion
//! - Literal package substitution in recognized files
//! - Relocation of the package source directory
//! - Orchestration of a full run and its report
//! - Error types and exit codes

pub mod config;
pub mod error;
pub mod output;
pub mod package;
pub mod relocate;
pub mod renamer;
pub mod rewrite;
pub mod walk;
