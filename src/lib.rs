//! repackage: rename the Java package of an Android project.
//!
//! Rewrites every occurrence of the old package in `.java`, `.xml` and
//! `.gradle` files (plus an optional proguard file), then moves
//! `src/main/java/<old>` to `src/main/java/<new>`.

// Core infrastructure - re-exported from repackage-core
pub use repackage_core::config;
pub use repackage_core::error;
pub use repackage_core::output;
pub use repackage_core::package;
pub use repackage_core::relocate;
pub use repackage_core::renamer;
pub use repackage_core::rewrite;
pub use repackage_core::walk;

// Front door
pub mod cli;
