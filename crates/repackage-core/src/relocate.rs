//! Source directory relocation.
//!
//! The move runs in three steps:
//!
//! 1. Move the old package directory to a staging directory at the project root.
//! 2. Delete the whole `src/main/java` tree.
//! 3. Move the staging directory to the new package path, creating parents.
//!
//! Step 2 removes everything under the Java source root, including packages
//! that were never staged. A project with several top-level packages loses
//! all but the renamed one.
//!
//! A failure in step 3 leaves the Java source root deleted and the package
//! contents orphaned in the staging directory. Nothing is rolled back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::RenameConfig;
use crate::error::{IoContext, IoOp, RepackageError, RepackageResult};
use crate::package::{java_source_root, package_dir};

/// Where the package directory moved from, through, and to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub source: PathBuf,
    pub staging: PathBuf,
    pub destination: PathBuf,
}

impl Relocation {
    /// Compute the paths for `config` under `root` without touching disk.
    pub fn plan(root: &Path, config: &RenameConfig) -> Self {
        Relocation {
            source: package_dir(root, &config.old_package),
            staging: root.join(&config.staging_dir),
            destination: package_dir(root, &config.new_package),
        }
    }
}

/// Move the old package directory to the new package path.
pub fn relocate(root: &Path, config: &RenameConfig) -> RepackageResult<Relocation> {
    let plan = Relocation::plan(root, config);
    let java_root = java_source_root(root);

    if fs::symlink_metadata(&plan.staging).is_ok() {
        return Err(RepackageError::StagingCollision {
            path: plan.staging.clone(),
        });
    }

    info!(
        "Staging {} at {}",
        plan.source.display(),
        plan.staging.display()
    );
    fs::rename(&plan.source, &plan.staging).with_io(IoOp::Move, &plan.source)?;

    info!("Removing {}", java_root.display());
    fs::remove_dir_all(&java_root).with_io(IoOp::Remove, &java_root)?;

    info!("New java route: {}", plan.destination.display());
    if let Err(err) = move_into_place(&plan.staging, &plan.destination) {
        warn!(
            "Package contents left in staging directory {}",
            plan.staging.display()
        );
        return Err(err);
    }

    Ok(plan)
}

fn move_into_place(staging: &Path, destination: &Path) -> RepackageResult<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).with_io(IoOp::CreateDir, parent)?;
    }
    fs::rename(staging, destination).with_io(IoOp::Move, destination)
}
