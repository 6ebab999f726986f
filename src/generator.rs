//! Target directory creation.
//! Consumes the manifest in order and mirrors every included directory under
//! the target root.

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// How a run resolves target paths that already exist.
///
/// Selected once per run and applied uniformly to every conflict. `Prompt`
/// carries the yes/no answer the calling layer collected before the pipeline
/// runs; the pipeline itself never interacts with the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Record what would happen; guarantee zero filesystem mutation.
    DryRun,
    /// Overwrite existing files.
    Force,
    /// Leave existing files untouched.
    Skip,
    /// Resolved interactive choice: approved behaves as `Force`, denied as
    /// `Skip`.
    Prompt { approved: bool },
}

impl ConflictPolicy {
    pub fn is_dry_run(self) -> bool {
        matches!(self, ConflictPolicy::DryRun)
    }

    /// Whether an existing target file may be overwritten.
    pub fn overwrite_approved(self) -> bool {
        match self {
            ConflictPolicy::Force => true,
            ConflictPolicy::Prompt { approved } => approved,
            ConflictPolicy::DryRun | ConflictPolicy::Skip => false,
        }
    }
}

/// One non-fatal failure recorded while populating files.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub relative_path: String,
    pub reason: String,
}

/// Accumulated outcome of one run.
///
/// Built incrementally by the generator and the populator and returned to
/// the calling layer, which decides how to render it and which exit status
/// to use.
#[derive(Debug, Default, Serialize)]
pub struct GenerationResult {
    pub directories_created: usize,
    pub files_written: usize,
    pub files_skipped: usize,
    pub files_excluded: usize,
    pub errors: Vec<FileFailure>,
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn record_failure(&mut self, relative_path: &str, reason: impl std::fmt::Display) {
        self.errors.push(FileFailure {
            relative_path: relative_path.to_string(),
            reason: reason.to_string(),
        });
    }
}

/// Creates every included directory entry under `target_root`.
///
/// Directories are processed in manifest order, so a directory always exists
/// before any file nested under it is populated. An existing directory is
/// treated as satisfied; an existing non-directory is a conflict. A creation
/// failure aborts the run and leaves earlier directories in place: creation
/// is idempotent and safe to retry, so no rollback is attempted.
///
/// # Errors
/// * `Error::ConflictError` if a target path exists and is not a directory
/// * `Error::GenerationError` if a directory cannot be created
pub fn generate_structure(
    manifest: &Manifest,
    target_root: &Path,
    policy: ConflictPolicy,
    result: &mut GenerationResult,
) -> Result<()> {
    if !policy.is_dry_run() {
        if target_root.exists() && !target_root.is_dir() {
            return Err(Error::ConflictError { path: target_root.display().to_string() });
        }
        fs::create_dir_all(target_root).map_err(|source| Error::GenerationError {
            path: target_root.display().to_string(),
            source,
        })?;
    }

    for entry in manifest.included_directories() {
        let target_path = target_root.join(&entry.relative_path);

        if policy.is_dry_run() {
            if target_path.is_dir() {
                debug!("Directory already exists: {}", target_path.display());
            } else {
                debug!("Would create directory: {}", target_path.display());
                result.directories_created += 1;
            }
            continue;
        }

        if target_path.exists() {
            if !target_path.is_dir() {
                return Err(Error::ConflictError { path: target_path.display().to_string() });
            }
            debug!("Directory already exists: {}", target_path.display());
            continue;
        }

        fs::create_dir_all(&target_path).map_err(|source| Error::GenerationError {
            path: target_path.display().to_string(),
            source,
        })?;
        debug!("Created directory: {}", target_path.display());
        result.directories_created += 1;
    }

    Ok(())
}
