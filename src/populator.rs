//! File population.
//! Copies every included template file into the target tree, applying
//! variable substitution on the way and honoring the conflict policy.

use crate::generator::{ConflictPolicy, GenerationResult};
use crate::manifest::Manifest;
use crate::substitute::{substitute_content, VariableMap};
use log::{debug, warn};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes every included file entry to its target path.
///
/// Failures while reading, substituting or writing a single file are
/// recorded in `result.errors` and do not abort the remaining files; the
/// caller inspects the error list to decide the exit status. Excluded file
/// entries never enter the write loop, they are only counted.
pub fn populate_documents(
    manifest: &Manifest,
    template_root: &Path,
    target_root: &Path,
    variables: &VariableMap,
    policy: ConflictPolicy,
    result: &mut GenerationResult,
) {
    result.files_excluded += manifest.excluded_file_count();

    for entry in manifest.included_files() {
        let source_path = template_root.join(&entry.relative_path);
        let target_path = target_root.join(&entry.relative_path);

        if policy.is_dry_run() {
            debug!("Would write file: {}", target_path.display());
            result.files_written += 1;
            continue;
        }

        if target_path.exists() && !policy.overwrite_approved() {
            debug!("Skipping existing file: {}", target_path.display());
            result.files_skipped += 1;
            continue;
        }

        match write_document(&source_path, &target_path, variables) {
            Ok(()) => {
                debug!("Wrote file: {}", target_path.display());
                result.files_written += 1;
            }
            Err(err) => {
                warn!("Failed to write '{}': {}", entry.relative_path, err);
                result.record_failure(&entry.relative_path, err);
            }
        }
    }
}

/// Reads, substitutes and writes one file.
///
/// The content lands in a temporary sibling first and is renamed into place,
/// so an interrupted run never leaves a half-written file under the final
/// name; concurrent readers observe either the old content or the new one.
fn write_document(source_path: &Path, target_path: &Path, variables: &VariableMap) -> io::Result<()> {
    let raw = fs::read(source_path)?;
    let content = substitute_content(&raw, variables);

    let parent = target_path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(&content)?;
    staged.persist(target_path).map_err(|err| err.error)?;
    Ok(())
}
